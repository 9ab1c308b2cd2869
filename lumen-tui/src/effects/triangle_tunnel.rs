//! Nested rotating triangles receding into a tunnel

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 600.0;
    let bins = frame.frequency_domain();
    let n = bins.len();

    let time = ctx.now as f32 * 0.0003;
    let layers = 3;
    let triangles = 3;

    for layer in 0..layers {
        let depth = layer as f32 / layers as f32;
        let scale = 1.0 - depth * 0.6;
        let spin = time * 1.2;
        // Outermost layer reaches ~0.63 of the short side
        let layer_size = p.min_dim() * 0.63 * scale;

        let audio = bins[(layer * n / (layers * 2)).min(n - 1)] as f32 / 255.0;

        for i in 0..triangles {
            let angle = i as f32 / triangles as f32 * TAU + spin;
            let radius = layer_size * (1.0 + audio * 0.2);

            let points: Vec<(f32, f32)> = (0..3)
                .map(|j| {
                    let tri = angle + j as f32 * TAU / 3.0;
                    (cx + tri.cos() * radius, cy + tri.sin() * radius)
                })
                .collect();

            let hue = (time * 15.0 + layer as f32 * 40.0) % 360.0;
            let alpha = 0.7 - depth * 0.3;
            p.fill_poly(&points, hsl(hue, 90.0, 60.0), alpha);

            let mut outline = points.clone();
            outline.push(points[0]);
            p.polyline(&outline, hsl(hue, 100.0, 80.0), (1.5 * sf).max(1.0), alpha);
        }
    }
}
