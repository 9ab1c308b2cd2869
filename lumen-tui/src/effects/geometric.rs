//! Concentric hexagon layers with spokes between them

use super::{avg, EffectStates, FrameCtx};
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
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let sides = 6;
    let layers = 6;

    for layer in 1..=layers {
        let radius = layer as f32 * 80.0 * sf * (1.0 + intensity * 0.5);
        let spin = (if layer % 2 == 1 { time } else { -time }) % TAU;

        let mut points = Vec::with_capacity(sides + 1);
        for i in 0..=sides {
            let angle = i as f32 / sides as f32 * TAU + spin;
            let audio = bins[(i * n / sides).min(n - 1)] as f32 / 255.0;
            let r = radius * (1.0 + audio * 0.2);
            points.push((cx + angle.cos() * r, cy + angle.sin() * r));
        }

        let hue = (time * 50.0 + layer as f32 * 60.0) % 360.0;
        p.polyline(
            &points,
            hsl(hue, 100.0, 50.0),
            ((4.0 + intensity * 4.0) * sf).max(1.0),
            0.6 + intensity * 0.4,
        );

        // Spokes out from the previous layer
        if layer > 1 {
            let inner = (layer - 1) as f32 * 50.0 * sf * (1.0 + intensity * 0.3);
            for i in 0..sides {
                let angle = i as f32 / sides as f32 * TAU + spin;
                let audio = bins[(i * n / sides).min(n - 1)] as f32 / 255.0;
                let hue = (angle.to_degrees() + time * 50.0) % 360.0;
                p.line(
                    cx + angle.cos() * inner,
                    cy + angle.sin() * inner,
                    cx + angle.cos() * radius,
                    cy + angle.sin() * radius,
                    hsl(hue, 100.0, 50.0),
                    ((2.0 + audio * 4.0) * sf).max(1.0),
                    0.4 + audio * 0.4,
                );
            }
        }
    }
}
