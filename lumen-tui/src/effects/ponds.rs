//! Concentric ripples distorted by the spectrum

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
    let sf = p.min_dim() / 1000.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let global = avg(bins) / 255.0;

    let step = (n / 96).max(1);
    for ring in 0..8 {
        let base_radius = (ring + 1) as f32 * 50.0 * sf;

        let mut points = Vec::with_capacity(n / step + 1);
        for i in (0..n).step_by(step) {
            let value = bins[i] as f32 / 255.0;
            let angle = i as f32 / n as f32 * TAU;
            let variation = value * 40.0 * sf * (1.0 + global);
            let radius = base_radius + variation;
            points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
        }
        if let Some(&first) = points.first() {
            points.push(first);
        }

        let hue = ctx.now as f32 * 0.05 + ring as f32 * 45.0;
        let color = hsl(hue, 100.0, 50.0 + global * 20.0);
        let alpha = 0.5 + global * 0.3;
        p.polyline(&points, color, ((2.0 + global * 3.0) * sf).max(1.0), alpha);
    }
}
