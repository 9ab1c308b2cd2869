//! Spokes and dashed rings radiating from the center

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
    let scale = p.min_dim() / 1000.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let spokes = 16;

    for i in 0..spokes {
        let angle = i as f32 / spokes as f32 * TAU + time * 0.5;
        let value = bins[i * n / spokes] as f32 / 255.0;
        let radius = (300.0 + value * 200.0) * scale;

        let hue = (time * 20.0 + i as f32 * 20.0) % 360.0;
        p.line(
            cx,
            cy,
            cx + angle.cos() * radius,
            cy + angle.sin() * radius,
            hsl(hue, 100.0, 50.0),
            ((4.0 + value * 6.0) * scale).max(1.0),
            0.7,
        );
    }

    for i in 0..2 {
        let ring = (160.0 + i as f32 * 120.0 + intensity * 40.0) * scale;
        let hue = (time * 30.0 + i as f32 * 120.0) % 360.0;
        p.stroke_circle_dashed(
            cx,
            cy,
            ring,
            hsl(hue, 80.0, 50.0),
            ((4.0 + intensity * 4.0) * scale).max(1.0),
            0.5,
            Some((10.0 * scale.max(0.3), 16.0 * scale.max(0.3))),
        );
    }
}
