//! Concentric rings warped into a breathing tunnel

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const RINGS: usize = 8;
const RING_POINTS: usize = 100;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 667.0;
    let bins = frame.frequency_domain();
    let n = bins.len();

    let time = ctx.now as f32 * 0.001;
    let base_radius = p.min_dim() * 0.6;

    for ring in 0..RINGS {
        let radius = base_radius * (1.0 - ring as f32 / RINGS as f32);
        let amplitude = bins[ring * n / RINGS] as f32 / 255.0 * 100.0 * sf;

        let mut points = Vec::with_capacity(RING_POINTS + 1);
        for i in 0..=RING_POINTS {
            let angle = i as f32 / RING_POINTS as f32 * TAU;
            let wave = (angle * 6.0 + time * 2.0).sin() * amplitude;
            let wave2 = (angle * 8.0 - time * 3.0).cos() * amplitude * 0.5;
            let r = radius + wave + wave2;
            points.push((cx + r * angle.cos(), cy + r * angle.sin()));
        }

        let hue = ring as f32 / RINGS as f32 * 360.0 + time * 30.0;
        let alpha = 1.0 - ring as f32 / RINGS as f32 * 0.5;
        let width = ((RINGS - ring) as f32 * 1.5 * sf).max(1.0);
        p.polyline(&points, hsl(hue, 100.0, 50.0), width, alpha);
    }
}
