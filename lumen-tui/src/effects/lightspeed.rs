//! Radial streaks rushing outward, count and reach scale with intensity

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

    let streaks = (75.0 + global * 75.0) as usize;
    let base_len = p.w().max(p.h()) * 0.9;

    for i in 0..streaks {
        let value = bins[i * n / streaks] as f32 / 255.0;
        let angle = i as f32 / streaks as f32 * TAU + ctx.rng.signed() * 0.1;
        let length = base_len * (0.3 + value * 0.7);

        let start = (ctx.rng.next_f32() * 0.4 + 0.1) * length * global;
        let (sx, sy) = (cx + angle.cos() * start, cy + angle.sin() * start);
        let (ex, ey) = (cx + angle.cos() * length, cy + angle.sin() * length);

        let hue = (ctx.now as f32 * 0.05 + i as f32 * 360.0 / streaks as f32) % 360.0;
        let alpha = (0.6 + value * 0.4) * global;
        let color = hsl(hue, 100.0, 95.0 + value * 5.0);
        p.line(sx, sy, ex, ey, color, ((2.0 + value * 4.0) * sf).max(1.0), alpha);
    }
}
