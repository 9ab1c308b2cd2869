//! Recursive branching tree swaying with the signal

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::FRAC_PI_2;

const DEPTH: u32 = 7;

#[allow(clippy::too_many_arguments)]
fn branch(
    p: &mut Painter,
    bins: &[u8],
    sf: f32,
    time: f32,
    x: f32,
    y: f32,
    length: f32,
    angle: f32,
    depth: u32,
    index: usize,
) {
    if depth == 0 {
        return;
    }

    let audio = (bins[(index * bins.len() / 32) % bins.len()] as f32 / 255.0).powf(1.2);
    let end_x = x + angle.cos() * length;
    let end_y = y + angle.sin() * length;

    let hue = (time * 50.0 + depth as f32 * 60.0) % 360.0;
    p.line(
        x,
        y,
        end_x,
        end_y,
        hsl(hue, 100.0, 50.0),
        ((depth as f32 + audio * 4.0) * sf).max(1.0),
        0.7 + audio * 0.3,
    );

    let spread = FRAC_PI_2 / 2.0 + (time * 2.0 + audio * 3.0).sin() * 0.3;
    let next = length * (0.7 + audio * 0.15);

    branch(p, bins, sf, time, end_x, end_y, next, angle - spread, depth - 1, index * 2);
    branch(p, bins, sf, time, end_x, end_y, next, angle + spread, depth - 1, index * 2 + 1);
}

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let sf = p.min_dim() / 500.0;
    let bins = frame.frequency_domain();
    let intensity = (avg(bins) / 255.0).powf(1.3);

    let time = ctx.now as f32 * 0.001;
    let start = 160.0 * sf * (1.0 + intensity * 0.4);
    branch(p, bins, sf, time, w / 2.0, h, start, -FRAC_PI_2, DEPTH, 0);
}
