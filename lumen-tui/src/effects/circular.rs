//! Radial frequency bars around a ring

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    _ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 400.0;
    let radius = cx.min(cy) * 0.4;

    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = 1.0 + avg(bins) / 255.0 * 0.3;

    // One bar per couple of degrees reads better than per-bin here
    let bars = 128usize;
    let bar_w = (TAU * radius / bars as f32) * 1.2;

    for i in 0..bars {
        let angle = i as f32 / bars as f32 * TAU;
        let value = bins[i * n / bars] as f32;
        let bar_h = (value + 30.0) * sf * intensity;
        let hue = i as f32 / bars as f32 * 360.0;

        p.save();
        p.translate(cx, cy);
        p.rotate(angle);
        // Inner and outer halves stand in for the JS gradient stops
        p.fill_rect(0.0, radius * 0.9, bar_w, bar_h / 2.0, hsl(hue, 100.0, 50.0), 0.8);
        p.fill_rect(
            0.0,
            radius * 0.9 + bar_h / 2.0,
            bar_w,
            bar_h / 2.0,
            hsl(hue, 100.0, 30.0),
            0.6,
        );
        p.restore();
    }
}
