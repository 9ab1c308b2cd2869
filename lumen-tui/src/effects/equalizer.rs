//! Classic bar equalizer with reflection, driven by the waveform bytes

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

/// 32 samples averaged per bar over the 1024-byte buffer
pub(super) const BAR_COUNT: usize = 32;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let bytes = frame.time_domain();
    let group = bytes.len() / BAR_COUNT;
    let bar_w = w / BAR_COUNT as f32;
    let spacing = bar_w * 0.2;

    for i in 0..BAR_COUNT {
        let target = avg(&bytes[i * group..(i + 1) * group]) * 0.003 * h;

        // Smooth transition toward the new height
        let bar = &mut fx.equalizer_bars[i];
        *bar += (target - *bar) * 0.3;
        let bar_h = *bar;

        let hue = i as f32 / BAR_COUNT as f32 * 180.0 + ctx.now as f32 * 0.05;
        let x = i as f32 * bar_w + spacing / 2.0;
        let wid = bar_w - spacing;

        // Vertical gradient, bottom to tip
        let rows = bar_h.ceil() as i32;
        for r in 0..rows {
            let t = r as f32 / rows.max(1) as f32;
            let color = hsl(hue + 60.0 * t, 100.0, 50.0 + 20.0 * t);
            p.fill_rect(x, h - r as f32 - 1.0, wid, 1.0, color, 0.8 + 0.2 * t);
        }

        // Reflection below the baseline
        let refl = (bar_h * 0.4).ceil() as i32;
        for r in 0..refl {
            let t = r as f32 / refl.max(1) as f32;
            let color = hsl(hue, 100.0, 50.0);
            p.fill_rect(x, h - 1.0 + r as f32, wid, 1.0, color, 0.4 * (1.0 - t));
        }
    }
}
