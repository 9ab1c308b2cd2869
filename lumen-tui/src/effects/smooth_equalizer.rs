//! Frequency-domain equalizer with smoothed bars and reflections

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

pub(super) const BAR_COUNT: usize = 64;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let bins = frame.frequency_domain();
    let n = bins.len();

    let bar_w = w / BAR_COUNT as f32;
    let spacing = bar_w * 0.2;

    for i in 0..BAR_COUNT {
        let start = i * n / BAR_COUNT;
        let end = (i + 1) * n / BAR_COUNT;
        let average = avg(&bins[start..end]);
        let target = (average * 0.003 * h).min(h * 0.8);

        let bar = &mut fx.smooth_bars[i];
        *bar = if bar.is_finite() {
            *bar + (target - *bar) * 0.3
        } else {
            target
        };
        *bar = bar.clamp(0.0, h * 0.8);
        let bar_h = *bar;

        let hue = i as f32 / BAR_COUNT as f32 * 180.0 + ctx.now as f32 * 0.05;
        let x = i as f32 * bar_w + spacing / 2.0;
        let wid = (bar_w - spacing).max(0.5);

        let rows = bar_h.ceil() as i32;
        for r in 0..rows {
            let t = r as f32 / rows.max(1) as f32;
            let color = hsl(hue + 60.0 * t, 100.0, 50.0 + 20.0 * t);
            p.fill_rect(x, h - r as f32 - 1.0, wid, 1.0, color, 0.8 + 0.2 * t);
        }

        let refl = (bar_h * 0.4).ceil() as i32;
        for r in 0..refl {
            let t = r as f32 / refl.max(1) as f32;
            p.fill_rect(
                x,
                h - 1.0 + r as f32,
                wid,
                1.0,
                hsl(hue, 100.0, 50.0),
                0.4 * (1.0 - t),
            );
        }
    }
}
