//! Horizontal ribbons surfing the spectrum

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::{hsl, lerp};
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const RIBBONS: usize = 3;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let sf = p.min_dim() / 800.0;
    let bins = frame.frequency_domain();
    let n = bins.len();

    let time = ctx.now as f32 * 0.001;
    let steps = (w / 2.0).max(16.0) as usize;

    for r in 0..RIBBONS {
        let offset = r as f32 * TAU / RIBBONS as f32;
        let base_hue = (time * 50.0 + r as f32 * 120.0) % 360.0;

        let mut prev: Option<(f32, f32)> = None;
        for s in 0..=steps {
            let frac = s as f32 / steps as f32;
            let audio = bins[((frac * n as f32) as usize).min(n - 1)] as f32 / 255.0;

            let x = frac * w;
            // Roughly six and three wave cycles across the surface
            let wave1 = (frac * 38.0 + time + offset).sin() * 0.046 * h;
            let wave2 = (frac * 19.0 - time * 2.0).cos() * 0.028 * h;
            let y = h / 2.0 + wave1 + wave2 + audio * 0.093 * h;

            if let Some(prev) = prev {
                // Three gradient stops swept along the ribbon
                let color = if frac < 0.5 {
                    lerp(
                        hsl(base_hue, 100.0, 50.0),
                        hsl(base_hue + 60.0, 100.0, 50.0),
                        frac * 2.0,
                    )
                } else {
                    lerp(
                        hsl(base_hue + 60.0, 100.0, 50.0),
                        hsl(base_hue + 120.0, 100.0, 50.0),
                        frac * 2.0 - 1.0,
                    )
                };
                p.line(
                    prev.0,
                    prev.1,
                    x,
                    y,
                    color,
                    ((10.0 + r as f32 * 5.0) * sf).max(1.0),
                    0.5,
                );
            }
            prev = Some((x, y));
        }
    }
}
