//! Mesh of grid lines displaced by a radial wave

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

const GRID: usize = 20;

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
    let cell_w = w / GRID as f32;
    let cell_h = h / GRID as f32;

    for gx in 0..=GRID {
        for gy in 0..=GRID {
            let x = gx as f32 / GRID as f32 * w;
            let y = gy as f32 / GRID as f32 * h;

            let dist = ((gx as f32 / GRID as f32 - 0.5).powi(2)
                + (gy as f32 / GRID as f32 - 0.5).powi(2))
            .sqrt();
            let idx = ((dist * n as f32) as usize).min(n - 1);
            let audio = bins[idx] as f32 / 255.0;

            let wave = (time * 2.0 + dist * 5.0).sin() * 20.0 * sf;
            let offset = wave * (1.0 + audio);

            let hue = (time * 30.0 + dist * 180.0) % 360.0;
            let alpha = 0.5 + audio * 0.5;
            let width = ((1.0 + audio * 3.0) * sf).max(1.0);

            if gx < GRID {
                p.line(
                    x + offset,
                    y,
                    x + cell_w + offset,
                    y,
                    hsl(hue, 100.0, 50.0),
                    width,
                    alpha,
                );
            }
            if gy < GRID {
                p.line(
                    x,
                    y + offset,
                    x,
                    y + cell_h + offset,
                    hsl(hue + 30.0, 100.0, 50.0),
                    width,
                    alpha,
                );
            }
        }
    }
}
