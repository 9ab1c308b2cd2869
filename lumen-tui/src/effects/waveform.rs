//! Raw waveform trace, hue cycling with time

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let sf = p.min_dim() / 1000.0;
    let bytes = frame.time_domain();
    let n = bytes.len();

    // One sample per half pixel is plenty for the terminal surface
    let step = (n / (w as usize * 2).max(1)).max(1);
    let color = hsl(ctx.now as f32 * 0.05, 100.0, 50.0);

    let mut points = Vec::with_capacity(n / step + 1);
    for i in (0..n).step_by(step) {
        let v = bytes[i] as f32 / 128.0;
        let x = i as f32 / n as f32 * w;
        let y = h / 2.0 + (v - 1.0) * h / 2.0;
        points.push((x, y));
    }
    p.polyline(&points, color, (8.0 * sf).max(1.0), 1.0);
}
