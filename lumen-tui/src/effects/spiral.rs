//! Amplitude spiral, one turn over the whole buffer

use super::{EffectStates, FrameCtx};
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
    let sf = p.min_dim() / 667.0;
    let bytes = frame.time_domain();
    let n = bytes.len();
    let step = (n / 256).max(1);

    let mut prev: Option<(f32, f32)> = None;
    for i in (0..n).step_by(step) {
        let t = i as f32 / n as f32;
        let angle = t * TAU;
        let radius = bytes[i] as f32 * 2.25 * sf + t * 300.0 * sf;
        let point = (cx + radius * angle.cos(), cy + radius * angle.sin());

        if let Some(prev) = prev {
            let color = hsl(t * 360.0, 100.0, 50.0);
            p.line(prev.0, prev.1, point.0, point.1, color, (6.0 * sf).max(1.0), 1.0);
        }
        prev = Some(point);
    }
}
