//! Orbiting points joined where they drift close

use super::{EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const POINTS: usize = 30;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 500.0;
    let bins = frame.frequency_domain();
    let n = bins.len();

    let time = ctx.now as f32 * 0.001;

    let mut points = [(0.0f32, 0.0f32, 0.0f32); POINTS];
    for (i, point) in points.iter_mut().enumerate() {
        let angle = i as f32 / POINTS as f32 * TAU + time * 0.5;
        let audio = bins[i * n / POINTS] as f32 / 255.0;
        let radius = (200.0 + audio * 150.0) * sf;
        *point = (cx + angle.cos() * radius, cy + angle.sin() * radius, audio);
    }

    let reach = 200.0 * sf;
    for i in 0..POINTS {
        for j in (i + 1)..POINTS {
            let (x0, y0, a0) = points[i];
            let (x1, y1, a1) = points[j];
            let dist = ((x0 - x1).powi(2) + (y0 - y1).powi(2)).sqrt();
            if dist < reach {
                let alpha = (1.0 - dist / reach) * (a0 + a1) / 2.0;
                let hue = (time * 50.0 + dist) % 360.0;
                p.line(
                    x0,
                    y0,
                    x1,
                    y1,
                    hsl(hue, 100.0, 50.0),
                    ((1.5 + (a0 + a1) * 3.0) * sf).max(1.0),
                    alpha,
                );
            }
        }
    }

    for (i, &(x, y, audio)) in points.iter().enumerate() {
        let hue = (time * 50.0 + i as f32 * 360.0 / POINTS as f32) % 360.0;
        p.disc(x, y, ((4.0 + audio * 7.0) * sf).max(1.0), hsl(hue, 100.0, 50.0), 0.8);
    }
}
