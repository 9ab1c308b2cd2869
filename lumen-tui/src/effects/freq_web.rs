//! Counter-rotating rings laced into a web

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const RING_POINTS: usize = 8;
const RINGS: usize = 4;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let max_radius = p.min_dim() * 1.4;
    let sf = p.min_dim() / 1000.0;

    let mut rings = [[(0.0f32, 0.0f32); RING_POINTS]; RINGS];
    for (ring, points) in rings.iter_mut().enumerate() {
        let radius = max_radius * (ring + 1) as f32 / RINGS as f32;
        let spin = if ring % 2 == 1 { time } else { -time };

        for (i, point) in points.iter_mut().enumerate() {
            let angle = i as f32 / RING_POINTS as f32 * TAU + spin;
            let audio = bins[i * n / RING_POINTS] as f32 / 255.0;
            let r = radius * (1.0 + audio * 0.3);
            *point = (cx + angle.cos() * r, cy + angle.sin() * r);
        }
    }

    for ring in 0..RINGS {
        let hue = (time * 50.0 + ring as f32 * 90.0) % 360.0;
        for i in 0..RING_POINTS {
            let a = rings[ring][i];
            let b = rings[ring][(i + 1) % RING_POINTS];
            p.line(
                a.0,
                a.1,
                b.0,
                b.1,
                hsl(hue, 100.0, 60.0),
                (2.0 * sf).max(1.0),
                0.4 + intensity * 0.6,
            );

            if ring < RINGS - 1 {
                let out = rings[ring + 1][i];
                p.line(
                    a.0,
                    a.1,
                    out.0,
                    out.1,
                    hsl(hue + 30.0, 100.0, 60.0),
                    (2.0 * sf).max(1.0),
                    0.3 + intensity * 0.7,
                );
            }
        }
    }
}
