//! Shards of color orbiting and flaring with their band

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::{hsl, lerp};
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const CRYSTALS: usize = 8;

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

    for i in 0..CRYSTALS {
        let angle = i as f32 / CRYSTALS as f32 * TAU;
        let audio = bins[i * n / CRYSTALS] as f32 / 255.0;
        let radius = max_radius * (0.3 + audio * 0.7);

        let points: Vec<(f32, f32)> = (0..3)
            .map(|j| {
                let point_angle = angle + j as f32 / 3.0 * TAU + time;
                (
                    cx + point_angle.cos() * radius,
                    cy + point_angle.sin() * radius,
                )
            })
            .collect();

        let hue = (time * 50.0 + i as f32 * 360.0 / CRYSTALS as f32) % 360.0;
        let color = lerp(
            hsl(hue, 100.0, 70.0),
            hsl(hue + 60.0, 100.0, 60.0),
            0.5,
        );
        p.fill_poly(&points, color, 0.7 + intensity * 0.3);
    }
}
