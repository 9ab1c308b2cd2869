//! Pulsing petals blooming from the center

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::{PI, TAU};

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    _fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 533.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.001;
    let petals = (8.0 + intensity * 8.0) as usize;
    let max_radius = p.min_dim() * 1.525;

    // Deepen the trails under the bloom
    p.fade(0.15);

    for i in 0..petals {
        let base_angle = i as f32 / petals as f32 * TAU;
        let audio = (bins[(i * n / (petals * 2)).min(n - 1)] as f32 / 255.0).powf(1.5);

        let mut points = Vec::with_capacity(101);
        for step in 0..=100 {
            let t = step as f32 / 100.0;
            let pulse = 0.2 * (time * 3.0 + i as f32).sin();
            let wave = (t * PI * 4.0 + time * 2.0).sin() * 0.2;

            let angle = base_angle + t * PI * 0.5 + wave;
            let modifier = (t * PI).sin() + pulse;
            let radius = max_radius * (0.3 + audio * 0.7) * modifier;

            points.push((
                cx + (angle + time).cos() * radius,
                cy + (angle + time).sin() * radius,
            ));
        }

        let hue = (time * 30.0 + i as f32 * 360.0 / petals as f32) % 360.0;
        let alpha = 0.6 + audio * 0.4;
        p.fill_poly(&points, hsl(hue, 100.0, 60.0), alpha * 0.8);
        p.polyline(&points, hsl(hue, 100.0, 90.0), (3.0 * sf).max(1.0), alpha * 0.8);
    }
}
