//! Spiral arms and orbiting glow particles

use super::{avg, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::hsl;
use lumen_analysis::SampleFrame;
use std::f32::consts::TAU;

const ARMS: usize = 6;
const ARM_STEPS: usize = 30;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (cx, cy) = (p.w() / 2.0, p.h() / 2.0);
    let sf = p.min_dim() / 445.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = avg(bins) / 255.0;

    let time = ctx.now as f32 * 0.0005;
    let max_radius = p.min_dim() * 0.8;
    let base_hue = (time * 60.0) % 360.0;

    for arm in 0..ARMS {
        let angle_offset = arm as f32 / ARMS as f32 * TAU;
        let arm_hue = (base_hue + arm as f32 * 60.0) % 360.0;

        let mut points = Vec::with_capacity(ARM_STEPS + 1);
        for i in 0..=ARM_STEPS {
            let t = i as f32 / ARM_STEPS as f32;
            let audio = bins[((t * n as f32 * 0.8) as usize).min(n - 1)] as f32 / 255.0;

            let tightness = 5.0 + intensity * 3.0;
            let angle = t * tightness + angle_offset + time * (2.0 + intensity);
            let modulation = 0.2 + audio * 0.8 + (t * TAU * 2.0 + time * 3.0).sin() * 0.1;
            let radius = t * max_radius * modulation;

            points.push((cx + angle.cos() * radius, cy + angle.sin() * radius));
        }

        // Smooth the arm through segment midpoints
        let width = ((3.0 + intensity * 6.0) * sf).max(1.0);
        let alpha = 0.4 + intensity * 0.3;
        let mut from = points[0];
        for i in 1..points.len() - 1 {
            let mid = (
                (points[i].0 + points[i + 1].0) / 2.0,
                (points[i].1 + points[i + 1].1) / 2.0,
            );
            let t = i as f32 / points.len() as f32;
            let hue = (arm_hue + t * 90.0) % 360.0;
            p.quad_curve(from, points[i], mid, hsl(hue, 100.0, 60.0), width, alpha);
            from = mid;
        }
    }

    // Glow particles orbiting the core
    let count = fx.nebula_particles.len();
    for (i, particle) in fx.nebula_particles.iter_mut().enumerate() {
        particle.angle += (0.01 + particle.speed * 0.02) * (1.0 + intensity * 0.5);

        let freq = bins[i * n / count] as f32 / 255.0;
        let radius = particle.radius * max_radius * (0.8 + freq * 0.4);
        let x = cx + particle.angle.cos() * radius;
        let y = cy + particle.angle.sin() * radius;

        let size = particle.size * (1.0 + freq * 1.5) * sf;
        let hue = (base_hue + particle.hue_offset + time * 30.0) % 360.0;
        let color = hsl(hue, 100.0, 70.0);

        p.disc(x, y, size * 2.0, color, 0.3 * freq);
        p.disc(x, y, size, color, 0.8 * freq);
    }
}
