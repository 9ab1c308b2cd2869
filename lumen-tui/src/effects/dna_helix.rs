//! Double helix with animated base pairs and shed sparks

use super::{avg, DnaParticle, EffectStates, FrameCtx};
use crate::canvas::Painter;
use crate::color::{hsl, lerp};
use lumen_analysis::SampleFrame;
use std::f32::consts::{FRAC_PI_4, PI, TAU};

const POINTS: usize = 150;
const MAX_PARTICLES: usize = 300;

pub(super) fn draw(
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    let (w, h) = (p.w(), p.h());
    let (cx, cy) = (w / 2.0, h / 2.0);
    let sf = p.min_dim() / 400.0;
    let bins = frame.frequency_domain();
    let n = bins.len();
    let intensity = (avg(bins) / 255.0).powf(1.5);

    let time = ctx.now as f32 * 0.001;
    let radius = p.min_dim() * 0.25;
    let stretch = h * 1.5;

    p.save();
    p.translate(cx, cy);
    p.rotate(FRAC_PI_4);
    p.translate(-cx, -cy);

    let sample = |t: f32| -> f32 {
        let idx = ((t * n as f32) as usize).min(n - 1);
        (bins[idx] as f32 / 255.0).powf(1.2)
    };
    let strand_y = |t: f32, angle: f32| -> f32 {
        cy + (t - 0.5) * stretch + (angle * 2.0).sin() * 15.0 * intensity
    };

    for strand in 0..2 {
        let phase = strand as f32 * PI;
        let hue1 = (time * 50.0 + strand as f32 * 180.0) % 360.0;
        let hue2 = (hue1 + 60.0) % 360.0;
        let alpha = 0.7 + intensity * 0.3;
        let width = ((3.0 + intensity * 4.0) * sf).max(1.0);

        let mut prev: Option<(f32, f32)> = None;
        for i in 0..POINTS {
            let t = i as f32 / POINTS as f32;
            let angle = t * PI * 6.0 + time * 2.0;
            let audio = sample(t);
            let r = radius * (1.0 + audio * 0.5);

            let x = cx + (angle + phase).cos() * r;
            let y = strand_y(t, angle);

            if let Some(prev) = prev {
                let color = lerp(hsl(hue1, 100.0, 50.0), hsl(hue2, 100.0, 50.0), t);
                p.line(prev.0, prev.1, x, y, color, width, alpha);
            }
            prev = Some((x, y));

            // Shed a spark now and then, harder when the signal is hot
            if ctx.rng.next_f32() < 0.1 * intensity && fx.dna_particles.len() < MAX_PARTICLES {
                fx.dna_particles.push(DnaParticle {
                    x,
                    y,
                    size: ctx.rng.range_f32(1.0, 4.0),
                    speed: ctx.rng.range_f32(1.0, 3.0),
                    angle: ctx.rng.range_f32(0.0, TAU),
                    hue_offset: ctx.rng.range_f32(0.0, TAU),
                });
            }
        }
    }

    // Base pairs between the strands
    for i in (0..POINTS).step_by(5) {
        let t = i as f32 / POINTS as f32;
        let angle = t * PI * 6.0 + time * 2.0;
        let audio = sample(t);
        let r = radius * (1.0 + audio * 0.5);

        let y = strand_y(t, angle);
        let x1 = cx + angle.cos() * r;
        let x2 = cx + (angle + PI).cos() * r;

        let cp = (
            (x1 + x2) / 2.0,
            y - 10.0 * (time * 3.0 + t * TAU).sin() * intensity,
        );
        let hue = (t * 360.0 + time * 50.0) % 360.0;
        p.quad_curve(
            (x1, y),
            cp,
            (x2, y),
            hsl(hue, 100.0, 50.0),
            ((1.0 + audio * 2.0) * sf).max(1.0),
            0.5 + audio * 0.5,
        );
    }

    // Advance and draw the sparks; they shrink away each frame
    let time_hue = time * 100.0;
    fx.dna_particles.retain_mut(|particle| {
        particle.x += particle.angle.cos() * particle.speed * intensity;
        particle.y += particle.angle.sin() * particle.speed * intensity;
        particle.size *= 0.95;
        particle.size > 0.1
    });
    for particle in &fx.dna_particles {
        let hue = (time_hue + particle.hue_offset) % 360.0;
        p.disc(
            particle.x,
            particle.y,
            particle.size * sf.max(0.5),
            hsl(hue, 100.0, 70.0),
            (particle.size / 4.0).min(1.0),
        );
    }

    p.restore();
}
