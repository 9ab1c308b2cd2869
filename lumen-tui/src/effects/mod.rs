//! The effect catalog
//!
//! Every effect is a draw function over the same contract: the current
//! sample frame, its private state slot, the painter, and the frame
//! context. Effects never touch schedule or overlay state, and each one
//! restores any painter transform it pushes before returning.

mod circular;
mod constellation;
mod crystal_pulse;
mod cube_array;
mod dna_helix;
mod equalizer;
mod floating_shapes;
mod fractal_tree;
mod freq_flower;
mod freq_web;
mod geometric;
mod geometric_web;
mod hypercube;
mod lightspeed;
mod matrix_rain;
mod nebula_flow;
mod polyhedron;
mod ponds;
mod ribbons;
mod smooth_equalizer;
mod spiral;
mod starfield;
mod triangle_tunnel;
mod wave_grid;
mod wave_tunnel;
mod waveform;

use crate::canvas::Painter;
use crate::rng::Rng;
use crate::schedule::EffectId;
use lumen_analysis::SampleFrame;

/// Per-frame context handed to every effect
pub struct FrameCtx<'a> {
    /// Milliseconds since session start
    pub now: u64,
    /// Session PRNG for explicitly stochastic effects
    pub rng: &'a mut Rng,
}

/// Dispatch to the active effect's draw function
pub fn draw(
    id: EffectId,
    frame: &mut SampleFrame<'_>,
    fx: &mut EffectStates,
    p: &mut Painter,
    ctx: &mut FrameCtx<'_>,
) {
    match id {
        EffectId::Waveform => waveform::draw(frame, fx, p, ctx),
        EffectId::Equalizer => equalizer::draw(frame, fx, p, ctx),
        EffectId::Spiral => spiral::draw(frame, fx, p, ctx),
        EffectId::Circular => circular::draw(frame, fx, p, ctx),
        EffectId::Ponds => ponds::draw(frame, fx, p, ctx),
        EffectId::Lightspeed => lightspeed::draw(frame, fx, p, ctx),
        EffectId::DnaHelix => dna_helix::draw(frame, fx, p, ctx),
        EffectId::TriangleTunnel => triangle_tunnel::draw(frame, fx, p, ctx),
        EffectId::MatrixRain => matrix_rain::draw(frame, fx, p, ctx),
        EffectId::Geometric => geometric::draw(frame, fx, p, ctx),
        EffectId::Hypercube => hypercube::draw(frame, fx, p, ctx),
        EffectId::CubeArray => cube_array::draw(frame, fx, p, ctx),
        EffectId::WaveGrid => wave_grid::draw(frame, fx, p, ctx),
        EffectId::Constellation => constellation::draw(frame, fx, p, ctx),
        EffectId::Polyhedron => polyhedron::draw(frame, fx, p, ctx),
        EffectId::FractalTree => fractal_tree::draw(frame, fx, p, ctx),
        EffectId::FloatingShapes => floating_shapes::draw(frame, fx, p, ctx),
        EffectId::Starfield => starfield::draw(frame, fx, p, ctx),
        EffectId::GeometricWeb => geometric_web::draw(frame, fx, p, ctx),
        EffectId::Ribbons => ribbons::draw(frame, fx, p, ctx),
        EffectId::SmoothEqualizer => smooth_equalizer::draw(frame, fx, p, ctx),
        EffectId::NebulaFlow => nebula_flow::draw(frame, fx, p, ctx),
        EffectId::WaveTunnel => wave_tunnel::draw(frame, fx, p, ctx),
        EffectId::FreqFlower => freq_flower::draw(frame, fx, p, ctx),
        EffectId::FreqWeb => freq_web::draw(frame, fx, p, ctx),
        EffectId::CrystalPulse => crystal_pulse::draw(frame, fx, p, ctx),
    }
}

/// Mean of a byte buffer as f32
pub(crate) fn avg(bytes: &[u8]) -> f32 {
    if bytes.is_empty() {
        return 0.0;
    }
    let sum: u32 = bytes.iter().map(|&b| b as u32).sum();
    sum as f32 / bytes.len() as f32
}

/// A star in the depth field, unit-space position
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A drifting shape, normalized-space position
pub struct Shape {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
    pub kind: u8,
    pub speed_x: f32,
    pub speed_y: f32,
    pub rotation_speed: f32,
}

/// Short-lived spark shed by the helix strands, device-space position
pub struct DnaParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub angle: f32,
    pub hue_offset: f32,
}

/// Orbiting glow particle for the nebula
pub struct NebulaParticle {
    pub angle: f32,
    pub radius: f32,
    pub size: f32,
    pub hue_offset: f32,
    pub speed: f32,
}

/// Private state slots, one per stateful effect.
///
/// Created eagerly at session construction and kept for the whole
/// session, so effects retain momentum when revisited. Each slot is
/// touched only by its owning effect.
pub struct EffectStates {
    pub equalizer_bars: Vec<f32>,
    pub smooth_bars: Vec<f32>,
    pub rain_drops: Vec<f32>,
    pub stars: Vec<Star>,
    pub shapes: Vec<Shape>,
    pub dna_particles: Vec<DnaParticle>,
    pub nebula_particles: Vec<NebulaParticle>,
}

impl EffectStates {
    pub fn new(rng: &mut Rng) -> Self {
        let stars = (0..200)
            .map(|_| Star {
                x: rng.signed(),
                y: rng.signed(),
                z: rng.next_f32() * 2000.0,
            })
            .collect();

        let shapes = (0..20)
            .map(|_| Shape {
                x: rng.next_f32(),
                y: rng.next_f32(),
                size: rng.range_f32(20.0, 50.0),
                rotation: rng.range_f32(0.0, std::f32::consts::TAU),
                kind: rng.below(3) as u8,
                speed_x: rng.signed() * 0.002,
                speed_y: rng.signed() * 0.002,
                rotation_speed: rng.signed() * 0.05,
            })
            .collect();

        let nebula_particles = (0..100)
            .map(|_| NebulaParticle {
                angle: rng.range_f32(0.0, std::f32::consts::TAU),
                radius: rng.next_f32() * 0.8,
                size: rng.range_f32(4.5, 15.75),
                hue_offset: rng.range_f32(-30.0, 30.0),
                speed: rng.range_f32(0.5, 1.0),
            })
            .collect();

        Self {
            equalizer_bars: vec![0.0; equalizer::BAR_COUNT],
            smooth_bars: vec![0.0; smooth_equalizer::BAR_COUNT],
            rain_drops: Vec::new(),
            stars,
            shapes,
            dna_particles: Vec::new(),
            nebula_particles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;
    use lumen_analysis::{Analyzer, FFT_SIZE};

    /// Every effect must draw a synthetic frame without panicking and
    /// leave the painter transform reset.
    #[test]
    fn all_effects_draw_and_restore_state() {
        let mut analyzer = Analyzer::new();
        let samples: Vec<f32> = (0..FFT_SIZE)
            .map(|i| 0.4 * (i as f32 * 0.05).sin())
            .collect();
        let mut rng = Rng::new(77);
        let mut fx = EffectStates::new(&mut rng);
        let mut p = Painter::new(48, 16);

        for (step, id) in EffectId::ALL.into_iter().enumerate() {
            let mut frame = analyzer.begin_frame(&samples);
            let mut ctx = FrameCtx {
                now: step as u64 * 33,
                rng: &mut rng,
            };
            draw(id, &mut frame, &mut fx, &mut p, &mut ctx);
            assert!(p.is_reset(), "effect {:?} leaked painter state", id);
        }
    }

    #[test]
    fn effects_survive_a_tiny_surface() {
        let mut analyzer = Analyzer::new();
        let mut rng = Rng::new(3);
        let mut fx = EffectStates::new(&mut rng);
        let mut p = Painter::new(2, 1);

        for id in EffectId::ALL {
            let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
            let mut ctx = FrameCtx { now: 40, rng: &mut rng };
            draw(id, &mut frame, &mut fx, &mut p, &mut ctx);
        }
    }

    #[test]
    fn stateful_effects_keep_momentum_across_switches() {
        let mut analyzer = Analyzer::new();
        let mut rng = Rng::new(9);
        let mut fx = EffectStates::new(&mut rng);
        let mut p = Painter::new(32, 12);

        let z_before: Vec<f32> = fx.stars.iter().map(|s| s.z).collect();
        let mut frame = analyzer.begin_frame(&vec![0.1; FFT_SIZE]);
        let mut ctx = FrameCtx { now: 33, rng: &mut rng };
        draw(EffectId::Starfield, &mut frame, &mut fx, &mut p, &mut ctx);
        // Another effect in between must not disturb the starfield slot.
        let mut frame = analyzer.begin_frame(&vec![0.1; FFT_SIZE]);
        let mut ctx = FrameCtx { now: 66, rng: &mut rng };
        draw(EffectId::Waveform, &mut frame, &mut fx, &mut p, &mut ctx);

        let moved = fx
            .stars
            .iter()
            .zip(z_before.iter())
            .filter(|(s, &z0)| s.z != z0)
            .count();
        assert_eq!(moved, fx.stars.len());
    }

    #[test]
    fn average_of_bytes() {
        assert_eq!(avg(&[]), 0.0);
        assert_eq!(avg(&[10, 20, 30]), 20.0);
        assert_eq!(avg(&[128; 1024]), 128.0);
    }

    #[test]
    fn flat_frame_draws_nothing_bright_for_waveform() {
        // Silence keeps the waveform near the midline; the painter must
        // still end the frame black-free of NaN-driven spray.
        let mut analyzer = Analyzer::new();
        let mut rng = Rng::new(1);
        let mut fx = EffectStates::new(&mut rng);
        let mut p = Painter::new(32, 12);
        p.clear(BLACK);
        let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
        let mut ctx = FrameCtx { now: 0, rng: &mut rng };
        draw(EffectId::Waveform, &mut frame, &mut fx, &mut p, &mut ctx);
        // The midline row carries the trace.
        let mid = (p.h() / 2.0) as usize;
        let lit = (0..p.cols()).filter(|&x| p.pixel(x, mid) != BLACK).count();
        assert!(lit > 0);
    }
}
