//! Effect rotation state machine
//!
//! Owns the active effect, the last switch time, and the randomized
//! dwell duration. One decision per frame; manual navigation resets the
//! dwell measurement without re-rolling it.

use crate::rng::Rng;
use lumen_input::Direction;

/// The closed effect catalog, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectId {
    Waveform,
    Equalizer,
    Spiral,
    Circular,
    Ponds,
    Lightspeed,
    DnaHelix,
    TriangleTunnel,
    MatrixRain,
    Geometric,
    Hypercube,
    CubeArray,
    WaveGrid,
    Constellation,
    Polyhedron,
    FractalTree,
    FloatingShapes,
    Starfield,
    GeometricWeb,
    Ribbons,
    SmoothEqualizer,
    NebulaFlow,
    WaveTunnel,
    FreqFlower,
    FreqWeb,
    CrystalPulse,
}

impl EffectId {
    pub const ALL: [EffectId; 26] = [
        EffectId::Waveform,
        EffectId::Equalizer,
        EffectId::Spiral,
        EffectId::Circular,
        EffectId::Ponds,
        EffectId::Lightspeed,
        EffectId::DnaHelix,
        EffectId::TriangleTunnel,
        EffectId::MatrixRain,
        EffectId::Geometric,
        EffectId::Hypercube,
        EffectId::CubeArray,
        EffectId::WaveGrid,
        EffectId::Constellation,
        EffectId::Polyhedron,
        EffectId::FractalTree,
        EffectId::FloatingShapes,
        EffectId::Starfield,
        EffectId::GeometricWeb,
        EffectId::Ribbons,
        EffectId::SmoothEqualizer,
        EffectId::NebulaFlow,
        EffectId::WaveTunnel,
        EffectId::FreqFlower,
        EffectId::FreqWeb,
        EffectId::CrystalPulse,
    ];

    /// Display name for the effect label
    pub fn name(self) -> &'static str {
        match self {
            EffectId::Waveform => "WAVEFORM",
            EffectId::Equalizer => "EQUALIZER",
            EffectId::Spiral => "SPIRAL",
            EffectId::Circular => "CIRCULAR",
            EffectId::Ponds => "PONDS",
            EffectId::Lightspeed => "LIGHTSPEED",
            EffectId::DnaHelix => "DNA HELIX",
            EffectId::TriangleTunnel => "TRIANGLE TUNNEL",
            EffectId::MatrixRain => "MATRIX RAIN",
            EffectId::Geometric => "GEOMETRIC",
            EffectId::Hypercube => "HYPERCUBE",
            EffectId::CubeArray => "CUBE ARRAY",
            EffectId::WaveGrid => "WAVE GRID",
            EffectId::Constellation => "CONSTELLATION",
            EffectId::Polyhedron => "POLYHEDRON",
            EffectId::FractalTree => "FRACTAL TREE",
            EffectId::FloatingShapes => "FLOATING SHAPES",
            EffectId::Starfield => "STARFIELD",
            EffectId::GeometricWeb => "GEOMETRIC WEB",
            EffectId::Ribbons => "RIBBONS",
            EffectId::SmoothEqualizer => "SMOOTH EQUALIZER",
            EffectId::NebulaFlow => "NEBULA FLOW",
            EffectId::WaveTunnel => "WAVE TUNNEL",
            EffectId::FreqFlower => "FREQ FLOWER",
            EffectId::FreqWeb => "FREQ WEB",
            EffectId::CrystalPulse => "CRYSTAL PULSE",
        }
    }
}

/// Per-frame effect selection
pub struct Scheduler {
    current: usize,
    catalog: usize,
    last_switch: u64,
    dwell: u64,
    dwell_range: (u64, u64),
}

impl Scheduler {
    /// Start at a random catalog entry with a fresh dwell roll
    pub fn new(dwell_range: (u64, u64), now: u64, rng: &mut Rng) -> Self {
        Self::with_catalog(EffectId::ALL.len(), dwell_range, now, rng)
    }

    fn with_catalog(catalog: usize, dwell_range: (u64, u64), now: u64, rng: &mut Rng) -> Self {
        let mut scheduler = Self {
            current: rng.below(catalog),
            catalog,
            last_switch: now,
            dwell: 0,
            dwell_range,
        };
        scheduler.roll_dwell(rng);
        scheduler
    }

    pub fn current(&self) -> EffectId {
        EffectId::ALL[self.current]
    }

    /// Decide the active effect for this frame.
    ///
    /// Past the dwell deadline a new effect is drawn uniformly from the
    /// catalog excluding the current one; a single-entry catalog keeps
    /// its only member.
    pub fn select(&mut self, now: u64, rng: &mut Rng) -> EffectId {
        if now.saturating_sub(self.last_switch) > self.dwell {
            if self.catalog > 1 {
                let pick = rng.below(self.catalog - 1);
                self.current = if pick >= self.current { pick + 1 } else { pick };
            }
            self.last_switch = now;
            self.roll_dwell(rng);
        }
        self.current()
    }

    /// Manual navigation: wraps, restarts the dwell measurement, keeps
    /// the rolled dwell duration.
    pub fn step(&mut self, direction: Direction, now: u64) {
        self.current = match direction {
            Direction::Next => (self.current + 1) % self.catalog,
            Direction::Prev => (self.current + self.catalog - 1) % self.catalog,
        };
        self.last_switch = now;
    }

    fn roll_dwell(&mut self, rng: &mut Rng) {
        let (min, max) = self.dwell_range;
        self.dwell = rng.range_u64(min, max);
    }

    #[cfg(test)]
    fn dwell(&self) -> u64 {
        self.dwell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: (u64, u64) = (20_000, 35_000);

    #[test]
    fn dwell_stays_in_configured_range() {
        let mut rng = Rng::new(99);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let mut now = 0;
        for _ in 0..200 {
            now += 40_000;
            scheduler.select(now, &mut rng);
            assert!(scheduler.dwell() >= RANGE.0 && scheduler.dwell() <= RANGE.1);
        }
    }

    #[test]
    fn no_switch_before_deadline() {
        let mut rng = Rng::new(5);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let start = scheduler.current();
        for now in (0..RANGE.0).step_by(33) {
            assert_eq!(scheduler.select(now, &mut rng), start);
        }
    }

    #[test]
    fn never_reselects_current_effect() {
        let mut rng = Rng::new(11);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let mut now = 0;
        for _ in 0..500 {
            let before = scheduler.current();
            now += 40_000;
            let after = scheduler.select(now, &mut rng);
            assert_ne!(before, after);
        }
    }

    #[test]
    fn single_entry_catalog_keeps_its_member() {
        let mut rng = Rng::new(3);
        let mut scheduler = Scheduler::with_catalog(1, RANGE, 0, &mut rng);
        let only = scheduler.current();
        for round in 1..10u64 {
            assert_eq!(scheduler.select(round * 40_000, &mut rng), only);
        }
    }

    #[test]
    fn stepping_right_full_cycle_returns_home() {
        let mut rng = Rng::new(8);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let home = scheduler.current();
        for _ in 0..EffectId::ALL.len() {
            scheduler.step(Direction::Next, 10);
        }
        assert_eq!(scheduler.current(), home);
    }

    #[test]
    fn step_left_then_right_is_identity() {
        let mut rng = Rng::new(8);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let home = scheduler.current();
        scheduler.step(Direction::Prev, 10);
        scheduler.step(Direction::Next, 20);
        assert_eq!(scheduler.current(), home);
        scheduler.step(Direction::Next, 30);
        scheduler.step(Direction::Prev, 40);
        assert_eq!(scheduler.current(), home);
    }

    #[test]
    fn manual_step_restarts_dwell_measurement() {
        let mut rng = Rng::new(21);
        let mut scheduler = Scheduler::new((1000, 1000), 0, &mut rng);
        // Just before the deadline, step manually.
        scheduler.select(900, &mut rng);
        scheduler.step(Direction::Next, 900);
        let manual = scheduler.current();
        // The old deadline passing no longer triggers a switch.
        assert_eq!(scheduler.select(1500, &mut rng), manual);
        // The next automatic switch measures from the manual moment.
        assert_ne!(scheduler.select(1901, &mut rng), manual);
    }

    #[test]
    fn manual_step_keeps_rolled_dwell() {
        let mut rng = Rng::new(4);
        let mut scheduler = Scheduler::new(RANGE, 0, &mut rng);
        let dwell = scheduler.dwell();
        scheduler.step(Direction::Next, 5000);
        assert_eq!(scheduler.dwell(), dwell);
    }

    #[test]
    fn catalog_has_26_named_effects() {
        assert_eq!(EffectId::ALL.len(), 26);
        for id in EffectId::ALL {
            assert!(!id.name().is_empty());
        }
    }
}
