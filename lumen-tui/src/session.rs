//! Per-frame session core
//!
//! Owns every piece of mutable visual state (scheduler, overlay, effect
//! arena, PRNG) and advances it one frame at a time. Driven entirely by
//! caller-supplied timestamps, so tests can step it with a synthetic
//! clock.

use std::panic::{catch_unwind, AssertUnwindSafe};

use lumen_analysis::SampleFrame;
use lumen_config::{Config, Logo};
use lumen_input::Command;
use tracing::error;

use crate::canvas::Painter;
use crate::color;
use crate::effects::{self, EffectStates, FrameCtx};
use crate::overlay::Overlay;
use crate::rng::Rng;
use crate::schedule::{EffectId, Scheduler};

/// Fade alpha applied each frame for the motion-trail persistence
const TRAIL_FADE: f32 = 0.2;

pub struct Session {
    scheduler: Scheduler,
    overlay: Overlay,
    fx: EffectStates,
    rng: Rng,
    frames: u64,
}

impl Session {
    pub fn new(config: &Config, logo: Option<Logo>, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let scheduler = Scheduler::new(config.effect_duration.as_millis(), 0, &mut rng);
        let fx = EffectStates::new(&mut rng);
        Self {
            scheduler,
            overlay: Overlay::new(config, logo),
            fx,
            rng,
            frames: 0,
        }
    }

    pub fn current_effect(&self) -> EffectId {
        self.scheduler.current()
    }

    /// Apply a user command; returns true when the session should end
    pub fn handle_command(&mut self, command: Command, now: u64) -> bool {
        match command {
            Command::StepEffect(direction) => {
                self.scheduler.step(direction, now);
                false
            }
            Command::ToggleOverlay => {
                self.overlay.toggle_visible(now);
                false
            }
            Command::Quit => true,
        }
    }

    /// Advance one frame: fade, select, draw, composite.
    ///
    /// The effect invocation is isolated; a panicking draw routine loses
    /// its frame but never tears down the loop.
    pub fn render_frame(&mut self, frame: &mut SampleFrame<'_>, p: &mut Painter, now: u64) {
        if self.frames == 0 {
            p.clear(color::BLACK);
        }
        p.fade(TRAIL_FADE);

        let id = self.scheduler.select(now, &mut self.rng);
        {
            let mut ctx = FrameCtx {
                now,
                rng: &mut self.rng,
            };
            let fx = &mut self.fx;
            let draw = AssertUnwindSafe(|| effects::draw(id, frame, fx, p, &mut ctx));
            if catch_unwind(draw).is_err() {
                error!(effect = id.name(), "effect draw panicked, frame skipped");
            }
        }

        self.overlay
            .compose(frame, p, id.name(), now, &mut self.rng);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_analysis::{Analyzer, FFT_SIZE};
    use lumen_input::Direction;

    const FRAME_MS: u64 = 33;

    fn fixed_dwell_config(seconds: f64) -> Config {
        let mut config = Config::default();
        config.effect_duration.min = seconds;
        config.effect_duration.max = seconds;
        config
    }

    /// Drive `frames` silent frames starting at `start`, returning the
    /// number of automatic effect switches observed.
    fn run_silent(session: &mut Session, start: u64, frames: u64) -> usize {
        let mut analyzer = Analyzer::new();
        let samples = vec![0.0f32; FFT_SIZE];
        let mut p = Painter::new(40, 12);
        let mut switches = 0;
        let mut current = session.current_effect();
        for i in 0..frames {
            let mut frame = analyzer.begin_frame(&samples);
            session.render_frame(&mut frame, &mut p, start + i * FRAME_MS);
            if session.current_effect() != current {
                switches += 1;
                current = session.current_effect();
            }
        }
        switches
    }

    #[test]
    fn silent_frames_below_dwell_never_switch() {
        let mut session = Session::new(&fixed_dwell_config(2.0), None, 11);
        // 60 frames x 33ms = 1980ms, still inside the 2000ms dwell
        assert_eq!(run_silent(&mut session, 0, 60), 0);
    }

    #[test]
    fn crossing_the_dwell_switches_exactly_once() {
        let mut session = Session::new(&fixed_dwell_config(2.0), None, 11);
        assert_eq!(run_silent(&mut session, 0, 60), 0);
        // Continue just past the deadline: one switch, no more
        assert_eq!(run_silent(&mut session, 60 * FRAME_MS, 5), 1);
    }

    #[test]
    fn long_run_keeps_rotating() {
        let mut session = Session::new(&fixed_dwell_config(1.0), None, 5);
        // Ten simulated seconds at 30fps crosses the dwell repeatedly
        let switches = run_silent(&mut session, 0, 300);
        assert!(switches >= 8, "saw only {switches} switches");
    }

    #[test]
    fn manual_navigation_and_quit() {
        let mut session = Session::new(&Config::default(), None, 3);
        let home = session.current_effect();

        assert!(!session.handle_command(Command::StepEffect(Direction::Next), 10));
        assert_ne!(session.current_effect(), home);
        assert!(!session.handle_command(Command::StepEffect(Direction::Prev), 20));
        assert_eq!(session.current_effect(), home);

        assert!(!session.handle_command(Command::ToggleOverlay, 30));
        assert!(session.handle_command(Command::Quit, 40));
    }

    #[test]
    fn every_catalog_entry_renders_via_manual_navigation() {
        let mut session = Session::new(&Config::default(), None, 99);
        let mut analyzer = Analyzer::new();
        let samples: Vec<f32> = (0..FFT_SIZE).map(|i| (i as f32 * 0.1).sin() * 0.5).collect();
        let mut p = Painter::new(32, 10);

        for i in 0..EffectId::ALL.len() as u64 {
            let mut frame = analyzer.begin_frame(&samples);
            session.render_frame(&mut frame, &mut p, i * FRAME_MS);
            session.handle_command(Command::StepEffect(Direction::Next), i * FRAME_MS);
        }
    }

    #[test]
    fn first_frame_starts_from_an_opaque_clear() {
        let mut session = Session::new(&Config::default(), None, 1);
        // Park on the spiral, which hugs the center and leaves corners alone
        while session.current_effect() != EffectId::Spiral {
            session.handle_command(Command::StepEffect(Direction::Next), 0);
        }

        let mut analyzer = Analyzer::new();
        let mut p = Painter::new(16, 8);
        // Pre-dirty the canvas; the first frame must wipe it
        p.fill_rect(0.0, 0.0, 16.0, 16.0, color::WHITE, 1.0);
        let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
        session.render_frame(&mut frame, &mut p, 0);
        assert_eq!(p.pixel(0, 0), color::BLACK);
    }
}
