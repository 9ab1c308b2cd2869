//! Overlay compositor
//!
//! Draws the bouncing, glitching display text or logo above the active
//! effect, plus the effect-name label. All fields are exponentially
//! smoothed or deadline-driven and mutated only here, once per frame.

use std::f32::consts::FRAC_PI_4;

use lumen_analysis::SampleFrame;
use lumen_config::{Config, GlitchParams, Logo, VisibilityInterval};

use crate::canvas::Painter;
use crate::color::{hsl, WHITE};
use crate::rng::Rng;

pub struct Overlay {
    // Configuration, fixed after construction
    display_text: String,
    show_text: bool,
    show_effect_name: bool,
    text_glitch: GlitchParams,
    logo_glitch: GlitchParams,
    visibility: VisibilityInterval,
    logo: Option<Logo>,
    logo_scale: f32,

    // Master visibility toggle for the whole layer
    visible: bool,

    // Smoothed / deadline-driven state
    base_y: f32,
    opacity: f32,
    opacity_target: f32,
    next_opacity_toggle: u64,
    scale: f32,
    tilt: f32,
    glitch: (f32, f32),
    last_glitch: u64,
    logo_last_toggle: u64,
    last_low_freq: Option<f32>,
}

impl Overlay {
    pub fn new(config: &Config, logo: Option<Logo>) -> Self {
        Self {
            display_text: config.display_text.clone(),
            show_text: config.show_text,
            show_effect_name: config.show_effect_name,
            text_glitch: config.glitch_effects.text,
            logo_glitch: config.glitch_effects.logo,
            visibility: config.logo.visibility_interval,
            logo,
            logo_scale: config.logo.scale,
            visible: true,
            base_y: 0.0,
            opacity: 1.0,
            opacity_target: 1.0,
            next_opacity_toggle: 3000,
            scale: 1.0,
            tilt: 0.0,
            glitch: (0.0, 0.0),
            last_glitch: 0,
            logo_last_toggle: 0,
            last_low_freq: None,
        }
    }

    /// Toggle the whole layer; re-enabling forces the logo visible by
    /// resetting its window phase
    pub fn toggle_visible(&mut self, now: u64) {
        self.visible = !self.visible;
        if self.visible {
            self.logo_last_toggle = now;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Run the per-frame state machine and draw, after the active effect
    pub fn compose(
        &mut self,
        frame: &mut SampleFrame<'_>,
        p: &mut Painter,
        effect_name: &str,
        now: u64,
        rng: &mut Rng,
    ) {
        if !self.visible {
            return;
        }

        let mean = frame.mean_amplitude();
        self.update_motion(mean, p.h() / 2.0, now, rng);

        if self.logo.is_some() {
            self.compose_logo(frame, p, now);
        } else if self.show_text {
            self.compose_text(p, now);
        }

        // The label sits outside the bounce/tilt system, fixed bottom-right
        if self.show_effect_name {
            let col = p.cols() as i32 - effect_name.chars().count() as i32 - 2;
            let row = p.rows() as i32 - 2;
            p.text(col, row, effect_name, WHITE, 0.8 * self.opacity);
        }
    }

    fn update_motion(&mut self, mean: f32, center_y: f32, now: u64, rng: &mut Rng) {
        // Bounce, smoothed so transients never jump the text
        let target_y = center_y + (mean - 128.0) * 0.5;
        self.base_y = self.base_y * 0.8 + target_y * 0.2;

        // Opacity flips between 0 and 1 on a re-rolled deadline and the
        // live value eases toward the flip
        if now >= self.next_opacity_toggle {
            self.opacity_target = if self.opacity_target >= 0.5 { 0.0 } else { 1.0 };
            self.next_opacity_toggle = now + rng.range_u64(2000, 4000);
        }
        self.opacity = (self.opacity * 0.95 + self.opacity_target * 0.05).clamp(0.0, 1.0);

        // Cubic beat emphasis keeps ambient level from pumping the scale
        let beat = (mean / 128.0).powi(3);
        self.scale = (self.scale * 0.8 + (1.0 + beat * 1.5) * 0.2).max(1.0);

        let tilt_target = (mean - 128.0) / 128.0 * FRAC_PI_4;
        self.tilt = (self.tilt * 0.7 + tilt_target * 0.3).clamp(-FRAC_PI_4, FRAC_PI_4);

        // Glitch offset holds between re-rolls; the stutter is the point
        if now.saturating_sub(self.last_glitch) > self.text_glitch.frequency {
            let reach = 5.0 * (mean / 128.0) * self.text_glitch.intensity
                * self.text_glitch.offset_multiplier;
            self.glitch = (rng.signed() * reach, rng.signed() * reach);
            self.last_glitch = now;
        }
    }

    fn update_trigger(&mut self, low: f32, now: u64) {
        let delta = low - self.last_low_freq.unwrap_or(low);
        self.last_low_freq = Some(low);

        let trigger = self.visibility.low_frequency_trigger;
        if trigger.enabled && trigger_fires(delta, trigger.threshold, trigger.sensitivity) {
            // Force immediate visibility: restart the window phase
            self.logo_last_toggle = now;
        }
    }

    fn compose_logo(&mut self, frame: &mut SampleFrame<'_>, p: &mut Painter, now: u64) {
        let low = frame.low_band_average();
        self.update_trigger(low, now);

        let shown = !self.visibility.enabled
            || window_visible(
                now,
                self.logo_last_toggle,
                self.visibility.duration,
                self.visibility.hide_interval,
            );
        if !shown {
            return;
        }
        let Some(logo) = self.logo.as_ref() else {
            return;
        };

        let viewport_scale = p.min_dim() * 0.001;
        let w = logo.width as f32 * self.logo_scale * viewport_scale * self.scale;
        let h = logo.height as f32 * self.logo_scale * viewport_scale * self.scale;
        let base_x = p.w() / 2.0 - w / 2.0;
        let base_y = self.base_y - h / 2.0;

        let im = self.logo_glitch.intensity * self.logo_glitch.offset_multiplier;
        let (gx, gy) = self.glitch;
        let alpha = 0.9 * self.opacity;

        // Three chromatically separated passes simulate channel glitch
        p.blit_channel(logo, base_x + gx * im, base_y + gy * im, w, h, (true, false, false), alpha);
        p.blit_channel(
            logo,
            base_x - gx * im * 0.5,
            base_y - gy * im * 0.5,
            w,
            h,
            (false, true, false),
            alpha,
        );
        p.blit_channel(
            logo,
            base_x + gx * im * 0.75,
            base_y - gy * im * 0.75,
            w,
            h,
            (false, false, true),
            alpha,
        );
    }

    fn compose_text(&mut self, p: &mut Painter, now: u64) {
        let chars: Vec<char> = self.display_text.chars().collect();
        if chars.is_empty() {
            return;
        }

        // Scale maps to letter spacing, tilt to a per-column shear
        let spacing = self.scale.round().max(1.0) as i32;
        let center_col = p.cols() as i32 / 2;
        let center_row = (self.base_y / 2.0).round() as i32;
        let shear = self.tilt.tan();

        let base_hue = now as f32 * 0.05;
        let alpha = 0.9 * self.opacity;
        let (gx, gy) = self.glitch;

        // Hue-offset passes at fractions of the glitch vector
        let passes = [(0.4, 0.4, 0.0), (-0.2, -0.2, 120.0), (0.2, -0.4, 240.0)];
        for (fx, fy, hue_shift) in passes {
            let off_col = (gx * fx).round() as i32;
            let off_row = (gy * fy / 2.0).round() as i32;
            let color = hsl(base_hue + hue_shift, 100.0, 50.0);

            for (k, &ch) in chars.iter().enumerate() {
                let dx = (k as i32 - chars.len() as i32 / 2) * spacing;
                let drop = (dx as f32 * shear / 2.0).round() as i32;
                p.glyph(center_col + dx + off_col, center_row + drop + off_row, ch, color, alpha);
            }
        }
    }

    #[cfg(test)]
    fn snapshot(&self) -> (f32, f32, f32) {
        (self.opacity, self.scale, self.tilt)
    }
}

/// Cyclic visibility window: visible for `duration`, hidden for `hide`,
/// phase anchored at `last_toggle`
fn window_visible(now: u64, last_toggle: u64, duration: u64, hide: u64) -> bool {
    let cycle = duration + hide;
    if cycle == 0 {
        return true;
    }
    now.saturating_sub(last_toggle) % cycle < duration
}

/// A low-band transient forces the logo when the delta clears the
/// configured threshold scaled by sensitivity
fn trigger_fires(delta: f32, threshold: f32, sensitivity: f32) -> bool {
    delta > threshold * sensitivity
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_analysis::{Analyzer, FFT_SIZE};

    fn compose_frames(overlay: &mut Overlay, level: f32, frames: usize) {
        let mut analyzer = Analyzer::new();
        let samples = vec![level; FFT_SIZE];
        let mut p = Painter::new(40, 12);
        let mut rng = Rng::new(42);
        for i in 0..frames {
            let mut frame = analyzer.begin_frame(&samples);
            overlay.compose(&mut frame, &mut p, "WAVEFORM", i as u64 * 33, &mut rng);
        }
    }

    #[test]
    fn motion_values_stay_bounded_for_any_amplitude() {
        for level in [-1.0f32, -0.5, 0.0, 0.5, 1.0] {
            let mut overlay = Overlay::new(&Config::default(), None);
            compose_frames(&mut overlay, level, 400);
            let (opacity, scale, tilt) = overlay.snapshot();
            assert!(opacity.is_finite() && (0.0..=1.0).contains(&opacity));
            assert!(scale.is_finite() && scale >= 1.0);
            assert!(tilt.is_finite() && (-FRAC_PI_4..=FRAC_PI_4).contains(&tilt));
        }
    }

    #[test]
    fn visibility_window_cycles() {
        // duration=8000, hide=12000, phase at 0: one full cycle is 20s
        assert!(window_visible(5000, 0, 8000, 12_000));
        assert!(!window_visible(9000, 0, 8000, 12_000));
        assert!(window_visible(20_000, 0, 8000, 12_000));
        assert!(!window_visible(8000, 0, 8000, 12_000));
        assert!(window_visible(0, 0, 8000, 12_000));
        // Degenerate zero-length cycle never hides
        assert!(window_visible(123, 0, 0, 0));
    }

    #[test]
    fn low_frequency_trigger_threshold() {
        assert!(trigger_fires(130.0, 180.0, 0.7));
        assert!(!trigger_fires(100.0, 180.0, 0.7));
    }

    #[test]
    fn trigger_resets_window_phase() {
        let mut config = Config::default();
        config.logo.enabled = true;
        config.logo.visibility_interval.enabled = true;
        config.logo.visibility_interval.low_frequency_trigger.enabled = true;
        let logo = Logo::from_rgba(1, 1, vec![[255, 255, 255, 255]]);
        let mut overlay = Overlay::new(&config, Some(logo));

        // Settle the running average, then spike it past 180 * 0.7
        overlay.update_trigger(10.0, 8500);
        assert_eq!(overlay.logo_last_toggle, 0);
        overlay.update_trigger(10.0 + 130.0, 9000);
        assert_eq!(overlay.logo_last_toggle, 9000);
        assert!(window_visible(9000, overlay.logo_last_toggle, 8000, 12_000));

        // A sub-threshold drift leaves the phase alone
        overlay.update_trigger(overlay.last_low_freq.unwrap() + 100.0, 9500);
        assert_eq!(overlay.logo_last_toggle, 9000);
    }

    #[test]
    fn defaults_operate_without_config_document() {
        // Degraded-start: the compositor runs on built-in defaults
        let mut overlay = Overlay::new(&Config::default(), None);
        compose_frames(&mut overlay, 0.8, 120);
        let (opacity, scale, tilt) = overlay.snapshot();
        assert!(opacity.is_finite() && scale.is_finite() && tilt.is_finite());
    }

    #[test]
    fn text_passes_land_on_the_glyph_layer() {
        let mut overlay = Overlay::new(&Config::default(), None);
        let mut analyzer = Analyzer::new();
        let mut p = Painter::new(40, 12);
        let mut rng = Rng::new(7);
        // A couple of frames so base_y eases toward center
        for i in 0..30 {
            let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
            overlay.compose(&mut frame, &mut p, "SPIRAL", i * 33, &mut rng);
        }
        let glyphs = (0..p.rows())
            .flat_map(|r| (0..p.cols()).map(move |c| (c, r)))
            .filter(|&(c, r)| p.text_cell(c, r).is_some())
            .count();
        assert!(glyphs >= "LUMEN".len());
    }

    #[test]
    fn hidden_overlay_draws_nothing() {
        let mut overlay = Overlay::new(&Config::default(), None);
        overlay.toggle_visible(0);
        assert!(!overlay.is_visible());

        let mut analyzer = Analyzer::new();
        let mut p = Painter::new(40, 12);
        let mut rng = Rng::new(7);
        let mut frame = analyzer.begin_frame(&vec![0.5; FFT_SIZE]);
        overlay.compose(&mut frame, &mut p, "SPIRAL", 100, &mut rng);

        let glyphs = (0..p.rows())
            .flat_map(|r| (0..p.cols()).map(move |c| (c, r)))
            .filter(|&(c, r)| p.text_cell(c, r).is_some())
            .count();
        assert_eq!(glyphs, 0);
    }

    #[test]
    fn reenabling_forces_logo_phase_reset() {
        let mut overlay = Overlay::new(&Config::default(), None);
        overlay.toggle_visible(1000);
        overlay.toggle_visible(42_000);
        assert!(overlay.is_visible());
        assert_eq!(overlay.logo_last_toggle, 42_000);
    }

    #[test]
    fn logo_suppresses_text() {
        let mut config = Config::default();
        config.show_text = true;
        config.logo.enabled = true;
        let logo = Logo::from_rgba(2, 2, vec![[255, 0, 0, 255]; 4]);
        let mut overlay = Overlay::new(&config, Some(logo));

        let mut analyzer = Analyzer::new();
        let mut p = Painter::new(40, 12);
        let mut rng = Rng::new(9);
        for i in 0..30 {
            let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
            overlay.compose(&mut frame, &mut p, "SPIRAL", i * 33, &mut rng);
        }

        let glyphs = (0..p.rows())
            .flat_map(|r| (0..p.cols()).map(move |c| (c, r)))
            .filter(|&(c, r)| p.text_cell(c, r).is_some())
            .count();
        assert_eq!(glyphs, 0, "display text must yield to the logo");
    }

    #[test]
    fn effect_label_is_gated_by_config() {
        let mut config = Config::default();
        config.show_effect_name = true;
        config.show_text = false;
        let mut overlay = Overlay::new(&config, None);

        let mut analyzer = Analyzer::new();
        let mut p = Painter::new(40, 12);
        let mut rng = Rng::new(9);
        let mut frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
        overlay.compose(&mut frame, &mut p, "PONDS", 0, &mut rng);

        let row = p.rows() - 2;
        let found: String = (0..p.cols())
            .filter_map(|c| p.text_cell(c, row).map(|t| t.ch))
            .collect();
        assert!(found.contains("PONDS"));
    }
}
