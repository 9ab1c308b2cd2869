//! FFT-based frame analyzer for real-time visualization

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Analysis window size in samples
pub const FFT_SIZE: usize = 2048;
/// Number of frequency bins (and time-domain bytes) exposed per frame
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// Exponential smoothing applied to bin magnitudes between frames
const SMOOTHING: f32 = 0.8;
/// Magnitude-to-byte mapping range in decibels
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Real-time analyzer producing byte-domain views of a capture window.
///
/// All buffers are pre-allocated; `begin_frame` does no allocation.
pub struct Analyzer {
    fft: Arc<dyn rustfft::Fft<f32>>,
    window_fn: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    samples: Vec<f32>,
    time_bytes: Vec<u8>,
    freq_bytes: Vec<u8>,
    freq_valid: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Pre-compute Hann window
        let window_fn: Vec<f32> = (0..FFT_SIZE)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / FFT_SIZE as f32).cos()))
            .collect();

        Self {
            fft,
            window_fn,
            fft_buffer: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            smoothed: vec![0.0; BIN_COUNT],
            samples: vec![0.0; FFT_SIZE],
            time_bytes: vec![128; BIN_COUNT],
            freq_bytes: vec![0; BIN_COUNT],
            freq_valid: false,
        }
    }

    /// Start a new frame from a mono capture window.
    ///
    /// Copies the most recent `FFT_SIZE` samples (zero-padding a short
    /// window at the front) and invalidates the cached frequency view.
    pub fn begin_frame(&mut self, samples: &[f32]) -> SampleFrame<'_> {
        let take = samples.len().min(FFT_SIZE);
        let pad = FFT_SIZE - take;
        self.samples[..pad].fill(0.0);
        self.samples[pad..].copy_from_slice(&samples[samples.len() - take..]);

        // Time-domain bytes: amplitude [-1, 1] mapped to [0, 255], midpoint 128.
        // The last BIN_COUNT samples are the most recent view.
        for (byte, &s) in self
            .time_bytes
            .iter_mut()
            .zip(self.samples[FFT_SIZE - BIN_COUNT..].iter())
        {
            *byte = ((s.clamp(-1.0, 1.0) + 1.0) * 127.5).round() as u8;
        }

        self.freq_valid = false;
        SampleFrame { analyzer: self }
    }

    /// Compute the frequency-domain byte view for the current window.
    fn compute_frequency(&mut self) {
        for (buf, (&s, &w)) in self
            .fft_buffer
            .iter_mut()
            .zip(self.samples.iter().zip(self.window_fn.iter()))
        {
            *buf = Complex::new(s * w, 0.0);
        }

        self.fft.process(&mut self.fft_buffer);

        for (i, byte) in self.freq_bytes.iter_mut().enumerate() {
            let magnitude = self.fft_buffer[i].norm() / FFT_SIZE as f32;

            // Smooth across frames, then map to the byte range in dB.
            let sm = &mut self.smoothed[i];
            *sm = *sm * SMOOTHING + magnitude * (1.0 - SMOOTHING);

            let db = 20.0 * sm.max(1e-10).log10();
            let t = (db - MIN_DB) / (MAX_DB - MIN_DB);
            *byte = (t.clamp(0.0, 1.0) * 255.0) as u8;
        }

        self.freq_valid = true;
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// One frame's worth of sample data.
///
/// Borrows the analyzer so the frequency view can be derived lazily and
/// cached for the rest of the frame. Created fresh each frame, never
/// retained.
pub struct SampleFrame<'a> {
    analyzer: &'a mut Analyzer,
}

impl SampleFrame<'_> {
    /// Number of entries in both byte views
    pub fn len(&self) -> usize {
        BIN_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Raw waveform bytes, amplitude centered at 128
    pub fn time_domain(&self) -> &[u8] {
        &self.analyzer.time_bytes
    }

    /// Per-bin magnitude bytes (0-255), computed on first request
    pub fn frequency_domain(&mut self) -> &[u8] {
        if !self.analyzer.freq_valid {
            self.analyzer.compute_frequency();
        }
        &self.analyzer.freq_bytes
    }

    /// Mean of the time-domain bytes (silence sits at 128)
    pub fn mean_amplitude(&self) -> f32 {
        let sum: u32 = self.analyzer.time_bytes.iter().map(|&b| b as u32).sum();
        sum as f32 / BIN_COUNT as f32
    }

    /// Mean magnitude of the lowest quarter of the frequency bins
    pub fn low_band_average(&mut self) -> f32 {
        let quarter = BIN_COUNT / 4;
        let bins = &self.frequency_domain()[..quarter];
        let sum: u32 = bins.iter().map(|&b| b as u32).sum();
        sum as f32 / quarter as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_maps_to_midpoint() {
        let mut analyzer = Analyzer::new();
        let frame = analyzer.begin_frame(&vec![0.0; FFT_SIZE]);
        assert!(frame.time_domain().iter().all(|&b| b == 128));
        assert_eq!(frame.mean_amplitude(), 128.0);
    }

    #[test]
    fn time_domain_clamps_extremes() {
        let mut analyzer = Analyzer::new();
        let mut samples = vec![0.0f32; FFT_SIZE];
        samples[FFT_SIZE - 1] = 2.0;
        samples[FFT_SIZE - 2] = -2.0;
        let frame = analyzer.begin_frame(&samples);
        let bytes = frame.time_domain();
        assert_eq!(bytes[BIN_COUNT - 1], 255);
        assert_eq!(bytes[BIN_COUNT - 2], 0);
    }

    #[test]
    fn short_window_is_zero_padded() {
        let mut analyzer = Analyzer::new();
        let frame = analyzer.begin_frame(&[0.5; 4]);
        let bytes = frame.time_domain();
        // Padding shows up as silence ahead of the short tail.
        assert_eq!(bytes[0], 128);
        assert_eq!(bytes[BIN_COUNT - 1], 191);
    }

    #[test]
    fn frequency_view_is_cached_per_frame() {
        let mut analyzer = Analyzer::new();
        let samples: Vec<f32> = (0..FFT_SIZE)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / 48_000.0).sin())
            .collect();
        let mut frame = analyzer.begin_frame(&samples);
        let first = frame.frequency_domain().to_vec();
        let second = frame.frequency_domain().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), BIN_COUNT);
    }

    #[test]
    fn loud_tone_raises_its_band() {
        let mut analyzer = Analyzer::new();
        // Drive a few frames so smoothing settles.
        let samples: Vec<f32> = (0..FFT_SIZE)
            .map(|i| 0.8 * (2.0 * PI * 100.0 * i as f32 / FFT_SIZE as f32).sin())
            .collect();
        for _ in 0..8 {
            let mut frame = analyzer.begin_frame(&samples);
            frame.frequency_domain();
        }
        let mut frame = analyzer.begin_frame(&samples);
        let low = frame.low_band_average();
        assert!(low > 0.0);
        let bins = frame.frequency_domain();
        // Bin 100 carries the tone; the top of the spectrum does not.
        assert!(bins[100] > bins[BIN_COUNT - 1]);
    }
}
