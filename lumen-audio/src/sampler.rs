//! Sliding analysis window over the capture ring

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use lumen_analysis::FFT_SIZE;

/// Drains the capture ring once per frame and maintains the most recent
/// analysis window. Owned by the render thread; never blocks.
pub struct Sampler {
    consumer: HeapCons<f32>,
    window: Vec<f32>,
    filled: usize,
}

impl Sampler {
    pub fn new(consumer: HeapCons<f32>) -> Self {
        Self {
            consumer,
            window: vec![0.0; FFT_SIZE],
            filled: 0,
        }
    }

    /// Pull the current sample window.
    ///
    /// Returns `None` until the first full window has been captured; the
    /// caller skips drawing for that frame.
    pub fn pull(&mut self) -> Option<&[f32]> {
        let mut chunk = [0.0f32; 512];
        loop {
            let n = self.consumer.pop_slice(&mut chunk);
            if n == 0 {
                break;
            }
            self.slide(&chunk[..n]);
        }

        if self.filled < self.window.len() {
            None
        } else {
            Some(&self.window)
        }
    }

    fn slide(&mut self, samples: &[f32]) {
        let len = self.window.len();
        if samples.len() >= len {
            self.window.copy_from_slice(&samples[samples.len() - len..]);
        } else {
            self.window.copy_within(samples.len().., 0);
            self.window[len - samples.len()..].copy_from_slice(samples);
        }
        self.filled = (self.filled + samples.len()).min(len);
    }
}
