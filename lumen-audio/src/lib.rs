//! Live audio capture for LUMEN
//!
//! Opens the default input device and feeds a lock-free ring buffer from
//! the cpal callback. The render thread drains the ring once per frame
//! through a `Sampler`, which maintains the sliding analysis window.

mod capture;
mod sampler;

pub use capture::{CaptureEngine, CaptureError, CaptureEvent};
pub use sampler::Sampler;
