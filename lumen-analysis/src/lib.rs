//! Audio analysis module for LUMEN
//!
//! Turns raw capture windows into the byte-domain buffers the effects
//! consume: a time-domain amplitude view (centered at 128) and an
//! on-demand frequency-domain magnitude view (0-255 per bin).

mod analyzer;

pub use analyzer::{Analyzer, SampleFrame, BIN_COUNT, FFT_SIZE};
