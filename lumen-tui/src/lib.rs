//! Terminal rendering for LUMEN
//!
//! A pseudo-pixel canvas over terminal cells (two pixels per cell via
//! half blocks), the effect catalog drawn onto it, the effect scheduler,
//! and the overlay compositor. The per-frame core is `Session`, which is
//! driven by timestamps so it can be stepped deterministically.

mod canvas;
mod color;
pub mod effects;
mod overlay;
mod rng;
mod schedule;
mod session;

pub use canvas::{CanvasWidget, Painter, TextCell};
pub use color::{hsl, Rgb};
pub use overlay::Overlay;
pub use rng::Rng;
pub use schedule::{EffectId, Scheduler};
pub use session::Session;
