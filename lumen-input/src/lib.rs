//! Keyboard input handling for LUMEN

mod commands;
mod keyboard;

pub use commands::{Command, Direction};
pub use keyboard::InputHandler;
