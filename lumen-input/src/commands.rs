//! Command definitions for LUMEN

/// Manual effect navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Commands dispatched from input to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step the active effect by one, wrapping at the catalog edges
    StepEffect(Direction),
    /// Toggle the overlay (text/logo) layer
    ToggleOverlay,
    /// Leave the session
    Quit,
}
