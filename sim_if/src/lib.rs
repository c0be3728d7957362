//! # Simulation interfaces
//!
//! This crate defines the boundary between the navigation core and its
//! external collaborators: the render sink which realises motion commands,
//! the input source which provides directional key snapshots, the telemetry
//! sink which receives per-tick monitoring data, and the clock which paces
//! the control loop.
//!
//! The core never owns a canvas, window or real keyboard. It only issues
//! commands through these traits and reads back the resulting pose, which
//! keeps every control loop drivable from tests with fake collaborators.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod clock;
pub mod cmd;
pub mod input;
pub mod render;
pub mod telem;

// ------------------------------------------------------------------------------------------------
// REEXPORTS
// ------------------------------------------------------------------------------------------------

pub use clock::{Clock, PacedClock, SyntheticClock};
pub use cmd::NavCmd;
pub use input::{InputSource, ManualInput, NoInput, ScriptedInput};
pub use render::{HeadlessRender, RenderSink};
pub use telem::{NullTelemetry, TelemetrySink};
