//! # Manual input interface
//!
//! Directional input is read as a per-tick snapshot of the four arrow key
//! states rather than through event callbacks. The control loops poll the
//! snapshot once per cycle, so there is no callback re-entrancy and a test
//! can drive a loop with a scripted key sequence.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// The state of the four directional keys at the time of the poll.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of directional input snapshots.
pub trait InputSource {
    /// Poll the current key states.
    ///
    /// Implementations which have no input available shall return the default
    /// (all keys released) snapshot.
    fn snapshot(&mut self) -> ManualInput;
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

/// An input source with no keys attached, always reporting all keys released.
pub struct NoInput;

impl InputSource for NoInput {
    fn snapshot(&mut self) -> ManualInput {
        ManualInput::default()
    }
}

/// An input source replaying a fixed sequence of snapshots.
///
/// Once the sequence is exhausted all further polls return the default
/// snapshot.
pub struct ScriptedInput {
    snapshots: Vec<ManualInput>,
    index: usize
}

impl ScriptedInput {
    pub fn new(snapshots: Vec<ManualInput>) -> Self {
        Self { snapshots, index: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> ManualInput {
        match self.snapshots.get(self.index) {
            Some(s) => {
                self.index += 1;
                *s
            }
            None => ManualInput::default()
        }
    }
}

impl ManualInput {
    /// Build a snapshot from explicit key states, in up/down/left/right order.
    pub fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self { up, down, left, right }
    }
}
