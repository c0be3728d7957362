//! # Navigation commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A motion command that can be applied to the agent through a render sink.
///
/// Commands are produced once per control cycle and consumed immediately by
/// the pose update, they are never stored.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavCmd {
    /// A coupled velocity command.
    ///
    /// The agent first rotates by `ang_deg` and then steps forwards by `lin`.
    /// Both components are per-tick quantities, already scaled by the cycle
    /// time where applicable.
    Velocity {
        /// Forward step of the manoeuvre in length-units.
        ///
        /// Positive steps are "forwards", negative steps are "backwards".
        lin: f64,

        /// Heading change of the manoeuvre in degrees.
        ///
        /// Positive angles rotate the agent counter-clockwise (to the left),
        /// negative angles clockwise.
        ang_deg: f64
    },

    /// An absolute heading plus forward step command.
    ///
    /// Used for unconstrained motion where the direction is recomputed from
    /// scratch each tick rather than adjusted incrementally.
    HeadingStep {
        /// Absolute heading to face in degrees, anticlockwise from the X+
        /// axis.
        heading_deg: f64,

        /// Forward step in length-units along the new heading.
        step: f64
    },

    /// Step forwards along the current heading without changing it.
    Forward {
        /// Forward step in length-units.
        dist: f64
    },

    /// Rotate on the spot without translating.
    Turn {
        /// Heading change in degrees, positive counter-clockwise.
        angle_deg: f64
    },

    /// Stop the agent, leaving the pose unchanged.
    Stop
}
