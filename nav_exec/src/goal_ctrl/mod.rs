//! # Goal control module
//!
//! Goal control drives the agent toward a fixed goal pose using a coupled
//! distance/heading law. The distance error sets the forward speed, which is
//! attenuated as the heading error grows, modelling the fact that a
//! differential-drive agent must slow down while it is turning. The heading
//! error sets the turn rate, with a secondary term that strengthens the
//! correction when the forward speed is low.
//!
//! This is a closed-form law, not an instance of the slew-limited PID in
//! `crate::pid`: there is no acceleration smoothing here, the attenuation
//! structure is what keeps the motion well behaved. Integral and derivative
//! accumulators of the distance error are tracked for tuning but are inert
//! unless explicitly wired in through the `trim_enabled` parameter.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use state::*;

use util::params as util_params;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during GoalCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum GoalCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util_params::LoadError),

    /// Attempted to control toward a goal when no goal has been set.
    #[error("No goal has been set")]
    NoGoal
}
