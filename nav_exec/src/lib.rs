//! # Navigation library.
//!
//! This library contains the control modules driven by the `nav_exec`
//! binary, and allows them to be exercised directly from tests.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Localisation types - the agent pose and the goal specification
pub mod loc;

/// Slew-rate-limited PID controller - the single-axis control law used by the
/// path executor
pub mod pid;

/// Goal control module - coupled distance/heading control toward a goal pose
pub mod goal_ctrl;

/// Grid path executor module - drives a scripted sequence of move/turn
/// segments
pub mod grid_exec;

/// Spawn placement - selects the agent start position away from the goal
pub mod spawn;

/// Manual control - maps key snapshots to motion and blends them with
/// controller output
pub mod manual_ctrl;

/// Navigation session - owns the external interfaces and runs the mode loops
pub mod nav_session;

/// Telemetry writer - CSV telemetry sink archived in the session directory
pub mod telem;
