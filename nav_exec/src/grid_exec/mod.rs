//! # Grid path executor module
//!
//! This module executes a scripted plan of discrete move and turn segments,
//! realising each one through a slew-rate-limited PID controller: one
//! instance for the linear axis and an independent one for the angular axis.
//! A move segment accelerates the agent toward the remaining distance,
//! integrates the velocity into per-tick forward steps and finishes with an
//! exact residual correction so the segment lands on the target distance
//! despite time discretisation. Turn segments are the symmetric algorithm on
//! the heading axis.
//!
//! The plan itself is produced by a fixed generation rule: for each outer
//! iteration the agent performs `inner_count` moves in a row (one long leg),
//! then a 90 degree turn, one more move, and another 90 degree turn, so the
//! next leg runs back antiparallel to the previous one. Despite the "grid"
//! name this traces a zig-zag sweep rather than a closed rectangular grid.
//! The rule is kept literal; whether the name or the shape is the intent is
//! an open product question, not something this module decides.

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

/// One atomic instruction of a path plan.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub enum PathSegment {
    /// Move forwards by the given distance.
    ///
    /// Units: length-units
    Move(f64),

    /// Turn on the spot by the given angle, positive anticlockwise.
    ///
    /// Units: degrees
    Turn(f64)
}

/// Possible errors that can occur during GridExec operation.
#[derive(Debug, thiserror::Error)]
pub enum GridExecError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util_params::LoadError),

    /// The path parameters generate an empty plan, there is nothing to
    /// execute.
    #[error("Path parameters generate an empty plan")]
    EmptyPlan
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the path plan from the generation rule.
///
/// The rule is literal: `outer_count` repetitions of (`inner_count` moves,
/// turn 90, move, turn 90), each move of `segment_length`.
pub fn build_plan(params: &Params) -> Vec<PathSegment> {
    let mut plan = Vec::with_capacity(
        params.outer_count * (params.inner_count + 3)
    );

    for _ in 0..params.outer_count {
        for _ in 0..params.inner_count {
            plan.push(PathSegment::Move(params.segment_length));
        }
        plan.push(PathSegment::Turn(90f64));
        plan.push(PathSegment::Move(params.segment_length));
        plan.push(PathSegment::Turn(90f64));
    }

    plan
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
