//! Parameters structure for GoalCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Goal control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {

    // ---- COUPLED LAW ----

    /// Linear velocity gain on the distance error.
    pub k_v: f64,

    /// Base angular velocity gain on the heading error.
    pub k_w: f64,

    /// Secondary angular velocity gain, scaled down as the linear command
    /// grows.
    pub k_w2: f64,

    /// Heading error at which the linear command is attenuated to half.
    ///
    /// Units: degrees
    pub head_atten_deg: f64,

    /// Limit on the magnitude of the angular command.
    ///
    /// Units: degrees/tick
    pub ang_limit_deg: f64,

    // ---- TRIM TERMS ----

    /// If true the integral/derivative trim terms below are added to the
    /// linear command. If false the accumulators are still tracked (and
    /// reported for tuning) but do not affect the output.
    pub trim_enabled: bool,

    /// Integral trim gain on the accumulated distance error.
    pub k_i: f64,

    /// Derivative trim gain on the distance error rate.
    pub k_d: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            k_v: 0.8,
            k_w: 0.1,
            k_w2: 0.05,
            head_atten_deg: 30.0,
            ang_limit_deg: 20.0,
            trim_enabled: false,
            k_i: 0.01,
            k_d: 0.01
        }
    }
}
