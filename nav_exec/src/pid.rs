//! # Slew-rate-limited PID controller
//!
//! This module provides the single-axis PID controller used by the grid path
//! executor. On top of the usual three-term law the controller rate-limits
//! its own output, so the commanded acceleration never jumps by more than
//! `accel_rate * dt` between cycles, and clamps the result into the
//! configured output range.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gains and limits for a [`PidController`].
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PidParams {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Lower bound on the controller output
    pub min_output: f64,

    /// Upper bound on the controller output
    pub max_output: f64,

    /// Maximum rate of change of the output per unit time
    pub accel_rate: f64
}

/// A PID controller with slew-rate limiting on its output.
///
/// The controller is stateful across calls to [`PidController::compute`] and
/// its state is owned exclusively by the instance. No anti-windup is applied
/// to the integral term.
#[derive(Debug, Default, Serialize, Clone)]
pub struct PidController {
    params: PidParams,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: f64,

    /// The current rate-limited output
    current_output: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {
    /// Create a new controller with the given gains and limits, with all
    /// state initialised to zero.
    pub fn new(params: PidParams) -> Self {
        Self {
            params,
            integral: 0f64,
            prev_error: 0f64,
            current_output: 0f64
        }
    }

    /// Get the value of the controller for the given target and current
    /// values.
    ///
    /// The raw PID output is treated as a desired value which the stored
    /// output moves toward by at most `accel_rate * dt` per call, in either
    /// direction, before being clamped into `[min_output, max_output]`.
    pub fn compute(&mut self, target: f64, current: f64, dt_s: f64) -> f64 {
        let error = target - current;

        // Accumulate the integral term
        self.integral += error * dt_s;

        // Calculate the derivative.
        //
        // A zero or negative time step carries no rate information, so the
        // derivative falls back to zero rather than dividing by zero.
        let derivative = if dt_s > 0f64 {
            (error - self.prev_error) / dt_s
        }
        else {
            0f64
        };

        self.prev_error = error;

        // The desired (unsmoothed) output
        let desired = self.params.k_p * error
            + self.params.k_i * self.integral
            + self.params.k_d * derivative;

        // Move the stored output toward the desired value, limited to
        // accel_rate * dt per call
        let max_delta = self.params.accel_rate * dt_s;

        if desired > self.current_output {
            self.current_output += (desired - self.current_output).min(max_delta);
        }
        else {
            self.current_output -= (self.current_output - desired).min(max_delta);
        }

        // Clamp the final output within bounds
        self.current_output = self.current_output
            .max(self.params.min_output)
            .min(self.params.max_output);

        self.current_output
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn params(accel_rate: f64) -> PidParams {
        PidParams {
            k_p: 1f64,
            k_i: 0f64,
            k_d: 0f64,
            min_output: -10f64,
            max_output: 10f64,
            accel_rate
        }
    }

    #[test]
    fn test_saturation() {
        // With a very high slew rate the proportional output is reached
        // immediately and clamped at the upper bound
        let mut pid = PidController::new(params(100f64));

        assert_eq!(pid.compute(10f64, 0f64, 1f64), 10f64);
    }

    #[test]
    fn test_slew_limit() {
        // With a slew rate of 1 per second the first step toward a desired
        // value of 10 is limited to 1
        let mut pid = PidController::new(params(1f64));

        assert_eq!(pid.compute(10f64, 0f64, 1f64), 1f64);
    }

    #[test]
    fn test_output_within_bounds() {
        let mut pid = PidController::new(PidParams {
            k_p: 50f64,
            k_i: 10f64,
            k_d: 5f64,
            min_output: -3f64,
            max_output: 15f64,
            accel_rate: 1000f64
        });

        let mut target = 1000f64;
        for _ in 0..200 {
            let out = pid.compute(target, 0f64, 0.1f64);
            assert!(out >= -3f64 && out <= 15f64);

            // Swing the target to force the output against both bounds
            target = -target;
        }
    }

    #[test]
    fn test_slew_bound_between_calls() {
        let mut pid = PidController::new(PidParams {
            k_p: 10f64,
            k_i: 1f64,
            k_d: 0f64,
            min_output: -100f64,
            max_output: 100f64,
            accel_rate: 2f64
        });

        let dt_s = 0.1f64;
        let mut prev_out = 0f64;
        let mut target = 500f64;

        for _ in 0..100 {
            let out = pid.compute(target, 0f64, dt_s);
            assert!(
                (out - prev_out).abs() <= 2f64 * dt_s + 1e-12,
                "slew bound violated: {} -> {}", prev_out, out
            );
            prev_out = out;
            target = -target;
        }
    }

    #[test]
    fn test_zero_dt_derivative_guard() {
        let mut pid = PidController::new(PidParams {
            k_p: 0f64,
            k_i: 0f64,
            k_d: 1f64,
            min_output: -10f64,
            max_output: 10f64,
            accel_rate: 1000f64
        });

        // A zero time step must not panic or produce a non-finite output
        let out = pid.compute(5f64, 0f64, 0f64);
        assert!(out.is_finite());
        assert_eq!(out, 0f64);
    }
}
