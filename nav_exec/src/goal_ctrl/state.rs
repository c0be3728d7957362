//! Implementations for the GoalCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{GoalCtrlError, Params};
use crate::loc::{GoalSpec, Pose};
use sim_if::NavCmd;
use util::{
    maths::wrap_angle_deg,
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Goal control module state
#[derive(Debug, Default)]
pub struct GoalCtrl {
    pub(crate) params: Params,

    /// The goal being sought, set by `set_goal` before processing.
    goal: Option<GoalSpec>,

    /// Accumulated distance error integral. Inert unless `trim_enabled`.
    integral: f64,

    /// Distance error of the previous cycle. Inert unless `trim_enabled`.
    prev_error: f64
}

/// Input data to Goal control.
pub struct InputData {
    /// The agent pose read back from the render sink this cycle.
    pub pose: Pose,

    /// Cycle time.
    ///
    /// Units: seconds
    pub dt_s: f64
}

/// Status report for GoalCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Euclidian distance from the agent to the goal. Always non-negative.
    pub dist_error: f64,

    /// Heading error to the goal bearing, in (-180, 180] degrees.
    pub head_error_deg: f64,

    /// True if the agent is within the arrival tolerance of the goal.
    pub arrived: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for GoalCtrl {
    type InitData = &'static str;
    type InitError = GoalCtrlError;

    type InputData = InputData;
    type OutputData = NavCmd;
    type StatusReport = StatusReport;
    type ProcError = GoalCtrlError;

    /// Initialise the GoalCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = params::load_or_default(init_data)
            .map_err(GoalCtrlError::ParamLoadError)?;

        self.integral = 0f64;
        self.prev_error = 0f64;

        Ok(())
    }

    /// Compute the velocity command toward the goal for the given pose.
    ///
    /// The linear component is the attenuated distance error, the angular
    /// component the heading correction clamped to `ang_limit_deg`. Both are
    /// per-tick quantities.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let goal = match self.goal {
            Some(g) => g,
            None => return Err(GoalCtrlError::NoGoal)
        };

        let pose = &input_data.pose;
        let dt_s = input_data.dt_s;

        // Errors to the goal. The distance error is a norm so it is always
        // non-negative, the heading error is wrapped into (-180, 180].
        let dist_error = pose.distance_to(&goal.position);
        let head_error_deg = wrap_angle_deg(
            pose.bearing_to_deg(&goal.position) - pose.heading_deg
        );

        // Track the accumulators even when the trim terms are inert, so that
        // tuning sessions can observe them
        self.integral += dist_error * dt_s;
        let derivative = if dt_s > 0f64 {
            (dist_error - self.prev_error) / dt_s
        }
        else {
            0f64
        };
        self.prev_error = dist_error;

        // Forward speed from the distance error, attenuated as the heading
        // error grows
        let mut lin = self.params.k_v * dist_error
            / (1f64 + head_error_deg.abs() / self.params.head_atten_deg);

        if self.params.trim_enabled {
            lin += self.params.k_i * self.integral + self.params.k_d * derivative;
        }

        // Turn rate from the heading error, with a secondary term which
        // dominates when the forward speed is small
        let mut ang_deg = self.params.k_w * head_error_deg
            + self.params.k_w2 * head_error_deg / (1f64 + lin.abs());

        ang_deg = ang_deg
            .max(-self.params.ang_limit_deg)
            .min(self.params.ang_limit_deg);

        let report = StatusReport {
            dist_error,
            head_error_deg,
            arrived: dist_error < goal.arrival_tolerance
        };

        Ok((NavCmd::Velocity { lin, ang_deg }, report))
    }
}

impl GoalCtrl {
    /// Create a GoalCtrl directly from parameters and a goal, without a
    /// parameter file. Used by the session setup and by tests.
    pub fn from_params(params: Params, goal: GoalSpec) -> Self {
        Self {
            params,
            goal: Some(goal),
            integral: 0f64,
            prev_error: 0f64
        }
    }

    /// Set the goal to seek. Must be called before the first `proc`.
    pub fn set_goal(&mut self, goal: GoalSpec) {
        self.goal = Some(goal);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector2;

    fn goal_300_300() -> GoalSpec {
        GoalSpec {
            position: Vector2::new(300f64, 300f64),
            arrival_tolerance: 5f64
        }
    }

    fn pose_origin() -> Pose {
        Pose::new(Vector2::new(0f64, 0f64), 0f64)
    }

    #[test]
    fn test_errors_from_origin() {
        let mut ctrl = GoalCtrl::from_params(Params::default(), goal_300_300());

        let (_, report) = ctrl
            .proc(&InputData { pose: pose_origin(), dt_s: 0.05 })
            .unwrap();

        assert!((report.head_error_deg - 45f64).abs() < 1e-9);
        assert!((report.dist_error - 424.26).abs() < 0.01);
        assert!(!report.arrived);
    }

    #[test]
    fn test_linear_attenuates_with_heading_error() {
        // Hold the distance fixed and sweep the heading error from 0 to 180
        // degrees, the linear command must strictly decrease
        let goal = GoalSpec {
            position: Vector2::new(100f64, 0f64),
            arrival_tolerance: 5f64
        };

        let mut prev_lin = f64::INFINITY;

        for head_deg in 0..=180 {
            let mut ctrl = GoalCtrl::from_params(Params::default(), goal);

            let pose = Pose::new(Vector2::new(0f64, 0f64), -(head_deg as f64));
            let (cmd, report) = ctrl
                .proc(&InputData { pose, dt_s: 0.05 })
                .unwrap();

            assert!((report.head_error_deg.abs() - head_deg as f64).abs() < 1e-9);

            match cmd {
                NavCmd::Velocity { lin, .. } => {
                    assert!(
                        lin < prev_lin,
                        "linear command not strictly decreasing at {} deg", head_deg
                    );
                    prev_lin = lin;
                }
                c => panic!("unexpected command {:?}", c)
            }
        }
    }

    #[test]
    fn test_angular_clamped() {
        // A large heading error with strong gains must still respect the
        // angular limit
        let mut params = Params::default();
        params.k_w = 10f64;

        let goal = GoalSpec {
            position: Vector2::new(0f64, 100f64),
            arrival_tolerance: 5f64
        };
        let mut ctrl = GoalCtrl::from_params(params, goal);

        let pose = Pose::new(Vector2::new(0f64, 0f64), -90f64);
        let (cmd, _) = ctrl
            .proc(&InputData { pose, dt_s: 0.05 })
            .unwrap();

        match cmd {
            NavCmd::Velocity { ang_deg, .. } => {
                assert!(ang_deg.abs() <= 20f64);
                assert_eq!(ang_deg, 20f64);
            }
            c => panic!("unexpected command {:?}", c)
        }
    }

    #[test]
    fn test_arrival() {
        let mut ctrl = GoalCtrl::from_params(Params::default(), goal_300_300());

        let pose = Pose::new(Vector2::new(297f64, 300f64), 0f64);
        let (_, report) = ctrl
            .proc(&InputData { pose, dt_s: 0.05 })
            .unwrap();

        assert!(report.arrived);
    }

    #[test]
    fn test_no_goal_error() {
        let mut ctrl = GoalCtrl::default();

        let result = ctrl.proc(&InputData { pose: pose_origin(), dt_s: 0.05 });
        assert!(matches!(result, Err(GoalCtrlError::NoGoal)));
    }

    #[test]
    fn test_trim_terms_inert_by_default() {
        // With trim disabled the accumulators must not affect the command,
        // whatever the trim gains are
        let mut trimless = Params::default();
        trimless.k_i = 100f64;
        trimless.k_d = 100f64;

        let mut ctrl_a = GoalCtrl::from_params(Params::default(), goal_300_300());
        let mut ctrl_b = GoalCtrl::from_params(trimless, goal_300_300());

        for _ in 0..10 {
            let input = InputData { pose: pose_origin(), dt_s: 0.05 };
            let (cmd_a, _) = ctrl_a.proc(&input).unwrap();
            let (cmd_b, _) = ctrl_b.proc(&input).unwrap();
            assert_eq!(cmd_a, cmd_b);
        }
    }
}
