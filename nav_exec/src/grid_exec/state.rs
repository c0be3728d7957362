//! Implementations for the GridExec state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{build_plan, GridExecError, Params, PathSegment};
use crate::pid::PidController;
use sim_if::NavCmd;
use util::{
    module::State,
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Grid path executor module state
#[derive(Debug, Default)]
pub struct GridExec {
    /// The plan under execution, built once at init.
    plan: Vec<PathSegment>,

    /// Executing mode
    mode: GridExecMode,

    /// Distance traveled (moves) or angle rotated (turns) within the current
    /// segment.
    progress: f64,

    /// Linear (moves) or angular (turns) velocity within the current segment.
    velocity: f64,

    /// Velocity of the previous cycle, for the measured acceleration.
    prev_velocity: f64,

    /// Controller for the linear axis
    linear_pid: PidController,

    /// Controller for the angular axis
    angular_pid: PidController
}

/// Input data to the Grid path executor.
pub struct InputData {
    /// Cycle time.
    ///
    /// Units: seconds
    pub dt_s: f64
}

/// Output commands from one executor cycle.
///
/// Usually a single command, but the cycle which completes a segment also
/// carries the exact residual correction, and the cycle which completes the
/// plan carries a final stop.
pub struct OutputData {
    pub cmds: Vec<NavCmd>,

    /// Telemetry for this cycle, present only for move segment steps.
    pub telem: Option<TelemPoint>
}

/// One telemetry point of a move segment step.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TelemPoint {
    /// Linear velocity after this step.
    pub velocity: f64,

    /// Measured acceleration `(velocity - prev_velocity) / dt`. This is a
    /// measured quantity, distinct from the controller's internal
    /// rate-limited output.
    pub accel: f64
}

/// Status report for GridExec processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Index of the executing segment.
    pub seg_index: usize,

    /// Total number of segments in the plan.
    pub num_segments: usize,

    /// True when the full plan has been executed.
    pub done: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The possible modes of execution of GridExec.
#[derive(Debug, Copy, Clone, PartialEq)]
enum GridExecMode {
    Idle,
    RunningSegment(usize),
    Done
}

impl Default for GridExecMode {
    fn default() -> Self {
        GridExecMode::Idle
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for GridExec {
    type InitData = &'static str;
    type InitError = GridExecError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = GridExecError;

    /// Initialise the GridExec module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load_or_default(init_data)
            .map_err(GridExecError::ParamLoadError)?;

        *self = Self::from_params(params)?;

        Ok(())
    }

    /// Execute one cycle of the plan.
    ///
    /// Each cycle advances the current segment by one controller step. The
    /// cycle in which a segment's accumulated progress crosses its target
    /// also emits the exact residual correction and moves on to the next
    /// segment; the cycle which exhausts the plan emits a stop and reports
    /// done.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let dt_s = input_data.dt_s;

        // Start the plan on the first cycle
        if self.mode == GridExecMode::Idle {
            self.mode = GridExecMode::RunningSegment(0);
        }

        let mut output = OutputData {
            cmds: vec![],
            telem: None
        };
        let mut report = StatusReport {
            seg_index: 0,
            num_segments: self.plan.len(),
            done: false
        };

        match self.mode {
            GridExecMode::RunningSegment(index) => {
                report.seg_index = index;

                let segment = self.plan[index];
                match segment {
                    PathSegment::Move(dist) => {
                        self.step_move(dist, dt_s, &mut output)
                    }
                    PathSegment::Turn(angle_deg) => {
                        self.step_turn(angle_deg, dt_s, &mut output)
                    }
                }

                // If the segment completed on this cycle advance the plan
                if let GridExecMode::Done = self.mode {
                    output.cmds.push(NavCmd::Stop);
                    report.done = true;
                }
            }
            GridExecMode::Done => {
                output.cmds.push(NavCmd::Stop);
                report.done = true;
            }
            GridExecMode::Idle => unreachable!()
        }

        Ok((output, report))
    }
}

impl GridExec {
    /// Create a GridExec directly from parameters, without a parameter file.
    /// Used by the session setup and by tests.
    pub fn from_params(params: Params) -> Result<Self, GridExecError> {
        let plan = build_plan(&params);

        if plan.is_empty() {
            return Err(GridExecError::EmptyPlan);
        }

        Ok(Self {
            linear_pid: PidController::new(params.linear_pid),
            angular_pid: PidController::new(params.angular_pid),
            plan,
            mode: GridExecMode::Idle,
            progress: 0f64,
            velocity: 0f64,
            prev_velocity: 0f64
        })
    }

    /// One controller step of a move segment.
    fn step_move(&mut self, dist: f64, dt_s: f64, output: &mut OutputData) {
        // Commanded acceleration toward the remaining distance
        let accel_cmd = self.linear_pid.compute(
            dist - self.progress,
            self.velocity,
            dt_s
        );

        self.velocity += accel_cmd * dt_s;

        let step = self.velocity * dt_s;
        self.progress += step;

        // Measured acceleration for telemetry, distinct from accel_cmd
        let accel_meas = if dt_s > 0f64 {
            (self.velocity - self.prev_velocity) / dt_s
        }
        else {
            0f64
        };
        self.prev_velocity = self.velocity;

        output.cmds.push(NavCmd::Forward { dist: step });
        output.telem = Some(TelemPoint {
            velocity: self.velocity,
            accel: accel_meas
        });

        if self.progress >= dist {
            // Exact final correction so the segment ends on the target
            // distance rather than the discretised overshoot
            output.cmds.push(NavCmd::Forward {
                dist: dist - self.progress
            });

            self.advance_segment();
        }
    }

    /// One controller step of a turn segment.
    fn step_turn(&mut self, angle_deg: f64, dt_s: f64, output: &mut OutputData) {
        let accel_cmd = self.angular_pid.compute(
            angle_deg - self.progress,
            self.velocity,
            dt_s
        );

        self.velocity += accel_cmd * dt_s;

        let turn_step = self.velocity * dt_s;
        self.progress += turn_step;
        self.prev_velocity = self.velocity;

        output.cmds.push(NavCmd::Turn { angle_deg: turn_step });

        if self.progress.abs() >= angle_deg.abs() {
            output.cmds.push(NavCmd::Turn {
                angle_deg: angle_deg - self.progress
            });

            self.advance_segment();
        }
    }

    /// Move on to the next segment, or complete the plan.
    ///
    /// Per-segment progress and velocity reset to zero; the controllers are
    /// deliberately not reset, their accumulated state carries across
    /// segments.
    fn advance_segment(&mut self) {
        self.progress = 0f64;
        self.velocity = 0f64;
        self.prev_velocity = 0f64;

        if let GridExecMode::RunningSegment(index) = self.mode {
            if index + 1 < self.plan.len() {
                self.mode = GridExecMode::RunningSegment(index + 1);
            }
            else {
                self.mode = GridExecMode::Done;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Run the executor to completion, returning the total forward distance,
    /// total turn angle and number of stop commands emitted.
    fn run_to_done(params: Params) -> (f64, f64, usize) {
        let mut exec = GridExec::from_params(params).unwrap();

        let mut total_forward = 0f64;
        let mut total_turn = 0f64;
        let mut stops = 0usize;

        for _ in 0..1_000_000 {
            let (output, report) = exec
                .proc(&InputData { dt_s: 0.1 })
                .unwrap();

            for cmd in &output.cmds {
                match cmd {
                    NavCmd::Forward { dist } => total_forward += dist,
                    NavCmd::Turn { angle_deg } => total_turn += angle_deg,
                    NavCmd::Stop => stops += 1,
                    c => panic!("unexpected command {:?}", c)
                }
            }

            if report.done {
                return (total_forward, total_turn, stops);
            }
        }

        panic!("executor did not complete");
    }

    #[test]
    fn test_full_plan_totals() {
        let (total_forward, total_turn, stops) = run_to_done(Params::default());

        // 4 outer iterations of (4 + 1) moves of 100, and 8 turns of 90
        assert!((total_forward - 2000f64).abs() < 1e-6);
        assert!((total_turn - 720f64).abs() < 1e-6);
        assert_eq!(stops, 1);
    }

    #[test]
    fn test_move_segment_exact_distance() {
        // A single move segment must land exactly on its target distance,
        // including the residual correction
        let mut params = Params::default();
        params.outer_count = 1;
        params.inner_count = 1;

        let mut exec = GridExec::from_params(params).unwrap();

        let mut traveled = 0f64;
        for _ in 0..100_000 {
            let (output, report) = exec
                .proc(&InputData { dt_s: 0.1 })
                .unwrap();

            let mut finished_first_move = false;
            for cmd in &output.cmds {
                if let NavCmd::Forward { dist } = cmd {
                    traveled += dist;
                }
                // The residual correction comes with a second command in the
                // same cycle
                if output.cmds.len() > 1 {
                    finished_first_move = true;
                }
            }

            if finished_first_move || report.done {
                assert!((traveled - 100f64).abs() < 1e-9);
                return;
            }
        }

        panic!("move segment did not complete");
    }

    #[test]
    fn test_telemetry_only_on_moves() {
        // Plan a lone turn after a single move and check turn cycles carry no
        // telemetry
        let mut params = Params::default();
        params.outer_count = 1;
        params.inner_count = 1;

        let mut exec = GridExec::from_params(params).unwrap();

        let mut saw_turn_cycle = false;
        for _ in 0..100_000 {
            let seg_is_turn = matches!(
                exec.plan[match exec.mode {
                    GridExecMode::RunningSegment(i) => i,
                    _ => 0
                }],
                PathSegment::Turn(_)
            );

            let (output, report) = exec
                .proc(&InputData { dt_s: 0.1 })
                .unwrap();

            if seg_is_turn {
                assert!(output.telem.is_none());
                saw_turn_cycle = true;
            }

            if report.done {
                break;
            }
        }

        assert!(saw_turn_cycle);
    }

    #[test]
    fn test_empty_plan_rejected() {
        let mut params = Params::default();
        params.outer_count = 0;

        assert!(matches!(
            GridExec::from_params(params),
            Err(GridExecError::EmptyPlan)
        ));
    }
}
