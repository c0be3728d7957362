//! # Navigation session
//!
//! A session owns the external interface handles (render sink, input source,
//! telemetry sink, clock) and runs one control mode to completion as a plain
//! stepped loop: wait for the tick, read the pose back, compute, apply the
//! command, report telemetry. There is no process-wide state and no
//! callback re-entry, every collaborator is injected, so the loops run
//! identically against wall-clock pacing or synthetic test clocks.
//!
//! Every loop carries a tick cap as a safety valve: an unreachable goal or an
//! unstable gain set ends in a `DidNotConverge` outcome rather than an
//! unbounded loop.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Internal
use crate::goal_ctrl::{self, GoalCtrl, GoalCtrlError};
use crate::grid_exec::{self, GridExec, GridExecError};
use crate::loc::{GoalSpec, Pose};
use crate::manual_ctrl::ManualBlender;
use sim_if::{Clock, InputSource, NavCmd, RenderSink, TelemetrySink};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a navigation session.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Goal position, X component.
    pub goal_x: f64,

    /// Goal position, Y component.
    pub goal_y: f64,

    /// Residual distance to the goal considered "arrived".
    pub arrival_tolerance: f64,

    /// Nominal control cycle interval.
    ///
    /// Units: seconds
    pub tick_interval_s: f64,

    /// Safety valve: maximum number of control cycles before the session
    /// reports non-convergence.
    pub max_ticks: u64,

    /// Heading error above which the linear command is halved, prioritising
    /// re-orientation over forward progress.
    ///
    /// Units: degrees
    pub slow_heading_threshold_deg: f64
}

/// A navigation session over injected external interfaces.
pub struct NavSession<R, I, T, C>
where
    R: RenderSink,
    I: InputSource,
    T: TelemetrySink,
    C: Clock
{
    params: Params,
    goal: GoalSpec,
    render: R,
    input: I,
    telem: T,
    clock: C,

    /// Simulation time elapsed over the session.
    ///
    /// Units: seconds
    elapsed_s: f64,

    /// Number of control cycles executed.
    ticks: u64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How a session ended.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Outcome {
    /// The agent came within the arrival tolerance of the goal.
    Arrived {
        elapsed_s: f64,
        ticks: u64
    },

    /// The scripted path plan was executed in full.
    PlanComplete {
        elapsed_s: f64,
        ticks: u64
    },

    /// The tick cap was reached before any completion predicate held.
    DidNotConverge {
        ticks: u64
    }
}

/// Possible errors during session processing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Goal control failed: {0}")]
    GoalCtrl(#[from] GoalCtrlError),

    #[error("Grid path execution failed: {0}")]
    GridExec(#[from] GridExecError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            goal_x: 300.0,
            goal_y: 300.0,
            arrival_tolerance: 5.0,
            tick_interval_s: 0.05,
            max_ticks: 20000,
            slow_heading_threshold_deg: 30.0
        }
    }
}

impl Params {
    pub fn goal(&self) -> GoalSpec {
        GoalSpec {
            position: Vector2::new(self.goal_x, self.goal_y),
            arrival_tolerance: self.arrival_tolerance
        }
    }
}

impl<R, I, T, C> NavSession<R, I, T, C>
where
    R: RenderSink,
    I: InputSource,
    T: TelemetrySink,
    C: Clock
{
    /// Create a new session over the given external interfaces.
    pub fn new(params: Params, render: R, input: I, telem: T, clock: C) -> Self {
        let goal = params.goal();

        Self {
            params,
            goal,
            render,
            input,
            telem,
            clock,
            elapsed_s: 0f64,
            ticks: 0
        }
    }

    /// Run the manual mode loop: directional input moves the agent until it
    /// reaches the goal.
    pub fn run_manual(&mut self, blender: &ManualBlender) -> Outcome {
        loop {
            if self.arrived() {
                info!("Goal reached!");
                return Outcome::Arrived {
                    elapsed_s: self.elapsed_s,
                    ticks: self.ticks
                };
            }

            if self.ticks >= self.params.max_ticks {
                return self.did_not_converge();
            }

            let dt_s = self.clock.wait_tick();
            self.elapsed_s += dt_s;

            let input = self.input.snapshot();
            if let Some(cmd) = blender.free_motion(&input) {
                self.apply_cmd(&cmd);
            }

            self.ticks += 1;
        }
    }

    /// Run the goal-seeking loop, optionally blending manual bias into the
    /// controller's command.
    pub fn run_goal(
        &mut self,
        ctrl: &mut GoalCtrl,
        blender: Option<&ManualBlender>
    ) -> Result<Outcome, SessionError> {
        loop {
            if self.ticks >= self.params.max_ticks {
                self.telem.finalize();
                return Ok(self.did_not_converge());
            }

            let dt_s = self.clock.wait_tick();
            self.elapsed_s += dt_s;

            let pose = self.pose();
            let (mut cmd, report) = ctrl.proc(&goal_ctrl::InputData { pose, dt_s })?;

            if report.arrived {
                self.telem.finalize();
                info!("Goal reached!");
                return Ok(Outcome::Arrived {
                    elapsed_s: self.elapsed_s,
                    ticks: self.ticks
                });
            }

            // Prioritise re-orientation over forward progress when facing
            // away from the goal. Pure goal-seeking only: with manual bias
            // blended in the controller's command is applied as-is.
            if blender.is_none() {
                if let NavCmd::Velocity { ref mut lin, .. } = cmd {
                    if report.head_error_deg.abs()
                        > self.params.slow_heading_threshold_deg
                    {
                        *lin *= 0.5;
                    }
                }
            }

            if let Some(blender) = blender {
                let input = self.input.snapshot();
                cmd = blender.blend(cmd, &input);
            }

            self.apply_cmd(&cmd);

            let lin_applied = match cmd {
                NavCmd::Velocity { lin, .. } => lin,
                _ => 0f64
            };
            self.telem.update(self.elapsed_s, report.dist_error, lin_applied);

            self.ticks += 1;
        }
    }

    /// Run the scripted path executor until the plan completes.
    pub fn run_grid(&mut self, exec: &mut GridExec) -> Result<Outcome, SessionError> {
        loop {
            if self.ticks >= self.params.max_ticks {
                self.telem.finalize();
                return Ok(self.did_not_converge());
            }

            let dt_s = self.clock.wait_tick();
            self.elapsed_s += dt_s;

            let (output, report) = exec.proc(&grid_exec::InputData { dt_s })?;

            for cmd in &output.cmds {
                self.apply_cmd(cmd);
            }

            if let Some(point) = output.telem {
                self.telem.update(self.elapsed_s, point.velocity, point.accel);
            }

            if report.done {
                self.telem.finalize();
                info!("Path plan complete after {} segments", report.num_segments);
                return Ok(Outcome::PlanComplete {
                    elapsed_s: self.elapsed_s,
                    ticks: self.ticks
                });
            }

            self.ticks += 1;
        }
    }

    /// Get the current agent pose read back from the render sink.
    fn pose(&self) -> Pose {
        Pose::new(self.render.position(), self.render.heading_deg())
    }

    /// Apply a command to the render sink.
    fn apply_cmd(&mut self, cmd: &NavCmd) {
        match *cmd {
            NavCmd::Velocity { lin, ang_deg } => {
                let heading = self.render.heading_deg();
                self.render.set_heading_deg(heading + ang_deg);
                self.render.forward(lin);
            }
            NavCmd::HeadingStep { heading_deg, step } => {
                self.render.set_heading_deg(heading_deg);
                self.render.forward(step);
            }
            NavCmd::Forward { dist } => {
                self.render.forward(dist);
            }
            NavCmd::Turn { angle_deg } => {
                let heading = self.render.heading_deg();
                self.render.set_heading_deg(heading + angle_deg);
            }
            NavCmd::Stop => ()
        }
    }

    /// Arrival predicate on the current pose.
    fn arrived(&self) -> bool {
        self.pose().distance_to(&self.goal.position) < self.goal.arrival_tolerance
    }

    fn did_not_converge(&self) -> Outcome {
        warn!(
            "Session did not converge within {} ticks", self.params.max_ticks
        );
        Outcome::DidNotConverge { ticks: self.ticks }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::goal_ctrl;
    use crate::grid_exec;
    use crate::manual_ctrl;
    use nalgebra::Vector2;
    use sim_if::{
        HeadlessRender, ManualInput, NoInput, NullTelemetry, ScriptedInput,
        SyntheticClock
    };

    fn session_at(
        start: Vector2<f64>,
        params: Params
    ) -> NavSession<HeadlessRender, NoInput, NullTelemetry, SyntheticClock> {
        NavSession::new(
            params,
            HeadlessRender::new(start),
            NoInput,
            NullTelemetry,
            SyntheticClock::fixed(0.05)
        )
    }

    #[test]
    fn test_goal_mode_arrives() {
        let params = Params::default();
        let goal = params.goal();
        let mut session = session_at(Vector2::new(-150f64, -150f64), params);

        let mut ctrl = GoalCtrl::from_params(goal_ctrl::Params::default(), goal);

        let outcome = session.run_goal(&mut ctrl, None).unwrap();

        match outcome {
            Outcome::Arrived { ticks, .. } => {
                assert!(ticks < Params::default().max_ticks)
            }
            o => panic!("unexpected outcome {:?}", o)
        }

        // The agent must actually be within tolerance of the goal
        assert!(
            session.pose().distance_to(&goal.position) < goal.arrival_tolerance
        );
    }

    #[test]
    fn test_goal_mode_did_not_converge() {
        // Zero gains produce no motion, the tick cap must end the session
        let mut params = Params::default();
        params.max_ticks = 50;
        let goal = params.goal();
        let mut session = session_at(Vector2::new(-150f64, -150f64), params);

        let mut gains = goal_ctrl::Params::default();
        gains.k_v = 0f64;
        gains.k_w = 0f64;
        gains.k_w2 = 0f64;
        let mut ctrl = GoalCtrl::from_params(gains, goal);

        let outcome = session.run_goal(&mut ctrl, None).unwrap();

        assert!(matches!(outcome, Outcome::DidNotConverge { ticks: 50 }));
    }

    #[test]
    fn test_goal_mode_halves_linear_when_misaligned() {
        // One tick from the origin: the heading error to the goal is 45
        // degrees, above the threshold, so the applied step must be half the
        // controller's linear command
        let mut params = Params::default();
        params.max_ticks = 1;
        let goal = params.goal();
        let mut session = session_at(Vector2::new(0f64, 0f64), params);

        let mut ctrl = GoalCtrl::from_params(goal_ctrl::Params::default(), goal);
        session.run_goal(&mut ctrl, None).unwrap();

        // An identical controller gives the unhalved command
        let mut reference = GoalCtrl::from_params(
            goal_ctrl::Params::default(),
            goal
        );
        let (cmd, _) = reference
            .proc(&goal_ctrl::InputData {
                pose: Pose::new(Vector2::new(0f64, 0f64), 0f64),
                dt_s: 0.05
            })
            .unwrap();

        let lin = match cmd {
            NavCmd::Velocity { lin, .. } => lin,
            c => panic!("unexpected command {:?}", c)
        };

        let moved = session.pose().position.norm();
        assert!((moved - lin * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_goal_manual_mode_does_not_halve_linear() {
        // One tick from the origin toward a nearby goal with a blender
        // attached and no keys pressed: the heading error is 45 degrees,
        // above the threshold, but the re-orientation halving only exists in
        // the pure goal-seeking mode, so the full linear command is applied
        let mut params = Params::default();
        params.goal_x = 30f64;
        params.goal_y = 30f64;
        params.max_ticks = 1;
        let goal = params.goal();

        let mut session = NavSession::new(
            params,
            HeadlessRender::new(Vector2::new(0f64, 0f64)),
            NoInput,
            NullTelemetry,
            SyntheticClock::from_sequence(vec![0.05])
        );

        let mut ctrl = GoalCtrl::from_params(goal_ctrl::Params::default(), goal);
        let blender = ManualBlender::new(manual_ctrl::Params::default());
        session.run_goal(&mut ctrl, Some(&blender)).unwrap();

        // An identical controller gives the expected command
        let mut reference = GoalCtrl::from_params(
            goal_ctrl::Params::default(),
            goal
        );
        let (cmd, _) = reference
            .proc(&goal_ctrl::InputData {
                pose: Pose::new(Vector2::new(0f64, 0f64), 0f64),
                dt_s: 0.05
            })
            .unwrap();

        let lin = match cmd {
            NavCmd::Velocity { lin, .. } => lin,
            c => panic!("unexpected command {:?}", c)
        };

        let moved = session.pose().position.norm();
        assert!((moved - lin).abs() < 1e-9);
    }

    #[test]
    fn test_grid_mode_completes() {
        let params = Params::default();
        let mut session = session_at(Vector2::new(0f64, 0f64), params);

        let mut exec =
            GridExec::from_params(grid_exec::Params::default()).unwrap();

        let outcome = session.run_grid(&mut exec).unwrap();

        assert!(matches!(outcome, Outcome::PlanComplete { .. }));
    }

    #[test]
    fn test_manual_mode_arrives() {
        let mut params = Params::default();
        params.goal_x = 50f64;
        params.goal_y = 50f64;

        // Hold Up and Right long enough to cover the diagonal
        let script = vec![ManualInput::new(true, false, false, true); 20];

        let mut session = NavSession::new(
            params,
            HeadlessRender::new(Vector2::new(0f64, 0f64)),
            ScriptedInput::new(script),
            NullTelemetry,
            SyntheticClock::fixed(0.05)
        );

        let blender = ManualBlender::new(manual_ctrl::Params::default());
        let outcome = session.run_manual(&blender);

        assert!(matches!(outcome, Outcome::Arrived { .. }));
    }

    #[test]
    fn test_manual_mode_without_input_does_not_converge() {
        let mut params = Params::default();
        params.max_ticks = 25;
        let mut session = session_at(Vector2::new(-150f64, -150f64), params);

        let blender = ManualBlender::new(manual_ctrl::Params::default());
        let outcome = session.run_manual(&blender);

        assert!(matches!(outcome, Outcome::DidNotConverge { ticks: 25 }));
    }
}
