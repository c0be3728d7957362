//! # Manual control
//!
//! Maps directional key snapshots onto motion, in two forms:
//!
//! - free motion, where the pressed keys directly define a displacement and
//!   the command is an absolute heading plus a forward step, and
//! - bias blending, where the keys contribute fixed increments on top of a
//!   controller's velocity command.
//!
//! Blending is a plain additive superposition, conflicting keys simply sum
//! (Up and Down cancel). The combined angular component is reclamped to its
//! own limit and the combined linear component capped at the maximum speed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use sim_if::{ManualInput, NavCmd};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for manual control.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Displacement per pressed key in free motion mode.
    ///
    /// Units: length-units/tick
    pub step: f64,

    /// Linear bias contributed by Up/Down when blending.
    ///
    /// Units: length-units/tick
    pub lin_step: f64,

    /// Angular bias contributed by Left/Right when blending.
    ///
    /// Units: degrees/tick
    pub ang_step: f64,

    /// Limit on the magnitude of the blended angular component.
    ///
    /// Units: degrees/tick
    pub ang_limit_deg: f64,

    /// Cap on the blended linear component.
    ///
    /// Units: length-units/tick
    pub max_speed: f64
}

/// Additive blender of manual input and controller output.
#[derive(Debug, Clone)]
pub struct ManualBlender {
    params: Params
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            step: 5.0,
            lin_step: 2.0,
            ang_step: 3.0,
            ang_limit_deg: 10.0,
            max_speed: 50.0
        }
    }
}

impl ManualBlender {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Map a key snapshot to a free motion command.
    ///
    /// The pressed keys define a displacement of `step` per axis; the command
    /// faces the agent along that displacement and steps its length. Returns
    /// `None` when the keys cancel out or none is pressed.
    pub fn free_motion(&self, input: &ManualInput) -> Option<NavCmd> {
        let (dx, dy) = self.displacement(input);

        if dx == 0f64 && dy == 0f64 {
            return None;
        }

        Some(NavCmd::HeadingStep {
            heading_deg: dy.atan2(dx).to_degrees(),
            step: dx.hypot(dy)
        })
    }

    /// Blend manual bias into a controller's velocity command.
    ///
    /// Commands other than `Velocity` pass through unchanged.
    pub fn blend(&self, cmd: NavCmd, input: &ManualInput) -> NavCmd {
        match cmd {
            NavCmd::Velocity { lin, ang_deg } => {
                let lin_bias = self.params.lin_step
                    * ((input.up as i8 - input.down as i8) as f64);
                let ang_bias = self.params.ang_step
                    * ((input.right as i8 - input.left as i8) as f64);

                let blended_ang = (ang_deg + ang_bias)
                    .max(-self.params.ang_limit_deg)
                    .min(self.params.ang_limit_deg);

                let blended_lin = (lin + lin_bias).min(self.params.max_speed);

                NavCmd::Velocity {
                    lin: blended_lin,
                    ang_deg: blended_ang
                }
            }
            c => c
        }
    }

    /// Key snapshot to displacement pair.
    fn displacement(&self, input: &ManualInput) -> (f64, f64) {
        let mut dx = 0f64;
        let mut dy = 0f64;

        if input.up { dy += self.params.step; }
        if input.down { dy -= self.params.step; }
        if input.left { dx -= self.params.step; }
        if input.right { dx += self.params.step; }

        (dx, dy)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_blend_up_adds_lin_step() {
        let blender = ManualBlender::new(Params::default());

        let cmd = blender.blend(
            NavCmd::Velocity { lin: 5f64, ang_deg: 0f64 },
            &ManualInput::new(true, false, false, false)
        );

        assert_eq!(cmd, NavCmd::Velocity { lin: 7f64, ang_deg: 0f64 });
    }

    #[test]
    fn test_blend_conflicting_keys_cancel() {
        let blender = ManualBlender::new(Params::default());

        let cmd = blender.blend(
            NavCmd::Velocity { lin: 5f64, ang_deg: 1f64 },
            &ManualInput::new(true, true, true, true)
        );

        assert_eq!(cmd, NavCmd::Velocity { lin: 5f64, ang_deg: 1f64 });
    }

    #[test]
    fn test_blend_reclamps_angular() {
        let blender = ManualBlender::new(Params::default());

        let cmd = blender.blend(
            NavCmd::Velocity { lin: 0f64, ang_deg: 9f64 },
            &ManualInput::new(false, false, false, true)
        );

        assert_eq!(cmd, NavCmd::Velocity { lin: 0f64, ang_deg: 10f64 });
    }

    #[test]
    fn test_blend_caps_linear_at_max_speed() {
        let blender = ManualBlender::new(Params::default());

        let cmd = blender.blend(
            NavCmd::Velocity { lin: 49.5f64, ang_deg: 0f64 },
            &ManualInput::new(true, false, false, false)
        );

        assert_eq!(cmd, NavCmd::Velocity { lin: 50f64, ang_deg: 0f64 });
    }

    #[test]
    fn test_free_motion_diagonal() {
        let blender = ManualBlender::new(Params::default());

        let cmd = blender
            .free_motion(&ManualInput::new(true, false, false, true))
            .unwrap();

        match cmd {
            NavCmd::HeadingStep { heading_deg, step } => {
                assert!((heading_deg - 45f64).abs() < 1e-9);
                assert!((step - (2f64.sqrt() * 5f64)).abs() < 1e-9);
            }
            c => panic!("unexpected command {:?}", c)
        }
    }

    #[test]
    fn test_free_motion_idle_is_none() {
        let blender = ManualBlender::new(Params::default());

        assert!(blender.free_motion(&ManualInput::default()).is_none());
        assert!(blender
            .free_motion(&ManualInput::new(true, true, true, true))
            .is_none());
    }
}
