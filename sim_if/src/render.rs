//! # Render sink interface
//!
//! The render sink is the agent's body: it realises motion commands and is
//! the single owner of the agent pose. The navigation core issues heading
//! and forward demands and reads back the resulting position, it never
//! integrates the pose itself.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use nalgebra::Vector2;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A sink which realises motion commands on the agent.
pub trait RenderSink {
    /// Set the absolute heading of the agent in degrees, anticlockwise from
    /// the X+ axis.
    fn set_heading_deg(&mut self, heading_deg: f64);

    /// Move the agent forwards along its current heading.
    fn forward(&mut self, dist: f64);

    /// Get the current position of the agent.
    fn position(&self) -> Vector2<f64>;

    /// Get the current heading of the agent in degrees, in (-180, 180].
    fn heading_deg(&self) -> f64;
}

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A render sink with no attached display.
///
/// The pose is integrated exactly and the motion is traced to the log, which
/// is all the executables need when running without a canvas. Also the
/// reference implementation for tests.
pub struct HeadlessRender {
    position: Vector2<f64>,
    heading_deg: f64
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl HeadlessRender {
    /// Create a new headless render sink with the agent at the given start
    /// position, facing along X+.
    pub fn new(start: Vector2<f64>) -> Self {
        Self {
            position: start,
            heading_deg: 0f64
        }
    }
}

impl RenderSink for HeadlessRender {
    fn set_heading_deg(&mut self, heading_deg: f64) {
        self.heading_deg = wrap_heading(heading_deg);
    }

    fn forward(&mut self, dist: f64) {
        let heading_rad = self.heading_deg.to_radians();
        self.position += Vector2::new(
            dist * heading_rad.cos(),
            dist * heading_rad.sin()
        );

        trace!(
            "agent at ({:.2}, {:.2}) heading {:.2} deg",
            self.position[0], self.position[1], self.heading_deg
        );
    }

    fn position(&self) -> Vector2<f64> {
        self.position
    }

    fn heading_deg(&self) -> f64 {
        self.heading_deg
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Wrap a heading in degrees into (-180, 180].
fn wrap_heading(heading_deg: f64) -> f64 {
    let wrapped = (heading_deg + 180f64).rem_euclid(360f64) - 180f64;

    if wrapped == -180f64 {
        180f64
    }
    else {
        wrapped
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
