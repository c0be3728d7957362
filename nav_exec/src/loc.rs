//! Localisation types

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The pose of the agent on the plane.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pose {
    /// Position in the world frame.
    ///
    /// Units: length-units
    pub position: Vector2<f64>,

    /// Heading anticlockwise from the X+ axis.
    ///
    /// Units: degrees, in (-180, 180]
    pub heading_deg: f64
}

/// The goal of a navigation session.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GoalSpec {
    /// Position of the goal in the world frame.
    ///
    /// Units: length-units
    pub position: Vector2<f64>,

    /// Residual distance to the goal under which the agent is considered
    /// arrived.
    ///
    /// Units: length-units
    pub arrival_tolerance: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(position: Vector2<f64>, heading_deg: f64) -> Self {
        Self { position, heading_deg }
    }

    /// Get the bearing from this pose to the given point, in degrees
    /// anticlockwise from the X+ axis.
    pub fn bearing_to_deg(&self, point: &Vector2<f64>) -> f64 {
        let to_point = point - self.position;
        to_point[1].atan2(to_point[0]).to_degrees()
    }

    /// Get the euclidian distance from this pose to the given point.
    pub fn distance_to(&self, point: &Vector2<f64>) -> f64 {
        (point - self.position).norm()
    }
}
