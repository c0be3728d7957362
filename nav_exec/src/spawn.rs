//! # Spawn placement
//!
//! One-shot selection of the agent start position. Three corner zones of the
//! canvas are candidates (every corner except the goal's own quadrant in the
//! default configuration); a zone is eligible only if its corner is at least
//! the minimum separation from the goal on both axes. The start point is
//! drawn uniformly from a fixed-size square anchored at a uniformly chosen
//! eligible corner.
//!
//! A configuration in which no zone is eligible is a fatal error, surfaced
//! before any controller runs.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for spawn placement.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Half of the canvas side length, zones are placed relative to the
    /// canvas bounds.
    ///
    /// Units: length-units
    pub half_extent: f64,

    /// Minimum per-axis separation between the goal and an eligible zone
    /// corner.
    ///
    /// Units: length-units
    pub min_distance: f64,

    /// Offset of the zone corners from the canvas bounds.
    ///
    /// Units: length-units
    pub margin: f64,

    /// Side length of the square around an eligible corner from which the
    /// start point is drawn.
    ///
    /// Units: length-units
    pub zone_extent: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors during spawn placement.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// No candidate zone satisfies the minimum separation from the goal.
    #[error(
        "None of the {num_zones} candidate spawn zones is at least {min_distance} \
         length-units from the goal on both axes"
    )]
    NoValidZone {
        num_zones: usize,
        min_distance: f64
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            half_extent: 200.0,
            min_distance: 200.0,
            margin: 50.0,
            zone_extent: 100.0
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Select a start position for the agent at a guaranteed separation from the
/// given goal position.
pub fn select_spawn<R: Rng>(
    goal: &Vector2<f64>,
    params: &Params,
    rng: &mut R
) -> Result<Vector2<f64>, SpawnError> {

    // Candidate zone corners: top-left, bottom-left, bottom-right
    let zones = [
        (-params.half_extent + params.margin, params.half_extent - params.margin),
        (-params.half_extent + params.margin, -params.half_extent + params.margin),
        (params.half_extent - params.margin, -params.half_extent + params.margin)
    ];

    let valid_zones: Vec<(f64, f64)> = zones
        .iter()
        .copied()
        .filter(|(zx, zy)| {
            (goal[0] - zx).abs() >= params.min_distance
                && (goal[1] - zy).abs() >= params.min_distance
        })
        .collect();

    if valid_zones.is_empty() {
        return Err(SpawnError::NoValidZone {
            num_zones: zones.len(),
            min_distance: params.min_distance
        });
    }

    let (zx, zy) = valid_zones[rng.gen_range(0..valid_zones.len())];

    Ok(Vector2::new(
        zx + rng.gen_range(0f64..=params.zone_extent),
        zy + rng.gen_range(0f64..=params.zone_extent)
    ))
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_separation() {
        // With the default configuration and the default goal every selected
        // start must keep the minimum separation on both axes
        let goal = Vector2::new(300f64, 300f64);
        let params = Params::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let start = select_spawn(&goal, &params, &mut rng).unwrap();

            assert!((goal[0] - start[0]).abs() >= params.min_distance);
            assert!((goal[1] - start[1]).abs() >= params.min_distance);
        }
    }

    #[test]
    fn test_single_valid_zone() {
        // For goal (300, 300) only the bottom-left corner is far enough on
        // both axes, so every start must come from its square
        let goal = Vector2::new(300f64, 300f64);
        let params = Params::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let start = select_spawn(&goal, &params, &mut rng).unwrap();

            assert!(start[0] >= -150f64 && start[0] <= -50f64);
            assert!(start[1] >= -150f64 && start[1] <= -50f64);
        }
    }

    #[test]
    fn test_no_valid_zone_is_error() {
        // A goal in the canvas centre is within the minimum separation of
        // every corner zone
        let goal = Vector2::new(0f64, 0f64);
        let params = Params::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            select_spawn(&goal, &params, &mut rng),
            Err(SpawnError::NoValidZone { .. })
        ));
    }
}
