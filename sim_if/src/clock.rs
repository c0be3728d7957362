//! # Control loop clock interface
//!
//! The loops are fixed-step simulations: each tick advances the model by a
//! nominal interval regardless of how long the computation took. The clock
//! trait makes the pacing injectable, so the executables can pace against
//! wall-clock time while tests drive the loops with synthetic intervals.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::{Duration, Instant};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A clock which paces a fixed-step control loop.
pub trait Clock {
    /// Wait until the next tick is due and return the cycle time in seconds.
    fn wait_tick(&mut self) -> f64;
}

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A clock which paces the loop against monotonic wall-clock time.
///
/// The sleep is the nominal interval minus the time spent computing since the
/// previous tick, so the loop does not accumulate drift from long cycles
/// (cycles longer than the interval simply run back to back).
pub struct PacedClock {
    interval_s: f64,
    last_tick: Option<Instant>
}

/// A clock which replays a scripted sequence of cycle times without sleeping.
///
/// When the sequence is exhausted the final value is repeated, so a single
/// element behaves as a fixed-step clock.
pub struct SyntheticClock {
    dts: Vec<f64>,
    index: usize
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl PacedClock {
    pub fn new(interval_s: f64) -> Self {
        Self {
            interval_s,
            last_tick: None
        }
    }
}

impl Clock for PacedClock {
    fn wait_tick(&mut self) -> f64 {
        if let Some(last) = self.last_tick {
            let elapsed_s = last.elapsed().as_secs_f64();

            if elapsed_s < self.interval_s {
                std::thread::sleep(Duration::from_secs_f64(
                    self.interval_s - elapsed_s
                ));
            }
        }

        self.last_tick = Some(Instant::now());

        self.interval_s
    }
}

impl SyntheticClock {
    /// A clock returning the same cycle time on every tick.
    pub fn fixed(dt_s: f64) -> Self {
        Self {
            dts: vec![dt_s],
            index: 0
        }
    }

    /// A clock replaying the given cycle times in order, repeating the last.
    pub fn from_sequence(dts: Vec<f64>) -> Self {
        assert!(!dts.is_empty(), "Clock sequence must not be empty");
        Self { dts, index: 0 }
    }
}

impl Clock for SyntheticClock {
    fn wait_tick(&mut self) -> f64 {
        let dt = self.dts[self.index];

        if self.index + 1 < self.dts.len() {
            self.index += 1;
        }

        dt
    }
}
