//! Run configuration and the named options consumed by trains.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, DurationProba, SimClock, SimTime, Tick};
use crate::proba::ProbaRange;

// ── SimOptions ────────────────────────────────────────────────────────────────

/// Simulation-wide defaults read by trains at activation and at each stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimOptions {
    /// Minimum dwell time at a scheduled stop, resampled at every arrival.
    pub default_minimum_stop_time: DurationProba,

    /// Entry delay used when a train's own delay distribution is null.
    pub default_delay_at_entry: DurationProba,

    /// Distance (m) from which a driver can read the next signal's aspect.
    pub default_signal_visibility: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            default_minimum_stop_time: DurationProba::Table(vec![
                ProbaRange(20.0, 40.0, 90.0),
                ProbaRange(40.0, 120.0, 10.0),
            ]),
            default_delay_at_entry:    DurationProba::Table(vec![ProbaRange(0.0, 0.0, 100.0)]),
            default_signal_visibility: 100.0,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Usually loaded from JSON by the application and handed to the
/// simulation builder.
///
/// ```json
/// { "startTime": "06:00:00", "tickSecs": 0.5, "totalTicks": 7200,
///   "seed": 42, "outputIntervalTicks": 10 }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Time of day at tick 0.
    pub start_time: SimTime,

    /// Simulated seconds per tick (Δt).  Must be positive.
    pub tick_secs: f64,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    #[serde(default)]
    pub options: SimOptions,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_time, self.tick_secs)
    }

    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let config: SimConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> CoreResult<Self> {
        let config: SimConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(CoreError::Config(format!("tickSecs must be positive, got {}", self.tick_secs)));
        }
        if !(self.options.default_signal_visibility >= 0.0) {
            return Err(CoreError::Config("defaultSignalVisibility must be non-negative".into()));
        }
        self.options.default_minimum_stop_time.validate()?;
        self.options.default_delay_at_entry.validate()?;
        Ok(())
    }
}
