//! Simulation time model.
//!
//! # Design
//!
//! The driver counts integer `Tick`s.  Each tick advances the simulated
//! time of day by a fixed `tick_secs` step:
//!
//!   now = start + tick * tick_secs
//!
//! Times of day are `SimTime` values (seconds since midnight, `f64`) because
//! train kinematics need sub-second steps.  Timetables and persisted records
//! use the `HH:MM:SS` text form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// A time of day in seconds since midnight.
///
/// Serialized as `HH:MM:SS`.  Hours are not wrapped at 24 so that services
/// running past midnight keep increasing times.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SimTime(f64);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0.0);

    pub fn from_secs(secs: f64) -> Self {
        SimTime(secs)
    }

    pub fn from_hms(h: u32, m: u32, s: u32) -> Self {
        SimTime(f64::from(h) * 3_600.0 + f64::from(m) * 60.0 + f64::from(s))
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The time `secs` seconds later (earlier when negative).
    #[inline]
    pub fn add_secs(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn secs_since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0).floor() as u64;
        write!(f, "{:02}:{:02}:{:02}", total / 3_600, (total % 3_600) / 60, total % 60)
    }
}

impl FromStr for SimTime {
    type Err = CoreError;

    /// Parse `HH:MM:SS` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(CoreError::Parse(format!("invalid time {s:?}: expected HH:MM[:SS]")));
        }
        let mut fields = [0u32; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = part
                .parse::<u32>()
                .map_err(|_| CoreError::Parse(format!("invalid time {s:?}: {part:?} is not a number")))?;
        }
        let [h, m, sec] = fields;
        if m >= 60 || sec >= 60 {
            return Err(CoreError::Parse(format!("invalid time {s:?}: minutes and seconds must be < 60")));
        }
        h.checked_mul(3_600)
            .and_then(|secs| secs.checked_add(m * 60 + sec))
            .ok_or_else(|| CoreError::Parse(format!("invalid time {s:?}: out of range")))?;
        Ok(SimTime::from_hms(h, m, sec))
    }
}

impl TryFrom<String> for SimTime {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SimTime> for String {
    fn from(t: SimTime) -> String {
        t.to_string()
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to times of day.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Time of day at tick 0.
    pub start: SimTime,
    /// Simulated seconds per tick (Δt).
    pub tick_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(start: SimTime, tick_secs: f64) -> Self {
        Self { start, tick_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Time of day at the start of the current tick.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.time_at(self.current_tick)
    }

    /// Time of day once the current tick has been processed.
    #[inline]
    pub fn end_of_tick(&self) -> SimTime {
        self.time_at(Tick(self.current_tick.0 + 1))
    }

    #[inline]
    pub fn time_at(&self, tick: Tick) -> SimTime {
        self.start.add_secs(tick.0 as f64 * self.tick_secs)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}
