//! Signal action negotiation.
//!
//! A driver reads the aspect of the next facing signal once it is within
//! visibility distance and adopts that aspect's action list.  Each action is
//! a target speed; once the train holds it (within [`SPEED_TOLERANCE`]) for
//! the action's wait time, the driver moves on to the next action.  The last
//! action stays in force until another signal is read.

use rail_core::{SimTime, TrackItemId};
use rail_track::SignalAction;

/// Speed difference (m/s) under which an action's target counts as reached.
pub const SPEED_TOLERANCE: f64 = 0.1;

/// What the driver can see of the next facing signal.
#[derive(Copy, Clone, Debug)]
pub enum SignalSighting<'a> {
    /// No facing signal before the end of the line.
    NoneAhead,
    /// A signal exists but is beyond visibility distance.
    OutOfSight,
    /// A signal within visibility distance and its current action list.
    InSight { signal: TrackItemId, actions: &'a [SignalAction] },
}

/// Per-train state of the action list being followed.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalActionTracker {
    last_signal: Option<TrackItemId>,
    actions:     Vec<SignalAction>,
    index:       usize,
    action_time: Option<SimTime>,
}

impl Default for SignalActionTracker {
    fn default() -> Self {
        Self {
            last_signal: None,
            actions:     vec![SignalAction::UNCONSTRAINED],
            index:       0,
            action_time: None,
        }
    }
}

impl SignalActionTracker {
    /// The signal whose actions are (or were last) adopted.
    #[inline]
    pub fn last_signal(&self) -> Option<TrackItemId> {
        self.last_signal
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn actions(&self) -> &[SignalAction] {
        &self.actions
    }

    /// The action currently in force.
    pub fn applicable(&self) -> SignalAction {
        self.actions.get(self.index).copied().unwrap_or(SignalAction::UNCONSTRAINED)
    }

    /// Observe, then progress unless no signal lies ahead.
    pub fn update(&mut self, sighting: SignalSighting<'_>, speed: f64, now: SimTime) {
        if self.observe(sighting) {
            self.progress(speed, now);
        }
    }

    /// Fold one sighting into the tracker.  Returns `false` when no signal
    /// lies ahead, in which case the action list was reset to
    /// [`SignalAction::UNCONSTRAINED`] and there is nothing to progress.
    pub fn observe(&mut self, sighting: SignalSighting<'_>) -> bool {
        match sighting {
            SignalSighting::NoneAhead => {
                self.actions = vec![SignalAction::UNCONSTRAINED];
                self.index = 0;
                return false;
            }
            SignalSighting::OutOfSight => {}
            SignalSighting::InSight { signal, actions } if actions.is_empty() => {
                self.last_signal = Some(signal);
            }
            SignalSighting::InSight { signal, actions } => {
                // Re-read every tick so aspect changes are picked up.
                self.actions = actions.to_vec();
                if self.last_signal != Some(signal) {
                    self.last_signal = Some(signal);
                    self.index = 0;
                    self.action_time = None;
                } else if self.index >= self.actions.len() {
                    self.index = self.actions.len() - 1;
                }
            }
        }
        true
    }

    /// Advance to the next action once the current one has been held for its
    /// wait time.
    pub fn progress(&mut self, speed: f64, now: SimTime) {
        let action = self.applicable();
        if (speed - action.speed).abs() >= SPEED_TOLERANCE {
            return;
        }
        let since = *self.action_time.get_or_insert(now);
        if now.secs_since(since) > action.wait_secs() && self.index + 1 < self.actions.len() {
            self.index += 1;
            self.action_time = None;
        }
    }
}
