//! Operating status of a train.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Speed (m/s) above which a train counts as running.
pub const RUNNING_THRESHOLD: f64 = 0.25;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainStatus {
    /// Not yet entered the area.
    #[default]
    Inactive,
    /// Moving faster than [`RUNNING_THRESHOLD`].
    Running,
    /// Scheduled stop at a place of its service.
    Stopped,
    /// Unscheduled stop, e.g. at a red signal or without a service.
    Waiting,
    /// Exited the area.
    Out,
    /// Itinerary exhausted with no chained service.
    EndOfService,
}

impl TrainStatus {
    /// `true` for statuses that take part in kinematics and crossing actions.
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, TrainStatus::Inactive | TrainStatus::Out | TrainStatus::EndOfService)
    }

    /// `true` once the train has entered and until it has left.
    #[inline]
    pub fn is_on_scenery(self) -> bool {
        !matches!(self, TrainStatus::Inactive | TrainStatus::Out)
    }

    pub fn text(self) -> &'static str {
        match self {
            TrainStatus::Inactive     => "Inactive",
            TrainStatus::Running      => "Running",
            TrainStatus::Stopped      => "Stopped at station",
            TrainStatus::Waiting      => "Waiting at red signal",
            TrainStatus::Out          => "Exited the area",
            TrainStatus::EndOfService => "End of service",
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
