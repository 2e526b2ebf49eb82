//! Notifications emitted by trains.

use rail_core::TrainId;

use crate::TrainStatus;

/// Something a train did that observers may want to know about.
#[derive(Clone, Debug, PartialEq)]
pub enum TrainEvent {
    StatusChanged        { train: TrainId, from: TrainStatus, to: TrainStatus },
    StoppedAtStation     { train: TrainId, place_code: String },
    DepartedFromStation  { train: TrainId, place_code: String },
    PassedPlace          { train: TrainId, place_code: String },
    ExitedArea           { train: TrainId },
    /// A split produced this train; it waits for a service assignment.
    ReassignServiceRequested { train: TrainId },
    /// The operator asked to split this train.
    SplitRequested       { train: TrainId },
}

impl TrainEvent {
    pub fn train(&self) -> TrainId {
        match self {
            TrainEvent::StatusChanged { train, .. }
            | TrainEvent::StoppedAtStation { train, .. }
            | TrainEvent::DepartedFromStation { train, .. }
            | TrainEvent::PassedPlace { train, .. }
            | TrainEvent::ExitedArea { train }
            | TrainEvent::ReassignServiceRequested { train }
            | TrainEvent::SplitRequested { train } => *train,
        }
    }

    /// Short machine-readable name, used as the event column in output files.
    pub fn kind(&self) -> &'static str {
        match self {
            TrainEvent::StatusChanged { .. }            => "status_changed",
            TrainEvent::StoppedAtStation { .. }         => "stopped_at_station",
            TrainEvent::DepartedFromStation { .. }      => "departed_from_station",
            TrainEvent::PassedPlace { .. }              => "passed_place",
            TrainEvent::ExitedArea { .. }               => "exited_area",
            TrainEvent::ReassignServiceRequested { .. } => "reassign_service_requested",
            TrainEvent::SplitRequested { .. }           => "split_requested",
        }
    }

    /// Free-form detail for the event, empty when there is none.
    pub fn detail(&self) -> String {
        match self {
            TrainEvent::StatusChanged { from, to, .. } => format!("{from:?} -> {to:?}"),
            TrainEvent::StoppedAtStation { place_code, .. }
            | TrainEvent::DepartedFromStation { place_code, .. }
            | TrainEvent::PassedPlace { place_code, .. } => place_code.clone(),
            _ => String::new(),
        }
    }
}
