use thiserror::Error;

use rail_core::TrainId;
use rail_track::TrackError;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("no service with code {0:?}")]
    UnknownService(String),

    #[error("no train type with code {0:?}")]
    UnknownTrainType(String),

    #[error("{0} is not stopped")]
    NotStopped(TrainId),

    #[error("{0} cannot be split")]
    NotSplittable(TrainId),

    #[error("split index {index} is outside 1..{elements}")]
    SplitIndexOutOfRange { index: usize, elements: usize },

    #[error("no train type matches elements {elements:?}")]
    NoMatchingType { elements: Vec<String> },

    #[error("{0} has left the network")]
    NotOnNetwork(TrainId),

    #[error("track error: {0}")]
    Track(#[from] TrackError),
}

pub type TrainResult<T> = Result<T, TrainError>;
