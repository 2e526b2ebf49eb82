use thiserror::Error;

use rail_core::{CoreError, TrainId};
use rail_schedule::ScheduleError;
use rail_train::TrainError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("timetable error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("train {index}: {source}")]
    InvalidTrain {
        index:  usize,
        #[source]
        source: TrainError,
    },

    #[error("no train with id {0}")]
    UnknownTrain(TrainId),

    #[error(transparent)]
    Train(#[from] TrainError),
}

pub type SimResult<T> = Result<T, SimError>;
