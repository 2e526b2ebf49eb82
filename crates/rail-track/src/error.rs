//! Track-network error type.

use thiserror::Error;

use rail_core::TrackItemId;

/// Errors produced by `rail-track`.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track item {0} not found")]
    ItemNotFound(TrackItemId),

    #[error("track item {0} is not a signal")]
    NotASignal(TrackItemId),

    #[error("track item {0} has no free end to connect")]
    TooManyLinks(TrackItemId),

    #[error("track item {item} is missing {missing} neighbour(s)")]
    Unconnected { item: TrackItemId, missing: usize },

    #[error("track item {item} has invalid {what} {value}")]
    InvalidValue { item: TrackItemId, what: &'static str, value: f64 },

    #[error("position references {0}, which does not continue from its previous item")]
    InvalidPosition(TrackItemId),
}

pub type TrackResult<T> = Result<T, TrackError>;
