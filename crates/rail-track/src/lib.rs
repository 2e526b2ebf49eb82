//! `rail-track` — the track network trains run on.
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`item`]      | `TrackItem`, `TrackItemKind` (line / signal / end)        |
//! | [`signal`]    | `SignalAspect`, `SignalAction`, `Target`, `SignalState`   |
//! | [`position`]  | `Position` — a point on the network plus a direction      |
//! | [`occupancy`] | Per-item intervals occupied by trains                     |
//! | [`network`]   | `TrackNetwork`, `TrackNetworkBuilder`, `TrackEvent`       |
//! | [`error`]     | `TrackError`, `TrackResult`                               |
//!
//! The network knows nothing about train physics.  Trains walk it through
//! `Position`, register the stretch they cover, and notify items when their
//! head enters or their tail leaves.  Signal aspects are written by an
//! external signalling layer through [`TrackNetwork::set_signal_aspect`].

pub mod error;
pub mod item;
pub mod network;
pub mod occupancy;
pub mod position;
pub mod signal;

#[cfg(test)]
mod tests;

pub use error::{TrackError, TrackResult};
pub use item::{TrackItem, TrackItemKind};
pub use network::{TrackEvent, TrackNetwork, TrackNetworkBuilder};
pub use occupancy::{Occupancy, Occupation};
pub use position::Position;
pub use signal::{SignalAction, SignalAspect, SignalState, Target};
