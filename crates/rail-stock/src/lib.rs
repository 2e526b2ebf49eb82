//! `rail-stock` — rolling-stock characteristics.
//!
//! A [`TrainType`] is either a single vehicle or a composition of other
//! registered types (its `elements`).  Compositions can later be split at an
//! element boundary, provided a type exists for each resulting group.
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`train_type`] | `TrainType`                                         |
//! | [`registry`]   | `TrainTypeRegistry`, `TrainTypeRegistryBuilder`     |
//! | [`error`]      | `StockError`, `StockResult`                         |

pub mod error;
pub mod registry;
pub mod train_type;

#[cfg(test)]
mod tests;

pub use error::{StockError, StockResult};
pub use registry::{TrainTypeRegistry, TrainTypeRegistryBuilder};
pub use train_type::TrainType;
