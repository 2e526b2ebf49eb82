//! `rail-schedule` — what trains are supposed to do.
//!
//! A [`Service`] is an ordered itinerary of [`ServiceLine`]s (one per place
//! the service calls at or passes), plus an optional chained next service
//! and an auto-reverse flag applied when the itinerary ends.
//!
//! | Module       | Contents                                          |
//! |--------------|---------------------------------------------------|
//! | [`service`]  | `Service`, `ServiceLine`                          |
//! | [`registry`] | `ServiceRegistry` (services keyed by code)        |
//! | [`loader`]   | `load_services_csv`, `load_services_reader`       |
//! | [`error`]    | `ScheduleError`, `ScheduleResult`                 |

pub mod error;
pub mod loader;
pub mod registry;
pub mod service;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_services_csv, load_services_reader};
pub use registry::ServiceRegistry;
pub use service::{Service, ServiceLine};
