#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod core;

pub use crate::core::alerts::engine::ProximityAlertEngine;
pub use crate::core::coordinator::RadarCoordinator;
pub use crate::core::scheduler::{AlertScheduler, AlertSignal};
pub use crate::core::tracker::ObjectTracker;
