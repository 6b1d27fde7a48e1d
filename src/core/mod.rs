pub mod alerts;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod notify;
pub mod scheduler;
pub mod sim;
pub mod tracker;
pub mod world;
