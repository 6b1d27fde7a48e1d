// Proximity alerting.
//
// Architecture:
// - model.rs: Alert settings, modes, sounds and outcomes
// - categories.rs: Per-category capability table (visibility, tethers, colors)
// - engine.rs: Per-entity alert state, cooldown and highlight tracking

pub mod categories;
pub mod engine;
pub mod model;
