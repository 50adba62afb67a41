//! AI module — controllers for visibility-gated enemies.

mod stalker_controller;

pub use stalker_controller::{StalkerController, StalkerTick};
