//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems once per host frame,
//! and produces GameStateSnapshots for the presenter.

pub mod config;
pub mod engine;
pub mod guidance;
pub mod schedule;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use config::SimConfig;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
