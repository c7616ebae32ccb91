//! Core types and definitions for the BASTION simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, components, commands, state snapshots, events,
//! projectile profiles and constants. It has no dependency on the ECS
//! or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod profiles;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
