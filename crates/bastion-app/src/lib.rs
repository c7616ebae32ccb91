//! BASTION host application.
//!
//! Wires the headless simulation to its external collaborators: a game loop
//! (real-time thread or fixed-step), the presenter seam, and a scripted
//! input source.

pub mod autopilot;
pub mod game_loop;
pub mod presenter;
pub mod state;

pub use bastion_core as core;
