//! TKFIT-Simulation: synthetic basketball telemetry generation
//!
//! Produces reproducible per-second match telemetry for Post and Guard players.

pub mod config;
pub mod generator;
pub mod movement;

pub use config::*;
pub use generator::*;
pub use movement::*;
