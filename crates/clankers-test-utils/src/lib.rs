//! Shared test fixtures and utilities for Clankers IK crates.
//!
//! Provides scripted mock solvers and deterministic RNG setup.

pub mod mocks;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use mocks::{fixed_solutions, ScriptedSolver};
pub use rng::{random_joint_angles, seeded_rng};
