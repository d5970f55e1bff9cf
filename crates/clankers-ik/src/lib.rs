//! Analytic inverse kinematics for Clankers robots.
//!
//! Defines the contract for closed-form IK solvers, the compact solution
//! representation they emit, and the marshaling step that expands those
//! solutions into one flat joint buffer.
//!
//! # Architecture
//!
//! ```text
//! EndEffectorPose + free params ──► AnalyticIkSolver ──► IkSolutionList ──► FlatSolutions
//! ```
//!
//! [`PlanarArmSolver`] is a ready-made solver for planar revolute arms;
//! its forward kinematics run on a [`KinematicChain`].

pub mod chain;
pub mod flat;
pub mod planar;
pub mod solution;
pub mod solver;

pub use chain::KinematicChain;
pub use flat::{compute, flatten, FlatSolutions};
pub use planar::PlanarArmSolver;
pub use solution::{IkReal, IkSolution, IkSolutionList, JointSolutionBase};
pub use solver::{AnalyticIkSolver, EndEffectorPose, IkType};
