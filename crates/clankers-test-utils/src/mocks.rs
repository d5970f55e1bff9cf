//! Mock IK solvers for testing.
//!
//! [`ScriptedSolver`] returns a canned response and counts how often it was
//! asked, so marshaling code can be checked without any real kinematics.

use std::sync::atomic::{AtomicUsize, Ordering};

use clankers_ik::{
    AnalyticIkSolver, EndEffectorPose, IkReal, IkSolution, IkSolutionList, IkType,
    JointSolutionBase,
};

// ---------------------------------------------------------------------------
// ScriptedSolver
// ---------------------------------------------------------------------------

/// A solver that always answers with the same response.
pub struct ScriptedSolver {
    num_joints: usize,
    free_indices: Vec<usize>,
    response: Option<IkSolutionList>,
    calls: AtomicUsize,
}

impl ScriptedSolver {
    /// Solver that rejects every request.
    pub const fn failing(num_joints: usize) -> Self {
        Self {
            num_joints,
            free_indices: Vec::new(),
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Solver that returns `solutions` for every request.
    pub fn returning(num_joints: usize, solutions: IkSolutionList) -> Self {
        Self {
            num_joints,
            free_indices: Vec::new(),
            response: Some(solutions),
            calls: AtomicUsize::new(0),
        }
    }

    /// Declare which joints are free parameters.
    #[must_use]
    pub fn with_free_indices(mut self, free_indices: Vec<usize>) -> Self {
        self.free_indices = free_indices;
        self
    }

    /// Number of `compute_ik` invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnalyticIkSolver for ScriptedSolver {
    fn num_joints(&self) -> usize {
        self.num_joints
    }

    fn free_indices(&self) -> &[usize] {
        &self.free_indices
    }

    fn ik_type(&self) -> IkType {
        IkType::Transform6D
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn kinematics_hash(&self) -> &str {
        "scripted"
    }

    fn compute_ik(&self, _pose: &EndEffectorPose, _free: &[IkReal]) -> Option<IkSolutionList> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }

    fn compute_fk(&self, _joints: &[IkReal]) -> EndEffectorPose {
        EndEffectorPose::new([0.0; 3], EndEffectorPose::IDENTITY_ROTATION)
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build a solution list where every joint is fixed to the given values.
pub fn fixed_solutions(rows: &[&[IkReal]]) -> IkSolutionList {
    rows.iter()
        .map(|row| {
            IkSolution::new(
                row.iter().map(|&v| JointSolutionBase::fixed(v)).collect(),
                Vec::new(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
