//! Flattened IK results.
//!
//! [`compute`] runs a solver once and expands every compact solution into
//! one contiguous buffer, row-major by solution. The buffer is owned by
//! [`FlatSolutions`] and released on drop; [`FlatSolutions::release`] gives
//! callers an explicit, repeatable release.

use tracing::debug;

use clankers_core::IkError;

use crate::solution::{IkReal, IkSolutionList};
use crate::solver::{AnalyticIkSolver, EndEffectorPose};

/// Every solution of one IK request, expanded and laid out contiguously.
///
/// Joint `j` of solution `i` lives at `i * num_joints + j`. An empty result
/// holds no allocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatSolutions {
    num_joints: usize,
    num_solutions: usize,
    data: Vec<IkReal>,
}

impl FlatSolutions {
    /// Result with no solutions for a chain of `num_joints` joints.
    pub const fn empty(num_joints: usize) -> Self {
        Self {
            num_joints,
            num_solutions: 0,
            data: Vec::new(),
        }
    }

    pub fn num_joints(&self) -> usize {
        self.num_joints
    }

    pub fn num_solutions(&self) -> usize {
        self.num_solutions
    }

    pub fn is_empty(&self) -> bool {
        self.num_solutions == 0
    }

    /// All joint values, row-major by solution.
    pub fn as_slice(&self) -> &[IkReal] {
        &self.data
    }

    /// Joint values of solution `index`.
    pub fn solution(&self, index: usize) -> Option<&[IkReal]> {
        if index >= self.num_solutions {
            return None;
        }
        let start = index * self.num_joints;
        Some(&self.data[start..start + self.num_joints])
    }

    /// Iterate solutions in solver order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[IkReal]> + '_ {
        (0..self.num_solutions).map(move |i| {
            let start = i * self.num_joints;
            &self.data[start..start + self.num_joints]
        })
    }

    /// Free the buffer and reset the solution count. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.num_solutions = 0;
    }

    /// Give up the buffer as a boxed slice of exactly
    /// `num_solutions * num_joints` values.
    pub fn into_boxed_slice(self) -> Box<[IkReal]> {
        self.data.into_boxed_slice()
    }
}

/// Expand `list` into a [`FlatSolutions`] for a chain of `num_joints`.
///
/// # Errors
///
/// - [`IkError::Allocation`] if the buffer size overflows or cannot be
///   reserved.
/// - [`IkError::JointCountMismatch`] / [`IkError::FreeIndexOutOfRange`] if a
///   compact solution does not fit the chain or the supplied free values.
pub fn flatten(
    list: &IkSolutionList,
    num_joints: usize,
    free: &[IkReal],
) -> Result<FlatSolutions, IkError> {
    let num_solutions = list.len();
    if num_solutions == 0 {
        return Ok(FlatSolutions::empty(num_joints));
    }

    let elements = num_solutions
        .checked_mul(num_joints)
        .ok_or(IkError::Allocation {
            elements: usize::MAX,
        })?;
    let mut data: Vec<IkReal> = Vec::new();
    data.try_reserve_exact(elements)
        .map_err(|_| IkError::Allocation { elements })?;
    data.resize(elements, 0.0);

    for (i, solution) in list.iter().enumerate() {
        let start = i * num_joints;
        solution.expand_into(&mut data[start..start + num_joints], free)?;
    }

    Ok(FlatSolutions {
        num_joints,
        num_solutions,
        data,
    })
}

/// Solve IK once and flatten the result.
///
/// # Errors
///
/// - [`IkError::FreeParameterCount`] if `free.len()` differs from the
///   solver's free parameter count; the solver is not invoked.
/// - [`IkError::NoSolution`] if the solver rejects the request.
/// - Any error from [`flatten`].
pub fn compute<S: AnalyticIkSolver + ?Sized>(
    solver: &S,
    pose: &EndEffectorPose,
    free: &[IkReal],
) -> Result<FlatSolutions, IkError> {
    let expected = solver.num_free_parameters();
    if free.len() != expected {
        return Err(IkError::FreeParameterCount {
            expected,
            got: free.len(),
        });
    }

    let Some(list) = solver.compute_ik(pose, free) else {
        debug!("clankers-ik: solver rejected pose {:?}", pose.translation);
        return Err(IkError::NoSolution);
    };

    let flat = flatten(&list, solver.num_joints(), free)?;
    debug!(
        "clankers-ik: {} solution(s) x {} joint(s)",
        flat.num_solutions(),
        flat.num_joints()
    );
    Ok(flat)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
