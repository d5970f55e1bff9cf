//! Compact IK solutions as emitted by analytic solvers.
//!
//! A closed-form solver does not always fix every joint: joints it treats
//! as free parameters are left symbolic and filled in by the caller. Each
//! [`IkSolution`] therefore stores one [`JointSolutionBase`] per joint,
//! which expands to a concrete value once free parameters are known.

use clankers_core::IkError;

/// Scalar type used for poses and joint values.
pub type IkReal = f64;

/// Compact representation of a single joint's value within a solution.
///
/// The expanded value is `offset + mul * free[free_index]` when the joint
/// depends on a free parameter, and `offset` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSolutionBase {
    pub offset: IkReal,
    pub mul: IkReal,
    pub free_index: Option<usize>,
}

impl JointSolutionBase {
    /// A joint fully determined by the solver.
    pub const fn fixed(value: IkReal) -> Self {
        Self {
            offset: value,
            mul: 0.0,
            free_index: None,
        }
    }

    /// A joint equal to free parameter `index`.
    pub const fn free(index: usize) -> Self {
        Self {
            offset: 0.0,
            mul: 1.0,
            free_index: Some(index),
        }
    }

    /// Expand to a concrete joint value.
    ///
    /// # Errors
    ///
    /// Returns [`IkError::FreeIndexOutOfRange`] if the referenced free
    /// parameter was not supplied.
    pub fn value(&self, free: &[IkReal]) -> Result<IkReal, IkError> {
        match self.free_index {
            None => Ok(self.offset),
            Some(index) => free
                .get(index)
                .map(|&f| self.offset + self.mul * f)
                .ok_or(IkError::FreeIndexOutOfRange {
                    index,
                    available: free.len(),
                }),
        }
    }
}

/// One compact solution: a [`JointSolutionBase`] per joint, plus the
/// indices of joints left free in this solution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IkSolution {
    bases: Vec<JointSolutionBase>,
    free_joints: Vec<usize>,
}

impl IkSolution {
    pub fn new(bases: Vec<JointSolutionBase>, free_joints: Vec<usize>) -> Self {
        Self { bases, free_joints }
    }

    /// Number of joints described by this solution.
    pub fn dof(&self) -> usize {
        self.bases.len()
    }

    pub fn bases(&self) -> &[JointSolutionBase] {
        &self.bases
    }

    /// Joint indices that take their value from a free parameter.
    pub fn free_joints(&self) -> &[usize] {
        &self.free_joints
    }

    /// Expand into `out` in joint-index order.
    ///
    /// # Errors
    ///
    /// [`IkError::JointCountMismatch`] if `out.len() != self.dof()`, or
    /// [`IkError::FreeIndexOutOfRange`] if `free` is too short.
    pub fn expand_into(&self, out: &mut [IkReal], free: &[IkReal]) -> Result<(), IkError> {
        if out.len() != self.bases.len() {
            return Err(IkError::JointCountMismatch {
                expected: out.len(),
                got: self.bases.len(),
            });
        }
        for (slot, base) in out.iter_mut().zip(&self.bases) {
            *slot = base.value(free)?;
        }
        Ok(())
    }

    /// Expand into a freshly allocated joint vector.
    pub fn expand(&self, free: &[IkReal]) -> Result<Vec<IkReal>, IkError> {
        self.bases.iter().map(|b| b.value(free)).collect()
    }
}

/// Ordered list of compact solutions. Order is the solver's emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IkSolutionList {
    solutions: Vec<IkSolution>,
}

impl IkSolutionList {
    pub const fn new() -> Self {
        Self {
            solutions: Vec::new(),
        }
    }

    /// Append a solution and return its index.
    pub fn add_solution(&mut self, solution: IkSolution) -> usize {
        self.solutions.push(solution);
        self.solutions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IkSolution> {
        self.solutions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IkSolution> {
        self.solutions.iter()
    }
}

impl FromIterator<IkSolution> for IkSolutionList {
    fn from_iter<T: IntoIterator<Item = IkSolution>>(iter: T) -> Self {
        Self {
            solutions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a IkSolutionList {
    type Item = &'a IkSolution;
    type IntoIter = std::slice::Iter<'a, IkSolution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fixed_base_ignores_free_parameters() {
        let base = JointSolutionBase::fixed(0.7);
        assert_relative_eq!(base.value(&[]).unwrap(), 0.7);
        assert_relative_eq!(base.value(&[5.0]).unwrap(), 0.7);
    }

    #[test]
    fn free_base_takes_free_value() {
        let base = JointSolutionBase::free(1);
        assert_relative_eq!(base.value(&[0.1, -0.4]).unwrap(), -0.4);
    }

    #[test]
    fn scaled_free_base() {
        let base = JointSolutionBase {
            offset: 0.5,
            mul: -2.0,
            free_index: Some(0),
        };
        assert_relative_eq!(base.value(&[0.25]).unwrap(), 0.0);
    }

    #[test]
    fn free_base_missing_parameter() {
        let base = JointSolutionBase::free(2);
        assert_eq!(
            base.value(&[1.0]),
            Err(IkError::FreeIndexOutOfRange {
                index: 2,
                available: 1
            })
        );
    }

    #[test]
    fn expand_places_free_value_at_free_joint() {
        let solution = IkSolution::new(
            vec![
                JointSolutionBase::free(0),
                JointSolutionBase::fixed(0.2),
                JointSolutionBase::fixed(-0.3),
            ],
            vec![0],
        );
        let q = solution.expand(&[1.5]).unwrap();
        assert_eq!(q, vec![1.5, 0.2, -0.3]);
        assert_eq!(solution.free_joints(), &[0]);
    }

    #[test]
    fn expand_into_checks_length() {
        let solution = IkSolution::new(vec![JointSolutionBase::fixed(0.0); 3], Vec::new());
        let mut out = [0.0; 2];
        assert_eq!(
            solution.expand_into(&mut out, &[]),
            Err(IkError::JointCountMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut list = IkSolutionList::new();
        assert!(list.is_empty());
        let a = list.add_solution(IkSolution::new(vec![JointSolutionBase::fixed(1.0)], vec![]));
        let b = list.add_solution(IkSolution::new(vec![JointSolutionBase::fixed(2.0)], vec![]));
        assert_eq!((a, b), (0, 1));
        assert_eq!(list.len(), 2);
        let values: Vec<_> = list.iter().map(|s| s.expand(&[]).unwrap()[0]).collect();
        assert_eq!(values, vec![1.0, 2.0]);

        assert!(list.get(2).is_none());
    }
}
