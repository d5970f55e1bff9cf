//! C-compatible layout of a flattened solution list.

use std::os::raw::c_int;
use std::ptr;

use clankers_core::IkError;
use clankers_ik::{FlatSolutions, IkReal};

/// Flattened IK solutions as seen by C callers.
///
/// **Memory Layout (16 bytes on 64-bit targets)**:
/// - Offset 0: `num_joints` (c_int, 4 bytes)
/// - Offset 4: `num_solutions` (c_int, 4 bytes)
/// - Offset 8: `solutions` (pointer, 8 bytes)
///
/// `solutions` points to `num_solutions * num_joints` values, row-major by
/// solution, or is null when there are no solutions. The buffer is owned by
/// the struct until [`IkSolutionListC::release`] (or the exported free
/// function) runs. Callers must not edit the counts of a populated list.
#[repr(C)]
#[derive(Debug)]
pub struct IkSolutionListC {
    pub num_joints: c_int,
    pub num_solutions: c_int,
    pub solutions: *mut IkReal,
}

impl IkSolutionListC {
    /// Empty list with a null buffer.
    pub const fn new() -> Self {
        Self {
            num_joints: 0,
            num_solutions: 0,
            solutions: ptr::null_mut(),
        }
    }

    /// Hand the buffer of `flat` over to a C-owned list.
    ///
    /// # Errors
    ///
    /// [`IkError::CountOverflow`] if either count exceeds `c_int`. The
    /// buffer is freed in that case.
    pub fn from_flat(flat: FlatSolutions) -> Result<Self, IkError> {
        let num_joints = c_int::try_from(flat.num_joints())
            .map_err(|_| IkError::CountOverflow(flat.num_joints()))?;
        let num_solutions = c_int::try_from(flat.num_solutions())
            .map_err(|_| IkError::CountOverflow(flat.num_solutions()))?;

        let solutions = if flat.is_empty() {
            ptr::null_mut()
        } else {
            Box::into_raw(flat.into_boxed_slice()).cast::<IkReal>()
        };

        Ok(Self {
            num_joints,
            num_solutions,
            solutions,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_null()
    }

    /// Number of values in the buffer.
    #[allow(clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        if self.solutions.is_null() {
            return 0;
        }
        (self.num_solutions.max(0) as usize) * (self.num_joints.max(0) as usize)
    }

    /// View the buffer.
    ///
    /// # Safety
    ///
    /// The list must have been produced by [`IkSolutionListC::from_flat`]
    /// (directly or through the compute entry point) and not released.
    pub unsafe fn as_slice(&self) -> &[IkReal] {
        if self.solutions.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.solutions, self.len()) }
    }

    /// Free the buffer if present, then null it and zero the solution count.
    /// A second call is a no-op.
    ///
    /// # Safety
    ///
    /// Same as [`IkSolutionListC::as_slice`]: the buffer must come from this
    /// crate and its counts must be unchanged since it was populated.
    pub unsafe fn release(&mut self) {
        if !self.solutions.is_null() {
            let len = self.len();
            let slice = ptr::slice_from_raw_parts_mut(self.solutions, len);
            drop(unsafe { Box::from_raw(slice) });
        }
        self.solutions = ptr::null_mut();
        self.num_solutions = 0;
    }
}

impl Default for IkSolutionListC {
    fn default() -> Self {
        Self::new()
    }
}

/// Saturating conversion of a count to `c_int`.
pub fn count_to_c_int(count: usize) -> c_int {
    c_int::try_from(count).unwrap_or(c_int::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clankers_ik::{flatten, IkSolution, IkSolutionList, JointSolutionBase};
    use std::mem;

    fn flat_of(rows: &[&[IkReal]]) -> FlatSolutions {
        let list: IkSolutionList = rows
            .iter()
            .map(|row| {
                IkSolution::new(
                    row.iter().map(|&v| JointSolutionBase::fixed(v)).collect(),
                    Vec::new(),
                )
            })
            .collect();
        let joints = rows.first().map_or(0, |r| r.len());
        flatten(&list, joints, &[]).unwrap()
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn ik_solution_list_c_size_and_align() {
        assert_eq!(mem::size_of::<IkSolutionListC>(), 16);
        assert_eq!(mem::align_of::<IkSolutionListC>(), 8);
    }

    #[test]
    fn new_is_empty() {
        let list = IkSolutionListC::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(unsafe { list.as_slice() }.len(), 0);
    }

    #[test]
    fn from_flat_empty_has_null_buffer() {
        let list = IkSolutionListC::from_flat(FlatSolutions::empty(6)).unwrap();
        assert_eq!(list.num_joints, 6);
        assert_eq!(list.num_solutions, 0);
        assert!(list.solutions.is_null());
    }

    #[test]
    fn from_flat_rejects_joint_count_beyond_c_int() {
        let joints = usize::try_from(c_int::MAX).unwrap() + 1;
        assert_eq!(
            IkSolutionListC::from_flat(FlatSolutions::empty(joints)).err(),
            Some(IkError::CountOverflow(joints))
        );
    }

    #[test]
    fn from_flat_transfers_buffer() {
        let mut list = IkSolutionListC::from_flat(flat_of(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap();
        assert_eq!(list.num_joints, 2);
        assert_eq!(list.num_solutions, 2);
        assert_eq!(list.len(), 4);
        assert_eq!(unsafe { list.as_slice() }, &[1.0, 2.0, 3.0, 4.0]);
        unsafe { list.release() };
        assert!(list.solutions.is_null());
    }

    #[test]
    fn release_twice_is_noop() {
        let mut list = IkSolutionListC::from_flat(flat_of(&[&[0.5; 3]])).unwrap();
        for _ in 0..2 {
            unsafe { list.release() };
            assert!(list.solutions.is_null());
            assert_eq!(list.num_solutions, 0);
            assert_eq!(list.num_joints, 3);
        }
    }

    #[test]
    fn count_conversion_saturates() {
        assert_eq!(count_to_c_int(12), 12);
        assert_eq!(count_to_c_int(usize::MAX), c_int::MAX);
    }
}
