//! Raw-pointer entry points over any [`AnalyticIkSolver`].
//!
//! Every function validates its pointers before touching the solver and
//! reports failure as `false`, leaving caller-owned output untouched.

use std::ptr;

use tracing::debug;

use clankers_core::IkError;
use clankers_ik::{compute, AnalyticIkSolver, EndEffectorPose, IkReal};

use crate::abi::IkSolutionListC;

/// Solve IK once and publish the flattened result into `solutions`.
///
/// Returns `true` on success. On failure (null input, solver rejection,
/// allocation or count overflow) returns `false` and `*solutions` is not
/// written.
///
/// # Safety
///
/// - `eetrans` must be null or point to 3 readable values.
/// - `eerot` must be null or point to 9 readable values (row-major).
/// - `pfree` must be null or point to `solver.num_free_parameters()` values.
///   It is ignored when the solver has no free parameters.
/// - `solutions` must be null or valid for a write of [`IkSolutionListC`].
pub unsafe fn compute_ik_c<S: AnalyticIkSolver + ?Sized>(
    solver: &S,
    eetrans: *const IkReal,
    eerot: *const IkReal,
    pfree: *const IkReal,
    solutions: *mut IkSolutionListC,
) -> bool {
    let result = unsafe { try_compute_ik(solver, eetrans, eerot, pfree, solutions) };
    match result {
        Ok(list) => {
            unsafe { solutions.write(list) };
            true
        }
        Err(err) => {
            debug!("clankers-ik-ffi: compute failed: {err}");
            false
        }
    }
}

unsafe fn try_compute_ik<S: AnalyticIkSolver + ?Sized>(
    solver: &S,
    eetrans: *const IkReal,
    eerot: *const IkReal,
    pfree: *const IkReal,
    solutions: *mut IkSolutionListC,
) -> Result<IkSolutionListC, IkError> {
    if solutions.is_null() {
        return Err(IkError::NullInput("solutions"));
    }
    let pose = unsafe { read_pose(eetrans, eerot)? };

    let num_free = solver.num_free_parameters();
    let free: &[IkReal] = if num_free == 0 {
        &[]
    } else if pfree.is_null() {
        return Err(IkError::NullInput("pfree"));
    } else {
        unsafe { std::slice::from_raw_parts(pfree, num_free) }
    };

    let flat = compute(solver, &pose, free)?;
    IkSolutionListC::from_flat(flat)
}

unsafe fn read_pose(
    eetrans: *const IkReal,
    eerot: *const IkReal,
) -> Result<EndEffectorPose, IkError> {
    if eetrans.is_null() {
        return Err(IkError::NullInput("eetrans"));
    }
    if eerot.is_null() {
        return Err(IkError::NullInput("eerot"));
    }
    let translation = unsafe { eetrans.cast::<[IkReal; 3]>().read() };
    let rotation = unsafe { eerot.cast::<[IkReal; 9]>().read() };
    Ok(EndEffectorPose::new(translation, rotation))
}

/// Release a list populated by [`compute_ik_c`].
///
/// Null `solutions` is a no-op. Frees the buffer if present, then nulls it
/// and zeroes the solution count, so calling twice is safe.
///
/// # Safety
///
/// `solutions` must be null or point to a list populated by this crate
/// whose counts have not been modified. Concurrent release of the same
/// list is not allowed.
pub unsafe fn free_ik_solution_list(solutions: *mut IkSolutionListC) {
    if let Some(list) = unsafe { solutions.as_mut() } {
        unsafe { list.release() };
    }
}

/// Forward kinematics: write the end-effector pose for `joints`.
///
/// Returns `false` without writing if any pointer is null.
///
/// # Safety
///
/// - `joints` must point to `solver.num_joints()` readable values.
/// - `eetrans` must be valid for 3 writes, `eerot` for 9 writes.
pub unsafe fn compute_fk_c<S: AnalyticIkSolver + ?Sized>(
    solver: &S,
    joints: *const IkReal,
    eetrans: *mut IkReal,
    eerot: *mut IkReal,
) -> bool {
    if joints.is_null() || eetrans.is_null() || eerot.is_null() {
        debug!("clankers-ik-ffi: compute_fk called with null pointer");
        return false;
    }
    let joints = unsafe { std::slice::from_raw_parts(joints, solver.num_joints()) };
    let pose = solver.compute_fk(joints);
    unsafe {
        ptr::copy_nonoverlapping(pose.translation.as_ptr(), eetrans, 3);
        ptr::copy_nonoverlapping(pose.rotation.as_ptr(), eerot, 9);
    }
    true
}
