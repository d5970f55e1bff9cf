//! Integration test: C boundary of the IK marshaler.
//!
//! Covers the caller-visible contract:
//! 1. Success publishes matching counts and a buffer of exactly N x J values
//! 2. Zero solutions publish a null buffer
//! 3. Failures (including oversized or overflowing counts) return false and
//!    leave the output struct untouched
//! 4. Null required pointers are rejected before the solver runs
//! 5. Release is idempotent
//! 6. The exported planar-arm symbols round-trip through FK

use std::ffi::CStr;
use std::os::raw::c_int;
use std::ptr;

use approx::assert_relative_eq;

use clankers_core::PlanarArmConfig;
use clankers_ik::{EndEffectorPose, IkSolutionList, PlanarArmSolver};
use clankers_ik_ffi::*;
use clankers_test_utils::{fixed_solutions, ScriptedSolver};

const TRANS: [f64; 3] = [0.3, 0.2, 0.0];
const ROT: [f64; 9] = EndEffectorPose::IDENTITY_ROTATION;

fn sentinel() -> IkSolutionListC {
    IkSolutionListC {
        num_joints: -7,
        num_solutions: -9,
        solutions: 0xdead_usize as *mut f64,
    }
}

fn assert_untouched(list: &IkSolutionListC) {
    assert_eq!(list.num_joints, -7);
    assert_eq!(list.num_solutions, -9);
    assert_eq!(list.solutions as usize, 0xdead);
}

fn solve<S: AnalyticIkSolver>(solver: &S, free: *const f64, out: &mut IkSolutionListC) -> bool {
    unsafe { compute_ik_c(solver, TRANS.as_ptr(), ROT.as_ptr(), free, out) }
}

// ---------------------------------------------------------------------------
// Generic entry points
// ---------------------------------------------------------------------------

#[test]
fn success_publishes_counts_and_buffer() {
    let solver = ScriptedSolver::returning(3, fixed_solutions(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]));
    let mut out = IkSolutionListC::new();

    assert!(solve(&solver, ptr::null(), &mut out));
    assert_eq!(out.num_joints, 3);
    assert_eq!(out.num_solutions, 2);
    assert!(!out.solutions.is_null());
    assert_eq!(unsafe { out.as_slice() }, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(solver.calls(), 1);

    unsafe { free_ik_solution_list(&mut out) };
}

#[test]
fn zero_solutions_publish_null_buffer() {
    let solver = ScriptedSolver::returning(6, IkSolutionList::new());
    let mut out = sentinel();

    assert!(solve(&solver, ptr::null(), &mut out));
    assert_eq!(out.num_joints, 6);
    assert_eq!(out.num_solutions, 0);
    assert!(out.solutions.is_null());
}

#[test]
fn solver_failure_leaves_output_untouched() {
    let solver = ScriptedSolver::failing(6);
    let mut out = sentinel();

    assert!(!solve(&solver, ptr::null(), &mut out));
    assert_untouched(&out);
    assert_eq!(solver.calls(), 1);
}

#[test]
fn null_translation_skips_solver() {
    let solver = ScriptedSolver::returning(1, fixed_solutions(&[&[0.0]]));
    let mut out = sentinel();

    let ok = unsafe { compute_ik_c(&solver, ptr::null(), ROT.as_ptr(), ptr::null(), &mut out) };
    assert!(!ok);
    assert_untouched(&out);
    assert_eq!(solver.calls(), 0);
}

#[test]
fn null_rotation_skips_solver() {
    let solver = ScriptedSolver::returning(1, fixed_solutions(&[&[0.0]]));
    let mut out = sentinel();

    let ok = unsafe { compute_ik_c(&solver, TRANS.as_ptr(), ptr::null(), ptr::null(), &mut out) };
    assert!(!ok);
    assert_untouched(&out);
    assert_eq!(solver.calls(), 0);
}

#[test]
fn null_output_skips_solver() {
    let solver = ScriptedSolver::returning(1, fixed_solutions(&[&[0.0]]));
    let ok = unsafe {
        compute_ik_c(&solver, TRANS.as_ptr(), ROT.as_ptr(), ptr::null(), ptr::null_mut())
    };
    assert!(!ok);
    assert_eq!(solver.calls(), 0);
}

#[test]
fn null_free_parameters_rejected_when_required() {
    let solver = ScriptedSolver::returning(2, fixed_solutions(&[&[0.0, 1.0]])).with_free_indices(vec![0]);
    let mut out = sentinel();

    assert!(!solve(&solver, ptr::null(), &mut out));
    assert_untouched(&out);
    assert_eq!(solver.calls(), 0);
}

#[test]
fn joint_count_beyond_c_int_fails_untouched() {
    let solver = ScriptedSolver::returning(usize::MAX, IkSolutionList::new());
    let mut out = sentinel();

    assert!(!solve(&solver, ptr::null(), &mut out));
    assert_untouched(&out);
    assert_eq!(solver.calls(), 1);
}

#[test]
fn oversized_buffer_fails_untouched() {
    let solver = ScriptedSolver::returning(usize::MAX / 2, fixed_solutions(&[&[0.0], &[1.0], &[2.0]]));
    let mut out = sentinel();

    assert!(!solve(&solver, ptr::null(), &mut out));
    assert_untouched(&out);
}

#[test]
fn mismatched_solution_width_fails_untouched() {
    let solver = ScriptedSolver::returning(0, fixed_solutions(&[&[1.0, 2.0]]));
    let mut out = sentinel();

    assert!(!solve(&solver, ptr::null(), &mut out));
    assert_untouched(&out);
}

#[test]
fn release_twice_is_safe() {
    let solver = ScriptedSolver::returning(2, fixed_solutions(&[&[0.1, 0.2], &[0.3, 0.4]]));
    let mut out = IkSolutionListC::new();
    assert!(solve(&solver, ptr::null(), &mut out));

    for _ in 0..2 {
        unsafe { free_ik_solution_list(&mut out) };
        assert!(out.solutions.is_null());
        assert_eq!(out.num_solutions, 0);
    }
}

#[test]
fn release_null_pointer_is_noop() {
    unsafe { free_ik_solution_list(ptr::null_mut()) };
}

#[test]
fn free_parameters_expand_into_buffer() {
    let solver =
        PlanarArmSolver::new(PlanarArmConfig::with_links(vec![0.2, 0.3, 0.25, 0.1])).unwrap();
    let q = [-0.4, 0.5, 0.7, -0.2];
    let pose = solver.compute_fk(&q);
    let free = [q[0]];
    let mut out = IkSolutionListC::new();

    let ok = unsafe {
        compute_ik_c(
            &solver,
            pose.translation.as_ptr(),
            pose.rotation.as_ptr(),
            free.as_ptr(),
            &mut out,
        )
    };
    assert!(ok);
    assert_eq!(out.num_joints, 4);
    assert_eq!(out.num_solutions, 2);

    let direct = solver.compute_ik(&pose, &free).unwrap();
    let data = unsafe { out.as_slice() };
    for (i, solution) in direct.iter().enumerate() {
        assert_eq!(&data[i * 4..(i + 1) * 4], solution.expand(&free).unwrap().as_slice());
        assert_relative_eq!(data[i * 4], q[0]);
    }

    unsafe { free_ik_solution_list(&mut out) };
}

// ---------------------------------------------------------------------------
// Exported symbols (default three-link arm)
// ---------------------------------------------------------------------------

#[test]
fn exported_metadata() {
    assert_eq!(clankers_ik_num_joints(), 3);
    assert_eq!(clankers_ik_num_free_parameters(), 0);
    assert!(clankers_ik_free_indices().is_null());
    assert_eq!(clankers_ik_real_size(), 8);
    assert_eq!(clankers_ik_type(), IkType::TranslationXYOrientation3D.code());

    let hash = unsafe { CStr::from_ptr(clankers_ik_kinematics_hash()) };
    assert_eq!(hash.to_str().unwrap(), "planar-3r:0.3,0.25,0.1");
}

#[test]
fn exported_fk_ik_roundtrip() {
    let q = [0.4, -0.7, 0.2];
    let mut trans = [0.0; 3];
    let mut rot = [0.0; 9];
    assert!(unsafe { clankers_ik_compute_fk(q.as_ptr(), trans.as_mut_ptr(), rot.as_mut_ptr()) });

    let mut out = IkSolutionListC::new();
    assert!(unsafe { clankers_ik_compute(trans.as_ptr(), rot.as_ptr(), ptr::null(), &mut out) });
    assert_eq!(out.num_joints, 3);
    assert_eq!(out.num_solutions, 2);

    let joints = out.num_joints as usize;
    let data = unsafe { out.as_slice() }.to_vec();
    for row in data.chunks_exact(joints) {
        let mut t = [0.0; 3];
        let mut r = [0.0; 9];
        assert!(unsafe { clankers_ik_compute_fk(row.as_ptr(), t.as_mut_ptr(), r.as_mut_ptr()) });
        for (a, b) in t.iter().zip(&trans) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
        for (a, b) in r.iter().zip(&rot) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }

    unsafe { clankers_ik_free_solution_list(&mut out) };
    unsafe { clankers_ik_free_solution_list(&mut out) };
    assert!(out.solutions.is_null());
    assert_eq!(out.num_solutions, 0);
}

#[test]
fn exported_off_plane_pose_fails_untouched() {
    let trans = [0.3, 0.0, 0.5];
    let mut out = sentinel();
    let ok = unsafe { clankers_ik_compute(trans.as_ptr(), ROT.as_ptr(), ptr::null(), &mut out) };
    assert!(!ok);
    assert_untouched(&out);
}

#[test]
fn exported_counts_fit_c_int() {
    let joints: c_int = clankers_ik_num_joints();
    assert!(joints > 0);
}
