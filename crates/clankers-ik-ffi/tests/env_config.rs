//! Integration test: exported arm configuration from the environment.
//!
//! Runs as its own test binary with a single test, so mutating
//! `CLANKERS_IK_CONFIG` cannot race other tests.

use clankers_ik_ffi::{planar_solver_from_env, AnalyticIkSolver, CONFIG_ENV};

#[test]
fn env_config_loading() {
    let dir = std::env::temp_dir().join("clankers_test_ffi_env_config");
    std::fs::create_dir_all(&dir).unwrap();

    // Unset: default three-link arm
    unsafe { std::env::remove_var(CONFIG_ENV) };
    assert_eq!(planar_solver_from_env().num_joints(), 3);

    // Valid file: four-link arm with one free joint
    let valid = dir.join("arm.toml");
    std::fs::write(&valid, "link_lengths = [0.2, 0.3, 0.25, 0.1]\n").unwrap();
    unsafe { std::env::set_var(CONFIG_ENV, &valid) };
    let solver = planar_solver_from_env();
    assert_eq!(solver.num_joints(), 4);
    assert_eq!(solver.free_indices(), &[0]);

    // Invalid file: falls back to the default arm
    let invalid = dir.join("bad.toml");
    std::fs::write(&invalid, "link_lengths = [0.2]\n").unwrap();
    unsafe { std::env::set_var(CONFIG_ENV, &invalid) };
    assert_eq!(planar_solver_from_env().num_joints(), 3);

    // Missing file: falls back to the default arm
    unsafe { std::env::set_var(CONFIG_ENV, dir.join("missing.toml")) };
    assert_eq!(planar_solver_from_env().num_joints(), 3);

    unsafe { std::env::remove_var(CONFIG_ENV) };

    // Cleanup
    let _ = std::fs::remove_file(&valid);
    let _ = std::fs::remove_file(&invalid);
    let _ = std::fs::remove_dir(&dir);
}
