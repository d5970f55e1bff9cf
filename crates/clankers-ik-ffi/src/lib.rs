//! C interface for Clankers analytic IK solvers.
//!
//! Internally results stay in [`FlatSolutions`]; they become a raw
//! [`IkSolutionListC`] only at this boundary. The generic entry points
//! ([`compute_ik_c`], [`free_ik_solution_list`], [`compute_fk_c`]) work with
//! any [`AnalyticIkSolver`], and [`export_ik_c_interface!`] turns one
//! concrete solver into `extern "C"` symbols.
//!
//! This crate exports a [`PlanarArmSolver`] built from the TOML file named
//! by `CLANKERS_IK_CONFIG`, or the default three-link arm when unset.
//!
//! ```c
//! IkSolutionListC list;
//! if (clankers_ik_compute(eetrans, eerot, NULL, &list)) {
//!     for (int i = 0; i < list.num_solutions; ++i) {
//!         const double* q = list.solutions + i * list.num_joints;
//!         /* ... */
//!     }
//!     clankers_ik_free_solution_list(&list);
//! }
//! ```

pub mod abi;
pub mod boundary;
#[macro_use]
mod export;

use tracing::{debug, warn};

pub use abi::{count_to_c_int, IkSolutionListC};
pub use boundary::{compute_fk_c, compute_ik_c, free_ik_solution_list};
pub use clankers_ik::{AnalyticIkSolver, FlatSolutions, IkReal, IkType, PlanarArmSolver};

/// Environment variable naming the TOML config of the exported arm.
pub const CONFIG_ENV: &str = "CLANKERS_IK_CONFIG";

/// Build the exported solver from [`CONFIG_ENV`], falling back to the
/// default arm if the variable is unset or the file is invalid.
pub fn planar_solver_from_env() -> PlanarArmSolver {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return PlanarArmSolver::default();
    };
    match PlanarArmSolver::from_file(&path) {
        Ok(solver) => {
            debug!(
                "clankers-ik-ffi: loaded arm {} from {}",
                solver.kinematics_hash(),
                path.to_string_lossy()
            );
            solver
        }
        Err(e) => {
            warn!(
                "clankers-ik-ffi: failed to load {}: {e}; using default arm",
                path.to_string_lossy()
            );
            PlanarArmSolver::default()
        }
    }
}

export_ik_c_interface!(PlanarArmSolver, planar_solver_from_env());
