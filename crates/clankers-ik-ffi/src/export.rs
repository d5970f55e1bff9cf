//! `extern "C"` symbol generation for one concrete solver.

/// Export the C interface for a single solver type.
///
/// `$solver` is the solver type and `$init` an expression building it. The
/// solver is constructed lazily on first use and lives for the rest of the
/// process. Generated symbols:
///
/// | Symbol | Meaning |
/// |--------|---------|
/// | `clankers_ik_compute` | [`compute_ik_c`](crate::compute_ik_c) |
/// | `clankers_ik_free_solution_list` | [`free_ik_solution_list`](crate::free_ik_solution_list) |
/// | `clankers_ik_compute_fk` | [`compute_fk_c`](crate::compute_fk_c) |
/// | `clankers_ik_num_joints` | joint count |
/// | `clankers_ik_num_free_parameters` | free parameter count |
/// | `clankers_ik_free_indices` | free joint indices, null if none |
/// | `clankers_ik_real_size` | `sizeof` of one real value |
/// | `clankers_ik_kinematics_hash` | NUL-terminated geometry description |
/// | `clankers_ik_type` | [`IkType`](crate::IkType) code |
///
/// Invoke at most once per linked artifact; the symbol names are fixed.
#[macro_export]
macro_rules! export_ik_c_interface {
    ($solver:ty, $init:expr $(,)?) => {
        fn __clankers_ik_solver() -> &'static $solver {
            static SOLVER: ::std::sync::OnceLock<$solver> = ::std::sync::OnceLock::new();
            SOLVER.get_or_init(|| $init)
        }

        /// Solve IK for the exported solver.
        ///
        /// # Safety
        ///
        /// See `clankers_ik_ffi::compute_ik_c`.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn clankers_ik_compute(
            eetrans: *const $crate::IkReal,
            eerot: *const $crate::IkReal,
            pfree: *const $crate::IkReal,
            solutions: *mut $crate::IkSolutionListC,
        ) -> bool {
            unsafe { $crate::compute_ik_c(__clankers_ik_solver(), eetrans, eerot, pfree, solutions) }
        }

        /// Release a list filled by `clankers_ik_compute`.
        ///
        /// # Safety
        ///
        /// See `clankers_ik_ffi::free_ik_solution_list`.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn clankers_ik_free_solution_list(
            solutions: *mut $crate::IkSolutionListC,
        ) {
            unsafe { $crate::free_ik_solution_list(solutions) }
        }

        /// Forward kinematics for the exported solver.
        ///
        /// # Safety
        ///
        /// See `clankers_ik_ffi::compute_fk_c`.
        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn clankers_ik_compute_fk(
            joints: *const $crate::IkReal,
            eetrans: *mut $crate::IkReal,
            eerot: *mut $crate::IkReal,
        ) -> bool {
            unsafe { $crate::compute_fk_c(__clankers_ik_solver(), joints, eetrans, eerot) }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_num_joints() -> ::std::os::raw::c_int {
            $crate::count_to_c_int($crate::AnalyticIkSolver::num_joints(__clankers_ik_solver()))
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_num_free_parameters() -> ::std::os::raw::c_int {
            $crate::count_to_c_int($crate::AnalyticIkSolver::num_free_parameters(
                __clankers_ik_solver(),
            ))
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_free_indices() -> *const ::std::os::raw::c_int {
            static INDICES: ::std::sync::OnceLock<::std::vec::Vec<::std::os::raw::c_int>> =
                ::std::sync::OnceLock::new();
            let indices = INDICES.get_or_init(|| {
                $crate::AnalyticIkSolver::free_indices(__clankers_ik_solver())
                    .iter()
                    .map(|&i| $crate::count_to_c_int(i))
                    .collect()
            });
            if indices.is_empty() {
                ::std::ptr::null()
            } else {
                indices.as_ptr()
            }
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_real_size() -> ::std::os::raw::c_int {
            $crate::count_to_c_int(::std::mem::size_of::<$crate::IkReal>())
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_kinematics_hash() -> *const ::std::os::raw::c_char {
            static HASH: ::std::sync::OnceLock<::std::ffi::CString> =
                ::std::sync::OnceLock::new();
            HASH.get_or_init(|| {
                let hash = $crate::AnalyticIkSolver::kinematics_hash(__clankers_ik_solver());
                ::std::ffi::CString::new(hash.replace('\0', "")).unwrap_or_default()
            })
            .as_ptr()
        }

        #[unsafe(no_mangle)]
        pub extern "C" fn clankers_ik_type() -> u32 {
            $crate::AnalyticIkSolver::ik_type(__clankers_ik_solver()).code()
        }
    };
}
