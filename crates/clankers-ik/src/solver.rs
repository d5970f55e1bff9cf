//! Analytic IK solver contract.
//!
//! A solver maps an end-effector pose plus free-parameter values to an
//! ordered [`IkSolutionList`] of compact solutions, and maps joint values
//! back to a pose with forward kinematics.

use nalgebra::{Isometry3, Matrix3};

use crate::solution::{IkReal, IkSolutionList};

/// Which components of the end-effector pose a solver constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum IkType {
    /// Full 6-DOF pose: translation and rotation.
    Transform6D = 1,
    /// Planar translation plus heading about +Z.
    TranslationXYOrientation3D = 5,
}

impl IkType {
    /// Numeric code exposed across the C boundary.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// End-effector pose in the solver's base frame.
///
/// `rotation` is a 3x3 matrix stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndEffectorPose {
    pub translation: [IkReal; 3],
    pub rotation: [IkReal; 9],
}

impl EndEffectorPose {
    pub const IDENTITY_ROTATION: [IkReal; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    pub const fn new(translation: [IkReal; 3], rotation: [IkReal; 9]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pose in the XY plane with heading `theta` about +Z.
    pub fn planar(x: IkReal, y: IkReal, theta: IkReal) -> Self {
        let (s, c) = theta.sin_cos();
        Self {
            translation: [x, y, 0.0],
            rotation: [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Build from an isometry.
    pub fn from_isometry(iso: &Isometry3<IkReal>) -> Self {
        let t = iso.translation.vector;
        let r = iso.rotation.to_rotation_matrix();
        let m = r.matrix();
        let mut rotation = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                rotation[row * 3 + col] = m[(row, col)];
            }
        }
        Self {
            translation: [t.x, t.y, t.z],
            rotation,
        }
    }

    /// Rotation as an nalgebra matrix (row-major input honored).
    pub fn rotation_matrix(&self) -> Matrix3<IkReal> {
        Matrix3::from_row_slice(&self.rotation)
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.translation.iter().chain(&self.rotation).all(|v| v.is_finite())
    }
}

/// Closed-form IK solver for one specific kinematic chain.
///
/// Implementations must be reentrant: `compute_ik` takes `&self` and may be
/// called concurrently with independent inputs.
pub trait AnalyticIkSolver {
    /// Number of joints in the chain.
    fn num_joints(&self) -> usize;

    /// Number of free parameters the caller must supply.
    fn num_free_parameters(&self) -> usize {
        self.free_indices().len()
    }

    /// Joint indices treated as free parameters, in parameter order.
    fn free_indices(&self) -> &[usize];

    /// Pose components the solver constrains.
    fn ik_type(&self) -> IkType;

    /// Stable description of the chain geometry, used to detect mismatched
    /// solver builds.
    fn kinematics_hash(&self) -> &str;

    /// Solve IK for `pose` given `free` parameter values.
    ///
    /// Returns `None` when the solver rejects the request outright. A
    /// well-formed request with no reachable configuration yields an
    /// empty list.
    fn compute_ik(&self, pose: &EndEffectorPose, free: &[IkReal]) -> Option<IkSolutionList>;

    /// Forward kinematics: joint values to end-effector pose.
    ///
    /// # Panics
    ///
    /// May panic if `joints.len() != self.num_joints()`.
    fn compute_fk(&self, joints: &[IkReal]) -> EndEffectorPose;
}

impl<S: AnalyticIkSolver + ?Sized> AnalyticIkSolver for &S {
    fn num_joints(&self) -> usize {
        (**self).num_joints()
    }

    fn num_free_parameters(&self) -> usize {
        (**self).num_free_parameters()
    }

    fn free_indices(&self) -> &[usize] {
        (**self).free_indices()
    }

    fn ik_type(&self) -> IkType {
        (**self).ik_type()
    }

    fn kinematics_hash(&self) -> &str {
        (**self).kinematics_hash()
    }

    fn compute_ik(&self, pose: &EndEffectorPose, free: &[IkReal]) -> Option<IkSolutionList> {
        (**self).compute_ik(pose, free)
    }

    fn compute_fk(&self, joints: &[IkReal]) -> EndEffectorPose {
        (**self).compute_fk(joints)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
