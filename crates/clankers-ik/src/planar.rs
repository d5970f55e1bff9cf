//! Closed-form IK for planar revolute arms.
//!
//! The arm lies in the XY plane with every joint rotating about +Z. The
//! last three joints are solved analytically: the tool heading fixes the
//! wrist point, the wrist point fixes the elbow by the law of cosines, and
//! the final joint absorbs the remaining heading. Joints before the last
//! three are free parameters.

use std::f64::consts::{PI, TAU};

use clankers_core::{ConfigError, PlanarArmConfig};

use crate::chain::KinematicChain;
use crate::solution::{IkReal, IkSolution, IkSolutionList, JointSolutionBase};
use crate::solver::{AnalyticIkSolver, EndEffectorPose, IkType};

/// Analytic solver for a planar arm described by a [`PlanarArmConfig`].
#[derive(Debug, Clone)]
pub struct PlanarArmSolver {
    config: PlanarArmConfig,
    chain: KinematicChain,
    free_indices: Vec<usize>,
    hash: String,
}

impl PlanarArmSolver {
    /// Build a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`PlanarArmConfig::validate`].
    pub fn new(config: PlanarArmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Load the arm geometry from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        PlanarArmConfig::from_file(path).map(Self::from_validated)
    }

    fn from_validated(config: PlanarArmConfig) -> Self {
        let chain = KinematicChain::planar(&config);
        let free_indices = (0..config.num_free_parameters()).collect();
        let lengths: Vec<String> = config.link_lengths.iter().map(ToString::to_string).collect();
        let hash = format!("planar-{}r:{}", config.num_joints(), lengths.join(","));
        Self {
            config,
            chain,
            free_indices,
            hash,
        }
    }

    pub fn config(&self) -> &PlanarArmConfig {
        &self.config
    }

    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    /// Extract `(x, y, heading)` if `pose` lies in the arm's plane.
    fn planar_target(&self, pose: &EndEffectorPose) -> Option<(IkReal, IkReal, IkReal)> {
        let tol = self.config.tolerance;
        let r = &pose.rotation;
        let t = &pose.translation;

        let about_z = r[2].abs() <= tol
            && r[5].abs() <= tol
            && r[6].abs() <= tol
            && r[7].abs() <= tol
            && (r[8] - 1.0).abs() <= tol
            && (r[0] - r[4]).abs() <= tol
            && (r[1] + r[3]).abs() <= tol
            && (r[0] * r[0] + r[3] * r[3] - 1.0).abs() <= tol;

        if !about_z || t[2].abs() > tol {
            return None;
        }
        Some((t[0], t[1], r[3].atan2(r[0])))
    }
}

impl Default for PlanarArmSolver {
    fn default() -> Self {
        Self::from_validated(PlanarArmConfig::default())
    }
}

impl AnalyticIkSolver for PlanarArmSolver {
    fn num_joints(&self) -> usize {
        self.config.num_joints()
    }

    fn free_indices(&self) -> &[usize] {
        &self.free_indices
    }

    fn ik_type(&self) -> IkType {
        IkType::TranslationXYOrientation3D
    }

    fn kinematics_hash(&self) -> &str {
        &self.hash
    }

    fn compute_ik(&self, pose: &EndEffectorPose, free: &[IkReal]) -> Option<IkSolutionList> {
        let nf = self.free_indices.len();
        if free.len() != nf || !pose.is_finite() || free.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let (x, y, phi) = self.planar_target(pose)?;
        let tol = self.config.tolerance;
        let lengths = &self.config.link_lengths;

        // Frame at the base of the solved sub-chain, after the free joints.
        let mut heading = 0.0;
        let (mut px, mut py) = (0.0, 0.0);
        for (&q, &len) in free.iter().zip(lengths) {
            heading += q;
            px += len * heading.cos();
            py += len * heading.sin();
        }

        let (a, b, c) = (lengths[nf], lengths[nf + 1], lengths[nf + 2]);
        let wx = x - c * phi.cos() - px;
        let wy = y - c * phi.sin() - py;
        let (sh, ch) = heading.sin_cos();
        let dx = ch * wx + sh * wy;
        let dy = -sh * wx + ch * wy;
        let phi_rel = phi - heading;

        let mut solutions = IkSolutionList::new();

        let cos_elbow = (dx * dx + dy * dy - a * a - b * b) / (2.0 * a * b);
        if cos_elbow.abs() > 1.0 + tol {
            return Some(solutions);
        }
        let elbow = cos_elbow.clamp(-1.0, 1.0).acos();
        let elbows = [elbow, -elbow];
        // Fully stretched or folded: both branches coincide.
        let branches = if 1.0 - cos_elbow.abs() <= tol { 1 } else { 2 };

        let mut joints = free.to_vec();
        joints.extend([0.0; 3]);
        for &q2 in &elbows[..branches] {
            let q1 = wrap_angle(dy.atan2(dx) - (b * q2.sin()).atan2(a + b * q2.cos()));
            let q3 = wrap_angle(phi_rel - q1 - q2);
            let solved = [q1, wrap_angle(q2), q3];
            let fitted = self.chain.joints()[nf..]
                .iter()
                .zip(solved)
                .map(|(joint, q)| joint.fit_angle(q))
                .collect::<Option<Vec<_>>>();
            let Some(fitted) = fitted else {
                continue;
            };
            joints[nf..].copy_from_slice(&fitted);
            if !self.chain.within_limits(&joints) {
                continue;
            }

            let bases = (0..nf)
                .map(JointSolutionBase::free)
                .chain(joints[nf..].iter().map(|&v| JointSolutionBase::fixed(v)))
                .collect();
            solutions.add_solution(IkSolution::new(bases, self.free_indices.clone()));
        }

        Some(solutions)
    }

    fn compute_fk(&self, joints: &[IkReal]) -> EndEffectorPose {
        EndEffectorPose::from_isometry(&self.chain.forward_kinematics(joints))
    }
}

/// Wrap an angle into `[-pi, pi)`.
fn wrap_angle(angle: IkReal) -> IkReal {
    angle - TAU * ((angle + PI) / TAU).floor()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
