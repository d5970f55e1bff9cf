//! Serial kinematic chain used for forward kinematics.
//!
//! A [`KinematicChain`] is an ordered list of joints from the base link to
//! the end-effector. It stores the static transforms (origins), joint axes
//! and limits needed to evaluate forward kinematics and to filter solver
//! output against joint ranges.

use std::f64::consts::TAU;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, UnitVector3, Vector3};

use clankers_core::PlanarArmConfig;

use crate::solution::IkReal;

/// A single revolute joint in the kinematic chain.
#[derive(Debug, Clone)]
pub struct ChainJoint {
    /// Static transform from the previous joint frame to this joint frame.
    pub origin: Isometry3<IkReal>,
    /// Joint axis in the joint's local frame.
    pub axis: UnitVector3<IkReal>,
    /// Lower position limit (rad).
    pub lower_limit: IkReal,
    /// Upper position limit (rad).
    pub upper_limit: IkReal,
}

impl ChainJoint {
    /// Shift a revolute angle by whole turns so it lies within the limits.
    ///
    /// Returns `None` if no equivalent angle fits.
    pub fn fit_angle(&self, angle: IkReal) -> Option<IkReal> {
        let shifted = if angle < self.lower_limit {
            angle + TAU * ((self.lower_limit - angle) / TAU).ceil()
        } else if angle > self.upper_limit {
            angle - TAU * ((angle - self.upper_limit) / TAU).ceil()
        } else {
            angle
        };
        (shifted >= self.lower_limit && shifted <= self.upper_limit).then_some(shifted)
    }
}

/// An ordered kinematic chain from base to end-effector.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    /// Ordered joints from base to end-effector.
    joints: Vec<ChainJoint>,
    /// Transform from the last joint frame to the end-effector frame.
    ee_offset: Isometry3<IkReal>,
}

impl KinematicChain {
    /// Build the chain of a planar revolute arm.
    ///
    /// Joint 0 sits at the base origin. Each following joint (and finally
    /// the tool point) is offset along the local +X axis by the preceding
    /// link length. All axes are +Z. Joints without configured limits are
    /// unbounded.
    pub fn planar(config: &PlanarArmConfig) -> Self {
        let mut joints = Vec::with_capacity(config.link_lengths.len());
        let mut previous_link = 0.0;

        for (i, &length) in config.link_lengths.iter().enumerate() {
            let (lower, upper) = config
                .joint_limits
                .as_ref()
                .and_then(|limits| limits.get(i))
                .map_or((IkReal::NEG_INFINITY, IkReal::INFINITY), |&[lo, hi]| {
                    (lo, hi)
                });

            joints.push(ChainJoint {
                origin: Isometry3::translation(previous_link, 0.0, 0.0),
                axis: Vector3::z_axis(),
                lower_limit: lower,
                upper_limit: upper,
            });
            previous_link = length;
        }

        Self {
            joints,
            ee_offset: Isometry3::translation(previous_link, 0.0, 0.0),
        }
    }

    /// Number of actuated degrees of freedom.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    /// Access the joint definitions.
    pub fn joints(&self) -> &[ChainJoint] {
        &self.joints
    }

    /// Compute forward kinematics: joint positions -> end-effector pose.
    ///
    /// Returns the end-effector pose in the base frame.
    ///
    /// # Panics
    ///
    /// Panics if `q.len() != self.dof()`.
    pub fn forward_kinematics(&self, q: &[IkReal]) -> Isometry3<IkReal> {
        assert_eq!(q.len(), self.dof(), "q.len() must equal chain DOF");

        let mut transform = Isometry3::identity();
        for (joint, &position) in self.joints.iter().zip(q.iter()) {
            transform *= joint.origin;
            transform *= joint_transform(&joint.axis, position);
        }
        transform * self.ee_offset
    }

    /// True if every joint position lies within its limits.
    pub fn within_limits(&self, q: &[IkReal]) -> bool {
        self.joints
            .iter()
            .zip(q)
            .all(|(joint, &v)| v >= joint.lower_limit && v <= joint.upper_limit)
    }
}

/// Rotation of a revolute joint at a given angle.
fn joint_transform(axis: &UnitVector3<IkReal>, angle: IkReal) -> Isometry3<IkReal> {
    Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_axis_angle(axis, angle),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
