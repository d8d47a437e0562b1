//! Traits connecting the seed planner to its kinematics and scene
//! collaborators. The planner never owns a solver; it talks to whatever
//! implements [`KinematicsGateway`] through an `Arc`, the same way a tool or
//! a base would wrap a robot.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::{DVector, Isometry3};

use crate::manipulator::ManipulatorInfo;
use crate::planner_error::PlannerError;

/// Pose of the robot tcp. It contains both Cartesian position and rotation
/// quaternion.
pub type Pose = Isometry3<f64>;

/// Joint positions of one kinematic chain, one value per joint in solver
/// order. Dynamically sized so chains of any degree of freedom can be
/// planned for.
pub type JointPositions = DVector<f64>;

/// Candidate joint configurations returned by an inverse kinematics query.
/// Redundant chains may return several; an empty vector means no solution
/// was found.
pub type Solutions = Vec<JointPositions>;

/// Forward and inverse kinematics of one manipulator.
pub trait KinematicsGateway: Send + Sync {
    /// Forward kinematics: the pose of the chain tip for the given
    /// configuration, relative to the base link and without any tool
    /// applied. A solver that cannot evaluate the configuration returns
    /// [`PlannerError::KinematicsFailure`]; the planner treats that as
    /// fatal because nothing can stand in for a failed forward solve.
    fn forward(&self, joints: &JointPositions) -> Result<Pose, PlannerError>;

    /// Inverse kinematics for a target pose expressed in the base frame
    /// with the tool stripped. The seed biases iterative solvers towards a
    /// region; analytical solvers are free to ignore it. Finding nothing is
    /// expressed by an empty vector, never by an error.
    fn inverse(&self, pose: &Pose, seed: &JointPositions) -> Solutions;

    /// Joint names in solver order.
    fn joint_names(&self) -> &[String];

    fn num_joints(&self) -> usize;

    /// Name of the link the forward poses are expressed in.
    fn base_link_name(&self) -> &str;
}

/// The slice of the environment the planner needs: which kinematics serves a
/// named manipulator, and what tool center point a manipulator info resolves
/// to. Collision state, contact managers and the rest of the environment stay
/// behind this boundary.
pub trait PlanningEnvironment: Send + Sync {
    /// Kinematics for the named manipulator, if the environment knows one.
    fn kinematics(&self, manipulator: &str) -> Option<Arc<dyn KinematicsGateway>>;

    /// The tool center point transform for the given manipulator info,
    /// identity when the info carries no tool.
    fn find_tcp(&self, info: &ManipulatorInfo) -> Result<Pose, PlannerError>;
}

/// Snapshot of the scene at planning time: current joint values and world
/// transforms of the links. Read-only for the duration of a solve.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    /// World transform of each link, keyed by link name.
    pub link_transforms: HashMap<String, Pose>,
    /// Current position of each joint, keyed by joint name.
    pub joints: HashMap<String, f64>,
}

impl SceneState {
    /// Current joint values in the requested order.
    pub fn joint_values(&self, names: &[String]) -> Result<JointPositions, PlannerError> {
        let mut values = DVector::zeros(names.len());
        for (i, name) in names.iter().enumerate() {
            values[i] = *self.joints.get(name).ok_or_else(|| {
                PlannerError::InvalidInput(format!("joint '{}' missing from scene state", name))
            })?;
        }
        Ok(values)
    }

    /// World transform of the named link.
    pub fn link_transform(&self, link: &str) -> Result<Pose, PlannerError> {
        self.link_transforms.get(link).copied().ok_or_else(|| {
            PlannerError::InvalidInput(format!("link '{}' missing from scene state", link))
        })
    }
}
