//! Shared fixtures: a deterministic two axis planar arm with scripted
//! inverse kinematics, a matching environment, and helpers to build
//! requests and inspect seeds.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::{Translation3, UnitQuaternion, dvector};

use crate::instruction::{CompositeInstruction, CompositeOrder};
use crate::kinematic_traits::{
    JointPositions, KinematicsGateway, PlanningEnvironment, Pose, SceneState, Solutions,
};
use crate::manipulator::ManipulatorInfo;
use crate::planner_error::PlannerError;
use crate::request::PlannerRequest;
use crate::waypoint::{CartesianWaypoint, JointWaypoint, StateWaypoint};

pub const ARM: &str = "arm";
pub const BASE_LINK: &str = "base_link";

/// Two prismatic joints moving the tip in the x/y plane: forward kinematics
/// is simply a translation by the joint values, and inverse kinematics reads
/// the exact answer off the target translation. Entirely deterministic, so
/// nearest neighbor selection and degraded seeds can be asserted precisely.
pub struct PlanarArm {
    joint_names: Vec<String>,
    /// For each offset, an extra IK candidate displaced along x.
    pub extra_offsets: Vec<f64>,
    /// Pretend no inverse solution ever exists.
    pub fail_inverse: bool,
    /// Pretend no inverse solution exists for targets with x above this.
    pub fail_inverse_x_above: Option<f64>,
    /// Pretend the forward solve breaks.
    pub fail_forward: bool,
}

impl PlanarArm {
    pub fn new() -> Self {
        PlanarArm {
            joint_names: vec!["x".to_string(), "y".to_string()],
            extra_offsets: Vec::new(),
            fail_inverse: false,
            fail_inverse_x_above: None,
            fail_forward: false,
        }
    }

    pub fn with_offsets(offsets: &[f64]) -> Self {
        PlanarArm {
            extra_offsets: offsets.to_vec(),
            ..PlanarArm::new()
        }
    }

    pub fn failing_inverse() -> Self {
        PlanarArm {
            fail_inverse: true,
            ..PlanarArm::new()
        }
    }
}

impl KinematicsGateway for PlanarArm {
    fn forward(&self, joints: &JointPositions) -> Result<Pose, PlannerError> {
        if self.fail_forward || joints.len() != 2 {
            return Err(PlannerError::KinematicsFailure(
                "planar arm forward solve failed".to_string(),
            ));
        }
        Ok(Pose::from_parts(
            Translation3::new(joints[0], joints[1], 0.0),
            UnitQuaternion::identity(),
        ))
    }

    fn inverse(&self, pose: &Pose, _seed: &JointPositions) -> Solutions {
        if self.fail_inverse {
            return Vec::new();
        }
        let tx = pose.translation.x;
        let ty = pose.translation.y;
        if let Some(limit) = self.fail_inverse_x_above {
            if tx > limit {
                return Vec::new();
            }
        }
        let mut solutions = vec![dvector![tx, ty]];
        for offset in &self.extra_offsets {
            solutions.push(dvector![tx + offset, ty]);
        }
        solutions
    }

    fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    fn num_joints(&self) -> usize {
        2
    }

    fn base_link_name(&self) -> &str {
        BASE_LINK
    }
}

pub struct TestEnvironment {
    arms: HashMap<String, Arc<dyn KinematicsGateway>>,
}

impl PlanningEnvironment for TestEnvironment {
    fn kinematics(&self, manipulator: &str) -> Option<Arc<dyn KinematicsGateway>> {
        self.arms.get(manipulator).cloned()
    }

    fn find_tcp(&self, info: &ManipulatorInfo) -> Result<Pose, PlannerError> {
        Ok(info.tcp.unwrap_or_else(Pose::identity))
    }
}

pub fn environment(arm: PlanarArm) -> Arc<dyn PlanningEnvironment> {
    let mut arms: HashMap<String, Arc<dyn KinematicsGateway>> = HashMap::new();
    arms.insert(ARM.to_string(), Arc::new(arm));
    Arc::new(TestEnvironment { arms })
}

/// Scene with the arm at (x, y) and the base link at the world origin.
pub fn scene(x: f64, y: f64) -> SceneState {
    scene_with_base(x, y, Pose::identity())
}

pub fn scene_with_base(x: f64, y: f64, base: Pose) -> SceneState {
    let mut state = SceneState::default();
    state.joints.insert("x".to_string(), x);
    state.joints.insert("y".to_string(), y);
    state.link_transforms.insert(BASE_LINK.to_string(), base);
    state
}

pub fn arm_info() -> ManipulatorInfo {
    ManipulatorInfo::new(ARM)
}

pub fn joint_names() -> Vec<String> {
    vec!["x".to_string(), "y".to_string()]
}

pub fn joint_waypoint(x: f64, y: f64) -> JointWaypoint {
    JointWaypoint::new(joint_names(), dvector![x, y]).unwrap()
}

pub fn state_waypoint(x: f64, y: f64) -> StateWaypoint {
    StateWaypoint::new(joint_names(), dvector![x, y]).unwrap()
}

pub fn cartesian_waypoint(x: f64, y: f64) -> CartesianWaypoint {
    CartesianWaypoint::new(Pose::from_parts(
        Translation3::new(x, y, 0.0),
        UnitQuaternion::identity(),
    ))
}

/// An empty program composite addressed to the test arm.
pub fn program() -> CompositeInstruction {
    CompositeInstruction::new("", CompositeOrder::Ordered, arm_info())
}

pub fn request(
    instructions: CompositeInstruction,
    arm: PlanarArm,
    state: SceneState,
) -> PlannerRequest {
    PlannerRequest::new(instructions, state).with_environment(environment(arm))
}

/// Joint positions of every state waypoint in the seed, depth first.
pub fn state_positions(seed: &CompositeInstruction) -> Vec<JointPositions> {
    seed.flattened_moves()
        .iter()
        .map(|mv| match &mv.waypoint {
            crate::waypoint::Waypoint::State(state) => state.positions.clone(),
            other => panic!("expected a state waypoint in the seed, got {:?}", other),
        })
        .collect()
}

pub fn assert_states_close(actual: &[JointPositions], expected: &[[f64; 2]]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "expected {} states, got {}",
        expected.len(),
        actual.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a.len(), 2);
        for axis in 0..2 {
            assert!(
                (a[axis] - e[axis]).abs() < 1e-9,
                "state {} axis {}: expected {}, got {}",
                i,
                axis,
                e[axis],
                a[axis]
            );
        }
    }
}
