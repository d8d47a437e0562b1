//! Motion request targets. A waypoint names a place the robot should reach,
//! either as a joint configuration, as a Cartesian pose of the tool center
//! point, or as an already resolved robot state. The three kinds form a
//! closed set; every dispatch over them is an exhaustive match, so a missing
//! combination is a compile error rather than a runtime surprise.

use crate::kinematic_traits::{JointPositions, Pose};
use crate::planner_error::PlannerError;

/// A target configuration in joint space. Names and positions are parallel
/// sequences of equal length, enforced at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct JointWaypoint {
    pub joint_names: Vec<String>,
    pub positions: JointPositions,
}

impl JointWaypoint {
    pub fn new(
        joint_names: Vec<String>,
        positions: JointPositions,
    ) -> Result<Self, PlannerError> {
        if joint_names.len() != positions.len() {
            return Err(PlannerError::InvalidInput(format!(
                "joint waypoint has {} names but {} positions",
                joint_names.len(),
                positions.len()
            )));
        }
        Ok(JointWaypoint {
            joint_names,
            positions,
        })
    }
}

/// A target pose of the tool center point in the world frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianWaypoint {
    pub pose: Pose,
}

impl CartesianWaypoint {
    pub fn new(pose: Pose) -> Self {
        CartesianWaypoint { pose }
    }
}

/// A fully resolved robot state. Carries the same name and position data as
/// a joint waypoint but is semantically different: it is the universal output
/// representation of the planner, and as an input it means "the robot is
/// known to be here", not "move the robot here".
#[derive(Debug, Clone, PartialEq)]
pub struct StateWaypoint {
    pub joint_names: Vec<String>,
    pub positions: JointPositions,
}

impl StateWaypoint {
    pub fn new(
        joint_names: Vec<String>,
        positions: JointPositions,
    ) -> Result<Self, PlannerError> {
        if joint_names.len() != positions.len() {
            return Err(PlannerError::InvalidInput(format!(
                "state waypoint has {} names but {} positions",
                joint_names.len(),
                positions.len()
            )));
        }
        Ok(StateWaypoint {
            joint_names,
            positions,
        })
    }
}

impl From<StateWaypoint> for JointWaypoint {
    fn from(state: StateWaypoint) -> Self {
        // Lengths were checked when the state waypoint was built.
        JointWaypoint {
            joint_names: state.joint_names,
            positions: state.positions,
        }
    }
}

impl From<JointWaypoint> for StateWaypoint {
    fn from(joint: JointWaypoint) -> Self {
        StateWaypoint {
            joint_names: joint.joint_names,
            positions: joint.positions,
        }
    }
}

/// Closed variant over the three waypoint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    Joint(JointWaypoint),
    Cartesian(CartesianWaypoint),
    State(StateWaypoint),
}

/// A waypoint as the profile strategies see it. State waypoints degrade to
/// the joint waypoint carrying the same data, so only the joint/Cartesian
/// distinction survives into dispatch and only four strategy operations are
/// needed per motion type.
#[derive(Debug, Clone)]
pub enum ProfileTarget {
    Joint(JointWaypoint),
    Cartesian(CartesianWaypoint),
}

impl Waypoint {
    pub fn profile_target(&self) -> ProfileTarget {
        match self {
            Waypoint::Joint(joint) => ProfileTarget::Joint(joint.clone()),
            Waypoint::Cartesian(cartesian) => ProfileTarget::Cartesian(cartesian.clone()),
            Waypoint::State(state) => ProfileTarget::Joint(JointWaypoint {
                joint_names: state.joint_names.clone(),
                positions: state.positions.clone(),
            }),
        }
    }
}
