//! Identifies which kinematic chain a motion uses, which inverse kinematics
//! solver variant should serve it, and which tool center point applies.
//! Infos combine: an instruction-level info fills in whatever the enclosing
//! composite left empty.

use crate::kinematic_traits::Pose;
use crate::planner_error::PlannerError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManipulatorInfo {
    /// Name of the kinematic chain, e.g. "manipulator".
    pub manipulator: String,
    /// Name of the inverse kinematics solver variant, empty for the default.
    pub ik_solver: String,
    /// Transform from the chain tip to the tool center point, if a tool is
    /// mounted.
    pub tcp: Option<Pose>,
}

impl ManipulatorInfo {
    pub fn new(manipulator: impl Into<String>) -> Self {
        ManipulatorInfo {
            manipulator: manipulator.into(),
            ..ManipulatorInfo::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manipulator.is_empty() && self.ik_solver.is_empty() && self.tcp.is_none()
    }

    /// Merge two infos field by field. A non-empty field wins over an empty
    /// one; two non-empty fields that disagree are an error rather than a
    /// silent preference for either side.
    pub fn combined(&self, other: &ManipulatorInfo) -> Result<ManipulatorInfo, PlannerError> {
        let tcp = match (&self.tcp, &other.tcp) {
            (Some(a), Some(b)) if a != b => {
                return Err(PlannerError::ManipulatorConflict(
                    "tcp transforms differ".to_string(),
                ));
            }
            (Some(a), _) => Some(*a),
            (None, b) => *b,
        };
        Ok(ManipulatorInfo {
            manipulator: combined_field(&self.manipulator, &other.manipulator, "manipulator")?,
            ik_solver: combined_field(&self.ik_solver, &other.ik_solver, "ik_solver")?,
            tcp,
        })
    }
}

fn combined_field(a: &str, b: &str, field: &str) -> Result<String, PlannerError> {
    if !a.is_empty() && !b.is_empty() && a != b {
        return Err(PlannerError::ManipulatorConflict(format!(
            "{}: '{}' vs '{}'",
            field, a, b
        )));
    }
    Ok(if a.is_empty() {
        b.to_string()
    } else {
        a.to_string()
    })
}
