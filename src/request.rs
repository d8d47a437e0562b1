//! What goes into a solve call and what comes back out.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::instruction::CompositeInstruction;
use crate::kinematic_traits::{PlanningEnvironment, SceneState};
use crate::planner_error::PlannerError;

/// Externally supplied, read-only input of one planning call.
#[derive(Clone)]
pub struct PlannerRequest {
    /// The instruction tree to seed.
    pub instructions: CompositeInstruction,
    /// Kinematics and tool lookup. Requests without an environment are
    /// rejected before any traversal.
    pub env: Option<Arc<dyn PlanningEnvironment>>,
    /// Snapshot of the robot at planning time.
    pub state: SceneState,
    /// Profile name remapping applied before the planner's own profile map
    /// is consulted.
    pub profile_remapping: HashMap<String, String>,
}

impl PlannerRequest {
    pub fn new(instructions: CompositeInstruction, state: SceneState) -> Self {
        PlannerRequest {
            instructions,
            env: None,
            state,
            profile_remapping: HashMap::new(),
        }
    }

    pub fn with_environment(mut self, env: Arc<dyn PlanningEnvironment>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn environment(&self) -> Result<&Arc<dyn PlanningEnvironment>, PlannerError> {
        self.env.as_ref().ok_or_else(|| {
            PlannerError::InvalidInput(
                "planning environment is a required parameter and has not been set".to_string(),
            )
        })
    }
}

/// The only channel by which the planner reports success or failure to its
/// caller; nothing unwinds across the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    SolutionFound,
    ErrorInvalidInput,
    FailedToFindValidSolution,
}

impl PlannerStatus {
    pub fn message(&self) -> &'static str {
        match self {
            PlannerStatus::SolutionFound => "Found valid solution",
            PlannerStatus::ErrorInvalidInput => {
                "Input to planner is invalid. Check that instructions and seed are compatible"
            }
            PlannerStatus::FailedToFindValidSolution => "Failed to find valid solution",
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, PlannerStatus::SolutionFound)
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one planning call. `results` is present only when the status
/// says a solution was found; a failed call never carries a half built seed.
#[derive(Debug, Clone)]
pub struct PlannerResponse {
    pub status: PlannerStatus,
    pub results: Option<CompositeInstruction>,
}

impl PlannerResponse {
    pub fn failure(status: PlannerStatus) -> Self {
        PlannerResponse {
            status,
            results: None,
        }
    }
}
