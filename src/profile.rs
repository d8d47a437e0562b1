//! Interpolation profiles. A profile is the per-waypoint-type-pair policy
//! the tree walker delegates to: one operation for each ordered pair of
//! joint/Cartesian endpoints, in linear and freespace flavors. The planner
//! holds profiles behind `Arc<dyn SimplePlannerProfile>` in a map configured
//! up front and read-only during planning.

use std::collections::HashMap;
use std::sync::Arc;

use crate::fixed_size;
use crate::instruction::{CompositeInstruction, Instruction, MotionType, MoveInstruction, PlanInstruction};
use crate::kinematic_traits::{JointPositions, KinematicsGateway, Pose};
use crate::lvs::{self, LvsLengths};
use crate::manipulator::ManipulatorInfo;
use crate::planner_error::PlannerError;
use crate::request::PlannerRequest;
use crate::waypoint::{CartesianWaypoint, JointWaypoint, StateWaypoint, Waypoint};

/// Key under which the built-in default profile is registered.
pub const DEFAULT_PROFILE_KEY: &str = "DEFAULT";

/// The four step generation operations per motion type. State waypoints
/// never reach a profile; the walker downgrades them to joint waypoints
/// first.
pub trait SimplePlannerProfile: Send + Sync {
    fn cart_cart_linear(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn cart_joint_linear(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn joint_cart_linear(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn joint_joint_linear(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn cart_cart_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn cart_joint_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn joint_cart_freespace(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;

    fn joint_joint_freespace(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError>;
}

/// Profile map of a planner: name to strategy.
pub type ProfileMap = HashMap<String, Arc<dyn SimplePlannerProfile>>;

/// Profile name after the request remapping is applied. Empty names fall
/// back to the default key before remapping, matching how unnamed
/// instructions are treated everywhere else.
pub fn resolve_profile_name(profile: &str, remapping: &HashMap<String, String>) -> String {
    let name = if profile.is_empty() {
        DEFAULT_PROFILE_KEY
    } else {
        profile
    };
    remapping
        .get(name)
        .cloned()
        .unwrap_or_else(|| name.to_string())
}

/// Whether a profile seeds segments with joint states or Cartesian poses.
/// The Cartesian-seeded branches are declared but unimplemented; selecting
/// them fails fast with [`PlannerError::NotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSpace {
    #[default]
    JointInterpolated,
    CartesianInterpolated,
}

/// Longest Valid Segment profile: the step count of every segment adapts to
/// its translation, rotation and joint space extent. The default profile of
/// the planner.
#[derive(Debug, Clone, Copy)]
pub struct LvsProfile {
    /// Longest valid joint space distance per step, radians.
    pub state_longest_valid_segment_length: f64,
    /// Longest valid translation per step, meters.
    pub translation_longest_valid_segment_length: f64,
    /// Longest valid rotation per step, radians.
    pub rotation_longest_valid_segment_length: f64,
    /// Never produce fewer steps than this, however short the segment.
    pub min_steps: usize,
    pub seed_space: SeedSpace,
}

impl Default for LvsProfile {
    fn default() -> Self {
        LvsProfile {
            state_longest_valid_segment_length: 5.0 * std::f64::consts::PI / 180.0,
            translation_longest_valid_segment_length: 0.1,
            rotation_longest_valid_segment_length: 5.0 * std::f64::consts::PI / 180.0,
            min_steps: 1,
            seed_space: SeedSpace::JointInterpolated,
        }
    }
}

impl LvsProfile {
    fn lengths(&self) -> LvsLengths {
        LvsLengths {
            state: self.state_longest_valid_segment_length,
            translation: self.translation_longest_valid_segment_length,
            rotation: self.rotation_longest_valid_segment_length,
            min_steps: self.min_steps,
        }
    }
}

impl SimplePlannerProfile for LvsProfile {
    fn cart_cart_linear(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => lvs::state_interpolate_cart_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
            SeedSpace::CartesianInterpolated => lvs::cart_interpolate_cart_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
        }
    }

    fn cart_joint_linear(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => lvs::state_interpolate_cart_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
            SeedSpace::CartesianInterpolated => lvs::cart_interpolate_cart_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
        }
    }

    fn joint_cart_linear(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => lvs::state_interpolate_joint_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
            SeedSpace::CartesianInterpolated => lvs::cart_interpolate_joint_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
        }
    }

    fn joint_joint_linear(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => lvs::state_interpolate_joint_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
            SeedSpace::CartesianInterpolated => lvs::cart_interpolate_joint_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                &self.lengths(),
            ),
        }
    }

    fn cart_cart_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.cart_cart_linear(start, end, instruction, request, composite_info)
    }

    fn cart_joint_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.cart_joint_linear(start, end, instruction, request, composite_info)
    }

    fn joint_cart_freespace(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.joint_cart_linear(start, end, instruction, request, composite_info)
    }

    fn joint_joint_freespace(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.joint_joint_linear(start, end, instruction, request, composite_info)
    }
}

/// Fixed resolution profile: the caller chooses the step count outright,
/// independent of how long the segment is geometrically. Useful when a
/// downstream stage expects a predetermined discretization.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeProfile {
    pub linear_steps: usize,
    pub freespace_steps: usize,
    pub seed_space: SeedSpace,
}

impl Default for FixedSizeProfile {
    fn default() -> Self {
        FixedSizeProfile {
            linear_steps: 10,
            freespace_steps: 10,
            seed_space: SeedSpace::JointInterpolated,
        }
    }
}

impl FixedSizeProfile {
    fn dispatch_cart_cart(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
        steps: usize,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => fixed_size::state_interpolate_cart_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
            SeedSpace::CartesianInterpolated => fixed_size::cart_interpolate_cart_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
        }
    }

    fn dispatch_cart_joint(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
        steps: usize,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => fixed_size::state_interpolate_cart_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
            SeedSpace::CartesianInterpolated => fixed_size::cart_interpolate_cart_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
        }
    }

    fn dispatch_joint_cart(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
        steps: usize,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => fixed_size::state_interpolate_joint_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
            SeedSpace::CartesianInterpolated => fixed_size::cart_interpolate_joint_cart(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
        }
    }

    fn dispatch_joint_joint(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
        steps: usize,
    ) -> Result<CompositeInstruction, PlannerError> {
        match self.seed_space {
            SeedSpace::JointInterpolated => fixed_size::state_interpolate_joint_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
            SeedSpace::CartesianInterpolated => fixed_size::cart_interpolate_joint_joint(
                start,
                end,
                instruction,
                request,
                composite_info,
                steps,
            ),
        }
    }
}

impl SimplePlannerProfile for FixedSizeProfile {
    fn cart_cart_linear(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_cart_cart(start, end, instruction, request, composite_info, self.linear_steps)
    }

    fn cart_joint_linear(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_cart_joint(start, end, instruction, request, composite_info, self.linear_steps)
    }

    fn joint_cart_linear(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_joint_cart(start, end, instruction, request, composite_info, self.linear_steps)
    }

    fn joint_joint_linear(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_joint_joint(start, end, instruction, request, composite_info, self.linear_steps)
    }

    fn cart_cart_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_cart_cart(start, end, instruction, request, composite_info, self.freespace_steps)
    }

    fn cart_joint_freespace(
        &self,
        start: &CartesianWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_cart_joint(start, end, instruction, request, composite_info, self.freespace_steps)
    }

    fn joint_cart_freespace(
        &self,
        start: &JointWaypoint,
        end: &CartesianWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_joint_cart(start, end, instruction, request, composite_info, self.freespace_steps)
    }

    fn joint_joint_freespace(
        &self,
        start: &JointWaypoint,
        end: &JointWaypoint,
        instruction: &PlanInstruction,
        request: &PlannerRequest,
        composite_info: &ManipulatorInfo,
    ) -> Result<CompositeInstruction, PlannerError> {
        self.dispatch_joint_joint(start, end, instruction, request, composite_info, self.freespace_steps)
    }
}

/// Kinematics and frames resolved once per interpolation call.
pub(crate) struct SegmentContext {
    pub kinematics: Arc<dyn KinematicsGateway>,
    /// World transform of the kinematic base link.
    pub world_to_base: Pose,
    /// Chain tip to tool center point.
    pub tcp: Pose,
}

pub(crate) fn segment_context(
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
) -> Result<SegmentContext, PlannerError> {
    let info = composite_info.combined(&instruction.manipulator_info)?;
    if info.manipulator.is_empty() {
        return Err(PlannerError::InvalidInput(
            "no manipulator specified on the instruction or its composite".to_string(),
        ));
    }
    let env = request.environment()?;
    let kinematics = env.kinematics(&info.manipulator).ok_or_else(|| {
        PlannerError::InvalidInput(format!("unknown manipulator '{}'", info.manipulator))
    })?;
    let world_to_base = request.state.link_transform(kinematics.base_link_name())?;
    let tcp = env.find_tcp(&info)?;
    Ok(SegmentContext {
        kinematics,
        world_to_base,
        tcp,
    })
}

/// Motion type of the emitted seed states, mirrored from the originating
/// plan instruction. Only linear and freespace instructions can be
/// interpolated.
pub(crate) fn seed_motion_type(instruction: &PlanInstruction) -> Result<MotionType, PlannerError> {
    match instruction.motion_type {
        MotionType::Linear => Ok(MotionType::Linear),
        MotionType::Freespace => Ok(MotionType::Freespace),
        MotionType::Start => Err(PlannerError::UnsupportedInstruction(
            "cannot interpolate a START instruction".to_string(),
        )),
    }
}

/// Wrap interpolated joint states into move instructions. The first sample
/// is the already known start of the segment and is not re-emitted.
pub(crate) fn emit_states(
    states: &[JointPositions],
    joint_names: &[String],
    instruction: &PlanInstruction,
    move_type: MotionType,
) -> Result<CompositeInstruction, PlannerError> {
    let mut composite = CompositeInstruction::default();
    for state in states.iter().skip(1) {
        composite.push(Instruction::Move(seed_move(
            StateWaypoint::new(joint_names.to_vec(), state.clone())?,
            instruction,
            move_type,
        )));
    }
    Ok(composite)
}

/// Degraded seed: the same resolved state repeated `steps - 1` times, so the
/// downstream optimizer still receives a trajectory of the right length.
pub(crate) fn emit_repeated(
    state: &JointPositions,
    joint_names: &[String],
    steps: usize,
    instruction: &PlanInstruction,
    move_type: MotionType,
) -> Result<CompositeInstruction, PlannerError> {
    let waypoint = StateWaypoint::new(joint_names.to_vec(), state.clone())?;
    let mut composite = CompositeInstruction::default();
    for _ in 1..steps {
        composite.push(Instruction::Move(seed_move(
            waypoint.clone(),
            instruction,
            move_type,
        )));
    }
    Ok(composite)
}

fn seed_move(
    waypoint: StateWaypoint,
    instruction: &PlanInstruction,
    move_type: MotionType,
) -> MoveInstruction {
    let mut mv = MoveInstruction::new(Waypoint::State(waypoint), move_type);
    mv.profile = instruction.profile.clone();
    mv.description = instruction.description.clone();
    mv.manipulator_info = instruction.manipulator_info.clone();
    mv
}
