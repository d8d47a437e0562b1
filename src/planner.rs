//! The instruction tree walker. `SimpleMotionPlanner` assigns an initial
//! trajectory to every motion segment of a request by looping over the plan
//! instructions and calling the matching profile operation; the result is a
//! seed of the same tree shape, suitable as input for a downstream
//! trajectory optimizer or usable on its own for freespace and linear
//! motions that need no optimization.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use crate::instruction::{CompositeInstruction, Instruction, MotionType, MoveInstruction, PlanInstruction};
use crate::planner_error::PlannerError;
use crate::profile::{
    DEFAULT_PROFILE_KEY, LvsProfile, ProfileMap, SimplePlannerProfile, resolve_profile_name,
};
use crate::request::{PlannerRequest, PlannerResponse, PlannerStatus};
use crate::waypoint::{ProfileTarget, StateWaypoint, Waypoint};

pub struct SimpleMotionPlanner {
    name: String,
    profiles: ProfileMap,
}

impl Default for SimpleMotionPlanner {
    fn default() -> Self {
        SimpleMotionPlanner::new("SimpleMotionPlanner")
    }
}

impl SimpleMotionPlanner {
    /// A planner with the LVS profile registered under the default key.
    pub fn new(name: impl Into<String>) -> Self {
        let mut profiles: ProfileMap = HashMap::new();
        profiles.insert(
            DEFAULT_PROFILE_KEY.to_string(),
            Arc::new(LvsProfile::default()) as Arc<dyn SimplePlannerProfile>,
        );
        SimpleMotionPlanner {
            name: name.into(),
            profiles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register or replace a profile. Configuration time only; the map is
    /// read-only while solves are running.
    pub fn register_profile(
        &mut self,
        key: impl Into<String>,
        profile: Arc<dyn SimplePlannerProfile>,
    ) {
        self.profiles.insert(key.into(), profile);
    }

    /// Produce the seed for the request. The result tree mirrors the input
    /// tree one for one, except every plan instruction is replaced by the
    /// composite of move instructions interpolating from the previous
    /// resolved waypoint to its target. Never panics or returns an error;
    /// every internal failure is reported through the response status, and
    /// a failed call carries no partial seed.
    pub fn solve(&self, request: &PlannerRequest) -> PlannerResponse {
        if let Err(error) = self.check_request(request) {
            error!(planner = %self.name, %error, "rejecting request");
            return PlannerResponse::failure(PlannerStatus::ErrorInvalidInput);
        }
        match self.build_seed(request) {
            Ok(seed) => PlannerResponse {
                status: PlannerStatus::SolutionFound,
                results: Some(seed),
            },
            Err(error) => {
                error!(planner = %self.name, %error, "failed to generate seed");
                PlannerResponse::failure(PlannerStatus::ErrorInvalidInput)
            }
        }
    }

    fn check_request(&self, request: &PlannerRequest) -> Result<(), PlannerError> {
        request.environment()?;
        if request.instructions.is_empty() {
            return Err(PlannerError::InvalidInput(
                "at least one instruction is required".to_string(),
            ));
        }
        Ok(())
    }

    fn build_seed(&self, request: &PlannerRequest) -> Result<CompositeInstruction, PlannerError> {
        let start_instruction = self.start_instruction(request)?;
        let mut current = start_instruction.waypoint.clone();
        let mut seed = self.process_composite(&request.instructions, &mut current, request)?;
        seed.set_start_instruction(Instruction::Move(start_instruction));
        Ok(seed)
    }

    /// Resolve the starting waypoint of the tree into a move instruction.
    /// A joint waypoint is already in joint space and wraps directly into a
    /// state. A Cartesian start is never solved through inverse kinematics:
    /// the true start must match the robot's actual configuration, so the
    /// reference scene state is used instead. Without an explicit START
    /// instruction the reference scene state is also the start.
    fn start_instruction(&self, request: &PlannerRequest) -> Result<MoveInstruction, PlannerError> {
        let Some(start) = request.instructions.start_instruction() else {
            return Ok(MoveInstruction::new(
                Waypoint::State(reference_state(request)?),
                MotionType::Start,
            ));
        };

        let Instruction::Plan(plan) = start else {
            return Err(PlannerError::InvalidInput(
                "start instruction must be a plan instruction".to_string(),
            ));
        };
        if !plan.is_start() {
            return Err(PlannerError::InvalidInput(
                "start instruction is not tagged START".to_string(),
            ));
        }

        let waypoint = match &plan.waypoint {
            Waypoint::Joint(joint) => Waypoint::State(StateWaypoint::new(
                joint.joint_names.clone(),
                joint.positions.clone(),
            )?),
            Waypoint::Cartesian(_) => Waypoint::State(reference_state(request)?),
            Waypoint::State(state) => Waypoint::State(state.clone()),
        };

        let mut resolved = MoveInstruction::new(waypoint, MotionType::Start);
        resolved.manipulator_info = plan.manipulator_info.clone();
        resolved.profile = plan.profile.clone();
        resolved.description = plan.description.clone();
        Ok(resolved)
    }

    /// Walk one composite depth first. `current` threads the tail waypoint
    /// of the most recently planned segment across siblings.
    fn process_composite(
        &self,
        instructions: &CompositeInstruction,
        current: &mut Waypoint,
        request: &PlannerRequest,
    ) -> Result<CompositeInstruction, PlannerError> {
        let mut seed = CompositeInstruction::new(
            instructions.profile.clone(),
            instructions.order,
            instructions.manipulator_info.clone(),
        );
        seed.description = instructions.description.clone();

        for instruction in instructions.instructions() {
            match instruction {
                Instruction::Composite(composite) => {
                    seed.push(Instruction::Composite(self.process_composite(
                        composite,
                        current,
                        request,
                    )?));
                }
                Instruction::Move(mv) => {
                    // Already resolved, no interpolation required.
                    seed.push(Instruction::Move(mv.clone()));
                }
                Instruction::Plan(plan) => {
                    let step = self.process_plan(plan, current, request)?;
                    seed.push(Instruction::Composite(step));
                    // The next sibling continues from the nominal target,
                    // not from the interpolated state.
                    *current = plan.waypoint.clone();
                }
            }
        }
        Ok(seed)
    }

    /// One segment: pick the profile, then dispatch on the ordered pair of
    /// endpoint types. State waypoints were downgraded to joint waypoints
    /// by `profile_target`, so four combinations remain per motion type.
    fn process_plan(
        &self,
        plan: &PlanInstruction,
        current: &Waypoint,
        request: &PlannerRequest,
    ) -> Result<CompositeInstruction, PlannerError> {
        let profile = self.select_profile(plan, request);
        let composite_info = &request.instructions.manipulator_info;
        let start = current.profile_target();
        let end = plan.waypoint.profile_target();

        use ProfileTarget::{Cartesian, Joint};
        match plan.motion_type {
            MotionType::Linear => match (&start, &end) {
                (Cartesian(s), Cartesian(e)) => {
                    profile.cart_cart_linear(s, e, plan, request, composite_info)
                }
                (Cartesian(s), Joint(e)) => {
                    profile.cart_joint_linear(s, e, plan, request, composite_info)
                }
                (Joint(s), Cartesian(e)) => {
                    profile.joint_cart_linear(s, e, plan, request, composite_info)
                }
                (Joint(s), Joint(e)) => {
                    profile.joint_joint_linear(s, e, plan, request, composite_info)
                }
            },
            MotionType::Freespace => match (&start, &end) {
                (Cartesian(s), Cartesian(e)) => {
                    profile.cart_cart_freespace(s, e, plan, request, composite_info)
                }
                (Cartesian(s), Joint(e)) => {
                    profile.cart_joint_freespace(s, e, plan, request, composite_info)
                }
                (Joint(s), Cartesian(e)) => {
                    profile.joint_cart_freespace(s, e, plan, request, composite_info)
                }
                (Joint(s), Joint(e)) => {
                    profile.joint_joint_freespace(s, e, plan, request, composite_info)
                }
            },
            MotionType::Start => Err(PlannerError::UnsupportedInstruction(
                "START instruction inside the tree body".to_string(),
            )),
        }
    }

    /// Remapping table first, then the planner's own map, then the built-in
    /// default. The default key is registered at construction, so lookup
    /// cannot come up empty in practice; the final fallback covers a map a
    /// caller has emptied by replacing profiles.
    fn select_profile(
        &self,
        plan: &PlanInstruction,
        request: &PlannerRequest,
    ) -> Arc<dyn SimplePlannerProfile> {
        let name = resolve_profile_name(&plan.profile, &request.profile_remapping);
        if let Some(profile) = self.profiles.get(&name) {
            return profile.clone();
        }
        debug!(planner = %self.name, profile = %name, "profile not registered, using default");
        self.profiles
            .get(DEFAULT_PROFILE_KEY)
            .cloned()
            .unwrap_or_else(|| Arc::new(LvsProfile::default()))
    }
}

/// The reference robot state as a state waypoint, in the joint order of the
/// composite's manipulator.
fn reference_state(request: &PlannerRequest) -> Result<StateWaypoint, PlannerError> {
    let info = &request.instructions.manipulator_info;
    if info.manipulator.is_empty() {
        return Err(PlannerError::InvalidInput(
            "composite instruction names no manipulator to take the start state from".to_string(),
        ));
    }
    let env = request.environment()?;
    let kinematics = env.kinematics(&info.manipulator).ok_or_else(|| {
        PlannerError::InvalidInput(format!("unknown manipulator '{}'", info.manipulator))
    })?;
    let names = kinematics.joint_names().to_vec();
    let values = request.state.joint_values(&names)?;
    StateWaypoint::new(names, values)
}
