//! Fixed resolution step generators. Structurally the same family as the
//! LVS generators, but the step count comes straight from the caller, so
//! there is no bound estimation phase and no forward solve is needed when
//! both endpoints are already in joint space. Identical inputs produce bit
//! identical outputs; nothing here is randomized.

use tracing::debug;

use crate::instruction::{CompositeInstruction, PlanInstruction};
use crate::manipulator::ManipulatorInfo;
use crate::planner_error::PlannerError;
use crate::profile::{emit_repeated, emit_states, seed_motion_type, segment_context};
use crate::request::PlannerRequest;
use crate::utils::{check_joint_position_format, closest_pair, closest_solution, interpolate};
use crate::waypoint::{CartesianWaypoint, JointWaypoint};

/// Both endpoints known in joint space: interpolate directly, no kinematics
/// involved.
pub fn state_interpolate_joint_joint(
    start: &JointWaypoint,
    end: &JointWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &start.joint_names)?;
    check_joint_position_format(solver_names, &end.joint_names)?;

    let states = interpolate(&start.positions, &end.positions, steps);
    emit_states(&states, solver_names, instruction, move_type)
}

/// Joint start, Cartesian end: solve the end seeded by the start, keep the
/// nearest candidate, repeat the start when nothing solves.
pub fn state_interpolate_joint_cart(
    start: &JointWaypoint,
    end: &CartesianWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &start.joint_names)?;

    let p2 = context.world_to_base.inverse() * (end.pose * context.tcp.inverse());
    let solutions = context.kinematics.inverse(&p2, &start.positions);

    match closest_solution(&solutions, &start.positions) {
        Some(j2) => {
            let states = interpolate(&start.positions, &j2, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            debug!(steps, "no inverse solution, repeating the joint endpoint");
            emit_repeated(&start.positions, solver_names, steps, instruction, move_type)
        }
    }
}

/// Cartesian start, joint end: mirror of the joint to Cartesian case.
pub fn state_interpolate_cart_joint(
    start: &CartesianWaypoint,
    end: &JointWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &end.joint_names)?;

    let p1 = context.world_to_base.inverse() * (start.pose * context.tcp.inverse());
    let solutions = context.kinematics.inverse(&p1, &end.positions);

    match closest_solution(&solutions, &end.positions) {
        Some(j1) => {
            let states = interpolate(&j1, &end.positions, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            debug!(steps, "no inverse solution, repeating the joint endpoint");
            emit_repeated(&end.positions, solver_names, steps, instruction, move_type)
        }
    }
}

/// Both endpoints Cartesian, both solved against the shared scene seed; the
/// fallbacks are the same as in the LVS generator.
pub fn state_interpolate_cart_cart(
    start: &CartesianWaypoint,
    end: &CartesianWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();

    let seed = request.state.joint_values(solver_names)?;
    let p1 = context.world_to_base.inverse() * (start.pose * context.tcp.inverse());
    let p2 = context.world_to_base.inverse() * (end.pose * context.tcp.inverse());
    let start_solutions = context.kinematics.inverse(&p1, &seed);
    let end_solutions = context.kinematics.inverse(&p2, &seed);

    match closest_pair(&start_solutions, &end_solutions) {
        Some((j1, j2)) => {
            let states = interpolate(&j1, &j2, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            let resolved = closest_solution(&start_solutions, &seed)
                .or_else(|| closest_solution(&end_solutions, &seed))
                .unwrap_or_else(|| seed.clone());
            debug!(steps, "unsolved cartesian segment, repeating a fallback state");
            emit_repeated(&resolved, solver_names, steps, instruction, move_type)
        }
    }
}

/// Cartesian-seeded counterpart of [`state_interpolate_joint_joint`]; the
/// mode is declared at the interface but has no implementation.
pub fn cart_interpolate_joint_joint(
    _start: &JointWaypoint,
    _end: &JointWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded fixed size interpolation of a joint to joint segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_joint_cart`].
pub fn cart_interpolate_joint_cart(
    _start: &JointWaypoint,
    _end: &CartesianWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded fixed size interpolation of a joint to cartesian segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_cart_joint`].
pub fn cart_interpolate_cart_joint(
    _start: &CartesianWaypoint,
    _end: &JointWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded fixed size interpolation of a cartesian to joint segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_cart_cart`].
pub fn cart_interpolate_cart_cart(
    _start: &CartesianWaypoint,
    _end: &CartesianWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _steps: usize,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded fixed size interpolation of a cartesian to cartesian segment",
    ))
}
