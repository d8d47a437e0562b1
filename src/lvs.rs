//! Longest Valid Segment step generators. The step count of a segment is
//! bounded so that no single step exceeds the configured translation,
//! rotation or joint space lengths, whichever demands the most steps; the
//! caller's minimum step count floors the result. Inverse kinematics
//! ambiguity is resolved by Euclidean nearest neighbor, and a segment whose
//! Cartesian end cannot be solved degrades into a repeated-endpoint seed
//! instead of failing the whole solve.

use tracing::debug;

use crate::instruction::{CompositeInstruction, PlanInstruction};
use crate::manipulator::ManipulatorInfo;
use crate::planner_error::PlannerError;
use crate::profile::{emit_repeated, emit_states, seed_motion_type, segment_context};
use crate::request::PlannerRequest;
use crate::utils::{
    check_joint_position_format, closest_pair, closest_solution, interpolate, joint_distance,
    lvs_steps,
};
use crate::waypoint::{CartesianWaypoint, JointWaypoint};

/// The three longest valid segment lengths plus the minimum step count.
#[derive(Debug, Clone, Copy)]
pub struct LvsLengths {
    /// Joint space bound, radians.
    pub state: f64,
    /// Translation bound, meters.
    pub translation: f64,
    /// Rotation bound, radians.
    pub rotation: f64,
    pub min_steps: usize,
}

/// Both endpoints known in joint space: all three bounds apply, and the
/// interpolation runs between the two exact configurations.
pub fn state_interpolate_joint_joint(
    start: &JointWaypoint,
    end: &JointWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &start.joint_names)?;
    check_joint_position_format(solver_names, &end.joint_names)?;

    // Poses in the world frame with the tool applied, for the Cartesian bounds.
    let p1 = context.world_to_base * context.kinematics.forward(&start.positions)? * context.tcp;
    let p2 = context.world_to_base * context.kinematics.forward(&end.positions)? * context.tcp;

    let translation_dist = (p2.translation.vector - p1.translation.vector).norm();
    let rotation_dist = p1.rotation.angle_to(&p2.rotation);
    let joint_dist = joint_distance(&end.positions, &start.positions);

    let steps = lengths
        .min_steps
        .max(lvs_steps(translation_dist, lengths.translation))
        .max(lvs_steps(rotation_dist, lengths.rotation))
        .max(lvs_steps(joint_dist, lengths.state));

    debug!(steps, "joint to joint segment");
    let states = interpolate(&start.positions, &end.positions, steps);
    emit_states(&states, solver_names, instruction, move_type)
}

/// Joint start, Cartesian end. The end is solved through inverse kinematics
/// seeded by the start; the candidate closest to the start wins. If no
/// solution exists the start is repeated instead.
pub fn state_interpolate_joint_cart(
    start: &JointWaypoint,
    end: &CartesianWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &start.joint_names)?;

    // Target pose in the kinematics base frame without the tool, for an
    // accurate comparison with the forward solve of the start.
    let p2 = context.world_to_base.inverse() * (end.pose * context.tcp.inverse());
    let p1 = context.kinematics.forward(&start.positions)?;

    let translation_dist = (p2.translation.vector - p1.translation.vector).norm();
    let rotation_dist = p1.rotation.angle_to(&p2.rotation);
    let mut steps = lvs_steps(translation_dist, lengths.translation)
        .max(lvs_steps(rotation_dist, lengths.rotation));

    let solutions = context.kinematics.inverse(&p2, &start.positions);
    let resolved = closest_solution(&solutions, &start.positions);
    if let Some(j2) = &resolved {
        steps = steps.max(lvs_steps(
            joint_distance(j2, &start.positions),
            lengths.state,
        ));
    }
    steps = steps.max(lengths.min_steps);

    match resolved {
        Some(j2) => {
            debug!(steps, "joint to cartesian segment");
            let states = interpolate(&start.positions, &j2, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            debug!(steps, "no inverse solution, repeating the joint endpoint");
            emit_repeated(&start.positions, solver_names, steps, instruction, move_type)
        }
    }
}

/// Cartesian start, joint end. Mirror of the joint-to-Cartesian case: the
/// start is solved through inverse kinematics seeded by the end, and the
/// end is repeated when nothing solves.
pub fn state_interpolate_cart_joint(
    start: &CartesianWaypoint,
    end: &JointWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();
    check_joint_position_format(solver_names, &end.joint_names)?;

    let p1 = context.world_to_base.inverse() * (start.pose * context.tcp.inverse());
    let p2 = context.kinematics.forward(&end.positions)?;

    let translation_dist = (p2.translation.vector - p1.translation.vector).norm();
    let rotation_dist = p1.rotation.angle_to(&p2.rotation);
    let mut steps = lvs_steps(translation_dist, lengths.translation)
        .max(lvs_steps(rotation_dist, lengths.rotation));

    let solutions = context.kinematics.inverse(&p1, &end.positions);
    let resolved = closest_solution(&solutions, &end.positions);
    if let Some(j1) = &resolved {
        steps = steps.max(lvs_steps(joint_distance(j1, &end.positions), lengths.state));
    }
    steps = steps.max(lengths.min_steps);

    match resolved {
        Some(j1) => {
            debug!(steps, "cartesian to joint segment");
            let states = interpolate(&j1, &end.positions, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            debug!(steps, "no inverse solution, repeating the joint endpoint");
            emit_repeated(&end.positions, solver_names, steps, instruction, move_type)
        }
    }
}

/// Both endpoints Cartesian. Each side is solved independently with the
/// current scene state as a shared seed. With both sides solved the pair
/// with the smallest mutual distance wins, searched across every candidate
/// combination; with one side solved that side is repeated; with none, the
/// shared seed is repeated.
pub fn state_interpolate_cart_cart(
    start: &CartesianWaypoint,
    end: &CartesianWaypoint,
    instruction: &PlanInstruction,
    request: &PlannerRequest,
    composite_info: &ManipulatorInfo,
    lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    let context = segment_context(instruction, request, composite_info)?;
    let move_type = seed_motion_type(instruction)?;
    let solver_names = context.kinematics.joint_names();

    let seed = request.state.joint_values(solver_names)?;

    let p1 = context.world_to_base.inverse() * (start.pose * context.tcp.inverse());
    let p2 = context.world_to_base.inverse() * (end.pose * context.tcp.inverse());
    let start_solutions = context.kinematics.inverse(&p1, &seed);
    let end_solutions = context.kinematics.inverse(&p2, &seed);

    let translation_dist = (p2.translation.vector - p1.translation.vector).norm();
    let rotation_dist = p1.rotation.angle_to(&p2.rotation);
    let cartesian_steps = lvs_steps(translation_dist, lengths.translation)
        .max(lvs_steps(rotation_dist, lengths.rotation));

    match closest_pair(&start_solutions, &end_solutions) {
        Some((j1, j2)) => {
            let steps = lengths
                .min_steps
                .max(cartesian_steps)
                .max(lvs_steps(joint_distance(&j1, &j2), lengths.state));
            debug!(steps, "cartesian to cartesian segment");
            let states = interpolate(&j1, &j2, steps);
            emit_states(&states, solver_names, instruction, move_type)
        }
        None => {
            // At most one side solved; repeat whatever resolves, or the
            // shared seed when neither does.
            let steps = lengths.min_steps.max(cartesian_steps);
            let resolved = closest_solution(&start_solutions, &seed)
                .or_else(|| closest_solution(&end_solutions, &seed))
                .unwrap_or_else(|| seed.clone());
            debug!(steps, "unsolved cartesian segment, repeating a fallback state");
            emit_repeated(&resolved, solver_names, steps, instruction, move_type)
        }
    }
}

/// Cartesian-seeded counterpart of [`state_interpolate_joint_joint`]. The
/// seed would carry Cartesian waypoints for a downstream stage that solves
/// them itself; no such stage exists yet.
pub fn cart_interpolate_joint_joint(
    _start: &JointWaypoint,
    _end: &JointWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded LVS interpolation of a joint to joint segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_joint_cart`].
pub fn cart_interpolate_joint_cart(
    _start: &JointWaypoint,
    _end: &CartesianWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded LVS interpolation of a joint to cartesian segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_cart_joint`].
pub fn cart_interpolate_cart_joint(
    _start: &CartesianWaypoint,
    _end: &JointWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded LVS interpolation of a cartesian to joint segment",
    ))
}

/// Cartesian-seeded counterpart of [`state_interpolate_cart_cart`].
pub fn cart_interpolate_cart_cart(
    _start: &CartesianWaypoint,
    _end: &CartesianWaypoint,
    _instruction: &PlanInstruction,
    _request: &PlannerRequest,
    _composite_info: &ManipulatorInfo,
    _lengths: &LvsLengths,
) -> Result<CompositeInstruction, PlannerError> {
    Err(PlannerError::NotImplemented(
        "Cartesian-seeded LVS interpolation of a cartesian to cartesian segment",
    ))
}
