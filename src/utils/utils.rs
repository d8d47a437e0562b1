//! Helper functions shared by the step generators: joint space
//! interpolation, step count arithmetic and nearest-neighbor selection over
//! inverse kinematics candidates.

use crate::kinematic_traits::{JointPositions, Solutions};
use crate::planner_error::PlannerError;

/// Linearly spaced joint states from `start` to `end`, `steps` samples in
/// total including both endpoints. With a single step only the start is
/// produced; callers emit samples after the first, so one step means a
/// degenerate no-op segment.
pub fn interpolate(
    start: &JointPositions,
    end: &JointPositions,
    steps: usize,
) -> Vec<JointPositions> {
    if steps <= 1 {
        return vec![start.clone()];
    }
    let mut states = Vec::with_capacity(steps);
    let last = (steps - 1) as f64;
    for i in 0..steps {
        let t = i as f64 / last;
        // The convex form lands exactly on the endpoints at t = 0 and t = 1.
        states.push(start * (1.0 - t) + end * t);
    }
    states
}

/// Number of steps needed so that no step is longer than the given longest
/// valid segment length. Zero distance still counts as one step.
pub fn lvs_steps(distance: f64, longest_valid_segment_length: f64) -> usize {
    (distance / longest_valid_segment_length).ceil() as usize + 1
}

/// Euclidean joint space distance between two configurations.
pub fn joint_distance(a: &JointPositions, b: &JointPositions) -> f64 {
    (a - b).norm()
}

/// The candidate closest to the reference configuration. Ties keep the
/// earliest candidate, so the selection is deterministic for a given
/// solution enumeration order.
pub fn closest_solution(
    candidates: &Solutions,
    reference: &JointPositions,
) -> Option<JointPositions> {
    let mut best: Option<(f64, &JointPositions)> = None;
    for candidate in candidates {
        let distance = joint_distance(candidate, reference);
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, candidate)| candidate.clone())
}

/// The pair across two candidate sets with the smallest mutual distance.
/// Every pair is tried; with both ends free there is no shared anchor to
/// minimize against independently. Ties keep the earliest pair in
/// enumeration order. `None` when either set is empty.
pub fn closest_pair(
    a_candidates: &Solutions,
    b_candidates: &Solutions,
) -> Option<(JointPositions, JointPositions)> {
    let mut best: Option<(f64, &JointPositions, &JointPositions)> = None;
    for a in a_candidates {
        for b in b_candidates {
            let distance = joint_distance(a, b);
            match best {
                Some((best_distance, _, _)) if distance >= best_distance => {}
                _ => best = Some((distance, a, b)),
            }
        }
    }
    best.map(|(_, a, b)| (a.clone(), b.clone()))
}

/// Checks that waypoint joint names match the solver's ordering one for one.
/// The step generators interpolate raw position vectors, so a reordered
/// waypoint would silently swap axes if this were skipped.
pub fn check_joint_position_format(
    solver_names: &[String],
    waypoint_names: &[String],
) -> Result<(), PlannerError> {
    if solver_names.len() != waypoint_names.len() {
        return Err(PlannerError::InvalidInput(format!(
            "waypoint has {} joints, solver expects {}",
            waypoint_names.len(),
            solver_names.len()
        )));
    }
    for (solver, waypoint) in solver_names.iter().zip(waypoint_names) {
        if solver != waypoint {
            return Err(PlannerError::InvalidInput(format!(
                "waypoint joint '{}' does not match solver joint '{}'",
                waypoint, solver
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn interpolate_hits_endpoints_exactly() {
        let start = dvector![0.0, -1.0];
        let end = dvector![1.0, 3.0];
        let states = interpolate(&start, &end, 5);
        assert_eq!(states.len(), 5);
        assert_eq!(states[0], start);
        assert_eq!(states[4], end);
        assert!((states[2][0] - 0.5).abs() < 1e-12);
        assert!((states[2][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn interpolate_single_step_is_the_start() {
        let start = dvector![0.5];
        let end = dvector![2.5];
        let states = interpolate(&start, &end, 1);
        assert_eq!(states, vec![start]);
    }

    #[test]
    fn lvs_steps_rounds_up() {
        assert_eq!(lvs_steps(1.0, 0.5), 3);
        assert_eq!(lvs_steps(0.9, 0.5), 3);
        assert_eq!(lvs_steps(0.0, 0.5), 1);
        assert_eq!(lvs_steps(0.4, 0.5), 2);
    }

    #[test]
    fn closest_solution_prefers_earliest_on_tie() {
        let candidates = vec![dvector![1.0], dvector![-1.0], dvector![0.5]];
        let reference = dvector![0.0];
        // 0.5 is strictly closest
        assert_eq!(closest_solution(&candidates, &reference), Some(dvector![0.5]));
        // with the strict minimum removed, 1.0 and -1.0 tie and the first wins
        let tied = vec![dvector![1.0], dvector![-1.0]];
        assert_eq!(closest_solution(&tied, &reference), Some(dvector![1.0]));
        assert_eq!(closest_solution(&Vec::new(), &reference), None);
    }

    #[test]
    fn closest_pair_searches_all_pairs() {
        // Independent per-side minimization against zero would pick 0.0 and
        // 2.5 (distance 2.5); the all-pairs search finds (2.0, 2.5).
        let a = vec![dvector![0.0], dvector![2.0]];
        let b = vec![dvector![10.0], dvector![2.5]];
        let (best_a, best_b) = closest_pair(&a, &b).unwrap();
        assert_eq!(best_a, dvector![2.0]);
        assert_eq!(best_b, dvector![2.5]);
        assert!(closest_pair(&a, &Vec::new()).is_none());
    }

    #[test]
    fn joint_format_check_rejects_reordered_names() {
        let solver = vec!["a".to_string(), "b".to_string()];
        assert!(check_joint_position_format(&solver, &solver).is_ok());
        let reordered = vec!["b".to_string(), "a".to_string()];
        assert!(check_joint_position_format(&solver, &reordered).is_err());
        let short = vec!["a".to_string()];
        assert!(check_joint_position_format(&solver, &short).is_err());
    }
}
