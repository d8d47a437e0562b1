#[cfg(test)]
mod tests {
    use crate::fixed_size;
    use crate::instruction::{MotionType, PlanInstruction};
    use crate::planner_error::PlannerError;
    use crate::profile::{FixedSizeProfile, SeedSpace, SimplePlannerProfile};
    use crate::tests::test_utils::*;
    use crate::waypoint::Waypoint;

    fn freespace_to(waypoint: Waypoint) -> PlanInstruction {
        PlanInstruction::new(waypoint, MotionType::Freespace)
    }

    #[test]
    fn joint_joint_emits_exactly_the_requested_resolution() {
        let start = joint_waypoint(0.0, 0.0);
        let end = joint_waypoint(1.0, 0.0);
        let instruction = freespace_to(Waypoint::Joint(end.clone()));
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_joint_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            5,
        )
        .unwrap();
        assert_states_close(
            &state_positions(&seed),
            &[[0.25, 0.0], [0.5, 0.0], [0.75, 0.0], [1.0, 0.0]],
        );
    }

    #[test]
    fn step_count_is_independent_of_segment_length() {
        let start = joint_waypoint(0.2, 0.7);
        let end = joint_waypoint(0.2, 0.7);
        let instruction = freespace_to(Waypoint::Joint(end.clone()));
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_joint_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            4,
        )
        .unwrap();
        assert_states_close(
            &state_positions(&seed),
            &[[0.2, 0.7], [0.2, 0.7], [0.2, 0.7]],
        );
    }

    #[test]
    fn joint_joint_needs_no_forward_solve() {
        let start = joint_waypoint(0.0, 0.0);
        let end = joint_waypoint(1.0, 1.0);
        let instruction = freespace_to(Waypoint::Joint(end.clone()));
        let mut arm = PlanarArm::new();
        arm.fail_forward = true;
        let request = request(program(), arm, scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_joint_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            3,
        )
        .unwrap();
        assert_states_close(&state_positions(&seed), &[[0.5, 0.5], [1.0, 1.0]]);
    }

    #[test]
    fn identical_inputs_produce_identical_seeds() {
        let start = joint_waypoint(0.1, 0.2);
        let end = joint_waypoint(0.9, -0.4);
        let instruction = freespace_to(Waypoint::Joint(end.clone()));
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let first = fixed_size::state_interpolate_joint_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            7,
        )
        .unwrap();
        let second = fixed_size::state_interpolate_joint_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            7,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reversed_segment_lands_exactly_on_the_other_endpoint() {
        let a = joint_waypoint(0.0, 0.3);
        let b = joint_waypoint(1.0, -0.7);
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let forward = fixed_size::state_interpolate_joint_joint(
            &a,
            &b,
            &freespace_to(Waypoint::Joint(b.clone())),
            &request,
            &arm_info(),
            6,
        )
        .unwrap();
        let backward = fixed_size::state_interpolate_joint_joint(
            &b,
            &a,
            &freespace_to(Waypoint::Joint(a.clone())),
            &request,
            &arm_info(),
            6,
        )
        .unwrap();

        let last_forward = state_positions(&forward).pop().unwrap();
        let last_backward = state_positions(&backward).pop().unwrap();
        assert!((last_forward[0] - 1.0).abs() < 1e-12 && (last_forward[1] + 0.7).abs() < 1e-12);
        assert!((last_backward[0]).abs() < 1e-12 && (last_backward[1] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn joint_cart_picks_the_nearest_candidate() {
        let start = joint_waypoint(0.0, 0.0);
        let end = cartesian_waypoint(1.0, 0.0);
        let instruction = freespace_to(Waypoint::Cartesian(end.clone()));
        let request = request(program(), PlanarArm::with_offsets(&[10.0]), scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_joint_cart(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            3,
        )
        .unwrap();
        assert_states_close(&state_positions(&seed), &[[0.5, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn joint_cart_without_solution_repeats_the_start() {
        let start = joint_waypoint(0.4, 0.4);
        let end = cartesian_waypoint(1.0, 0.0);
        let instruction = freespace_to(Waypoint::Cartesian(end.clone()));
        let request = request(program(), PlanarArm::failing_inverse(), scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_joint_cart(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            5,
        )
        .unwrap();
        assert_states_close(
            &state_positions(&seed),
            &[[0.4, 0.4], [0.4, 0.4], [0.4, 0.4], [0.4, 0.4]],
        );
    }

    #[test]
    fn cart_joint_without_solution_repeats_the_end() {
        let start = cartesian_waypoint(0.0, 0.0);
        let end = joint_waypoint(1.0, 0.5);
        let instruction = freespace_to(Waypoint::Joint(end.clone()));
        let request = request(program(), PlanarArm::failing_inverse(), scene(0.0, 0.0));

        let seed = fixed_size::state_interpolate_cart_joint(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            3,
        )
        .unwrap();
        assert_states_close(&state_positions(&seed), &[[1.0, 0.5], [1.0, 0.5]]);
    }

    #[test]
    fn cart_cart_without_solutions_repeats_the_shared_seed() {
        let start = cartesian_waypoint(0.0, 0.0);
        let end = cartesian_waypoint(1.0, 0.0);
        let instruction = freespace_to(Waypoint::Cartesian(end.clone()));
        let request = request(program(), PlanarArm::failing_inverse(), scene(0.6, -0.1));

        let seed = fixed_size::state_interpolate_cart_cart(
            &start,
            &end,
            &instruction,
            &request,
            &arm_info(),
            3,
        )
        .unwrap();
        assert_states_close(&state_positions(&seed), &[[0.6, -0.1], [0.6, -0.1]]);
    }

    #[test]
    fn linear_and_freespace_use_their_own_step_counts() {
        let profile = FixedSizeProfile {
            linear_steps: 3,
            freespace_steps: 6,
            seed_space: SeedSpace::JointInterpolated,
        };
        let start = joint_waypoint(0.0, 0.0);
        let end = joint_waypoint(1.0, 0.0);
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let linear = PlanInstruction::new(Waypoint::Joint(end.clone()), MotionType::Linear);
        let seed = profile
            .joint_joint_linear(&start, &end, &linear, &request, &arm_info())
            .unwrap();
        assert_eq!(seed.len(), 2);

        let freespace = freespace_to(Waypoint::Joint(end.clone()));
        let seed = profile
            .joint_joint_freespace(&start, &end, &freespace, &request, &arm_info())
            .unwrap();
        assert_eq!(seed.len(), 5);
    }

    #[test]
    fn cartesian_seeded_mode_fails_fast() {
        let profile = FixedSizeProfile {
            seed_space: SeedSpace::CartesianInterpolated,
            ..FixedSizeProfile::default()
        };
        let start = cartesian_waypoint(0.0, 0.0);
        let end = cartesian_waypoint(1.0, 0.0);
        let instruction = freespace_to(Waypoint::Cartesian(end.clone()));
        let request = request(program(), PlanarArm::new(), scene(0.0, 0.0));

        let result =
            profile.cart_cart_freespace(&start, &end, &instruction, &request, &arm_info());
        assert!(matches!(result, Err(PlannerError::NotImplemented(_))));
    }
}
