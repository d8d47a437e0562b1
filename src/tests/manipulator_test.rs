#[cfg(test)]
mod tests {
    use nalgebra::{Translation3, UnitQuaternion};

    use crate::kinematic_traits::Pose;
    use crate::manipulator::ManipulatorInfo;
    use crate::planner_error::PlannerError;

    fn tool(z: f64) -> Pose {
        Pose::from_parts(Translation3::new(0.0, 0.0, z), UnitQuaternion::identity())
    }

    #[test]
    fn non_empty_fields_win_over_empty_ones() {
        let composite = ManipulatorInfo::new("arm");
        let mut instruction = ManipulatorInfo::default();
        instruction.ik_solver = "analytic".to_string();
        instruction.tcp = Some(tool(0.2));

        let combined = composite.combined(&instruction).unwrap();
        assert_eq!(combined.manipulator, "arm");
        assert_eq!(combined.ik_solver, "analytic");
        assert_eq!(combined.tcp, Some(tool(0.2)));
    }

    #[test]
    fn equal_fields_combine_without_conflict() {
        let mut a = ManipulatorInfo::new("arm");
        a.tcp = Some(tool(0.2));
        let mut b = ManipulatorInfo::new("arm");
        b.tcp = Some(tool(0.2));

        let combined = a.combined(&b).unwrap();
        assert_eq!(combined.manipulator, "arm");
        assert_eq!(combined.tcp, Some(tool(0.2)));
    }

    #[test]
    fn differing_manipulators_are_a_conflict() {
        let a = ManipulatorInfo::new("arm");
        let b = ManipulatorInfo::new("gantry");
        assert!(matches!(
            a.combined(&b),
            Err(PlannerError::ManipulatorConflict(_))
        ));
    }

    #[test]
    fn differing_tool_transforms_are_a_conflict() {
        let mut a = ManipulatorInfo::new("arm");
        a.tcp = Some(tool(0.2));
        let mut b = ManipulatorInfo::new("arm");
        b.tcp = Some(tool(0.3));
        assert!(matches!(
            a.combined(&b),
            Err(PlannerError::ManipulatorConflict(_))
        ));
    }

    #[test]
    fn two_defaults_combine_into_a_default() {
        let combined = ManipulatorInfo::default()
            .combined(&ManipulatorInfo::default())
            .unwrap();
        assert!(combined.is_empty());
    }
}
