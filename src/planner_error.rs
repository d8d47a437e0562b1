//! Error taxonomy of the seed planner.
//!
//! Only one of these is ever fatal without recourse: a forward kinematics
//! failure on a configuration the request claims is reachable. A missing
//! inverse solution is deliberately *not* represented here; empty candidate
//! sets degrade into repeated-endpoint seeds instead (see the step
//! generators). None of these errors cross the public `solve` boundary:
//! the planner catches them and reports a status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Malformed request: missing collaborator handle, empty instruction
    /// tree, mismatched joint data or an unsupported waypoint combination.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Forward kinematics returned no pose for a configuration that was
    /// assumed reachable. There is no fallback for a failed forward solve.
    #[error("kinematics failure: {0}")]
    KinematicsFailure(String),

    /// The instruction carries a motion type the step generators cannot
    /// interpolate.
    #[error("unsupported instruction: {0}")]
    UnsupportedInstruction(String),

    /// Two non-empty manipulator infos disagree on the same field.
    #[error("conflicting manipulator info: {0}")]
    ManipulatorConflict(String),

    /// The branch exists at the interface but has no implementation yet.
    /// Callers detect unsupported branches through this variant instead of
    /// an unwind.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
