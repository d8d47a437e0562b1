//! Seed trajectory generation for robot motion planning.
//!
//! A motion request arrives as a sparse, human authored tree of "move to
//! this waypoint" instructions, each waypoint expressed in joint space or in
//! Cartesian task space. This crate converts that tree into a dense,
//! kinematically consistent sequence of joint space states: the seed
//! trajectory that downstream trajectory optimizers require as input, and
//! that can also drive freespace or linear motions standalone when no
//! optimization is needed.
//!
//! # Features
//!
//! - All nine waypoint type combinations (joint/Cartesian/state on either
//!   end of a segment) are handled uniformly; state waypoints degrade to
//!   joint waypoints at dispatch, so profiles implement just four
//!   operations per motion type.
//! - Adaptive step sizing ("Longest Valid Segment"): a segment is
//!   subdivided until no single step exceeds the configured translation,
//!   rotation *and* joint space lengths, whichever demands the most steps.
//! - Fixed resolution interpolation when the caller wants a predetermined
//!   step count regardless of segment extent.
//! - Redundant inverse kinematics solutions are disambiguated by Euclidean
//!   nearest neighbor; when both segment ends are free, the pair of
//!   candidates with the smallest mutual distance wins.
//! - A segment whose Cartesian end cannot be solved does not fail the
//!   request: the seed degrades to a repeated endpoint of the right length,
//!   leaving the downstream optimizer something well formed to start from.
//! - Kinematics stays behind a trait; any forward/inverse solver of any
//!   degree of freedom can be planned against.
//!
//! The entry point is [`planner::SimpleMotionPlanner::solve`], which takes a
//! [`request::PlannerRequest`] and reports success or failure exclusively
//! through the [`request::PlannerStatus`] of its response. Collision
//! checking, trajectory smoothing and time parameterization are not this
//! crate's concern.

pub mod fixed_size;
pub mod instruction;
pub mod kinematic_traits;
pub mod lvs;
pub mod manipulator;
pub mod planner;
pub mod planner_error;
pub mod profile;
pub mod request;
pub mod waypoint;

#[path = "utils/utils.rs"]
pub mod utils;

#[cfg(test)]
mod tests;
