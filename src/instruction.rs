//! The instruction tree. A request arrives as a composite of plan
//! instructions ("move to this waypoint, linearly or through freespace");
//! the planner answers with a composite of the same shape where every plan
//! instruction has been replaced by the move instructions interpolating to
//! its target. Sequence order inside a composite is temporal order.

use crate::manipulator::ManipulatorInfo;
use crate::waypoint::Waypoint;

/// Motion type tag shared by plan and move instructions. Exactly one
/// instruction in the top level tree carries `Start`; it supplies the
/// initial waypoint for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionType {
    Start,
    Linear,
    Freespace,
}

/// How the instructions of a composite may be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOrder {
    #[default]
    Ordered,
    Unordered,
    OrderedAndReversible,
}

/// One requested motion: where to go, how to get there, and under which
/// profile and manipulator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanInstruction {
    pub waypoint: Waypoint,
    pub motion_type: MotionType,
    /// Key into the planner's profile map; empty means the default profile.
    pub profile: String,
    pub manipulator_info: ManipulatorInfo,
    pub description: String,
}

impl PlanInstruction {
    pub fn new(waypoint: Waypoint, motion_type: MotionType) -> Self {
        PlanInstruction {
            waypoint,
            motion_type,
            profile: String::new(),
            manipulator_info: ManipulatorInfo::default(),
            description: String::new(),
        }
    }

    pub fn is_start(&self) -> bool {
        self.motion_type == MotionType::Start
    }

    pub fn is_linear(&self) -> bool {
        self.motion_type == MotionType::Linear
    }

    pub fn is_freespace(&self) -> bool {
        self.motion_type == MotionType::Freespace
    }
}

/// One resolved trajectory state. The waypoint is a state waypoint, except
/// in the Cartesian-seeded mode where it would be a Cartesian waypoint (that
/// mode is declared but not implemented, see the step generators). Profile
/// and description are copied through from the originating plan instruction
/// for traceability.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstruction {
    pub waypoint: Waypoint,
    pub motion_type: MotionType,
    pub profile: String,
    pub manipulator_info: ManipulatorInfo,
    pub description: String,
}

impl MoveInstruction {
    pub fn new(waypoint: Waypoint, motion_type: MotionType) -> Self {
        MoveInstruction {
            waypoint,
            motion_type,
            profile: String::new(),
            manipulator_info: ManipulatorInfo::default(),
            description: String::new(),
        }
    }
}

/// Closed variant over everything a composite can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Plan(PlanInstruction),
    Move(MoveInstruction),
    Composite(CompositeInstruction),
}

/// An ordered, recursively nestable sequence of instructions with its own
/// profile, ordering mode and manipulator info, plus a slot for the start
/// instruction of the tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositeInstruction {
    pub description: String,
    pub profile: String,
    pub order: CompositeOrder,
    pub manipulator_info: ManipulatorInfo,
    start: Option<Box<Instruction>>,
    instructions: Vec<Instruction>,
}

impl CompositeInstruction {
    pub fn new(
        profile: impl Into<String>,
        order: CompositeOrder,
        manipulator_info: ManipulatorInfo,
    ) -> Self {
        CompositeInstruction {
            description: String::new(),
            profile: profile.into(),
            order,
            manipulator_info,
            start: None,
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// True when the composite holds no instructions. The start slot does
    /// not count; a tree of only a start instruction requests no motion.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn set_start_instruction(&mut self, instruction: Instruction) {
        self.start = Some(Box::new(instruction));
    }

    pub fn start_instruction(&self) -> Option<&Instruction> {
        self.start.as_deref()
    }

    pub fn has_start_instruction(&self) -> bool {
        self.start.is_some()
    }

    /// All move instructions in the tree, depth first, not including the
    /// start slot. Convenient for consumers that want the flat seed.
    pub fn flattened_moves(&self) -> Vec<&MoveInstruction> {
        let mut moves = Vec::new();
        self.collect_moves(&mut moves);
        moves
    }

    fn collect_moves<'a>(&'a self, moves: &mut Vec<&'a MoveInstruction>) {
        for instruction in &self.instructions {
            match instruction {
                Instruction::Move(mv) => moves.push(mv),
                Instruction::Composite(composite) => composite.collect_moves(moves),
                Instruction::Plan(_) => {}
            }
        }
    }
}
