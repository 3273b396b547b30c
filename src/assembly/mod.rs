//! CIL instruction model: opcodes, operands, and stack-effect simulation.
//!
//! This module carries everything the crate knows about individual instructions.
//! [`Code`] is the opcode identity with its static classification table, [`Instruction`]
//! couples an opcode with a decoded operand and a stable identity, and the [`stack`]
//! functions turn instruction sequences into stack-depth arithmetic.
//!
//! # Key Types
//! - [`Code`] - opcode with mnemonic, flow, operand and stack classifications
//! - [`Instruction`] - one operation, with the classification/mutation facade
//! - [`Operand`], [`Immediate`], [`MethodRef`] - decoded operand shapes
//!
//! # Main Functions
//! - [`update_stack`] - stack effect of a single instruction
//! - [`simulate`] / [`simulate_block`] - folds over sequences and blocks

mod code;
mod instruction;
mod stack;

pub use code::{Code, FlowType, OperandKind, PopBehavior, PushBehavior};
pub use instruction::{
    Immediate, InstrId, Instruction, MethodRef, MethodRefRc, Operand, SequencePoint, Token,
};
pub use stack::{simulate, simulate_block, update_stack};
