//! # cilflow Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! functions from the cilflow library. Import this module to get quick access to the
//! essentials for block scheduling and method-body rewriting.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilflow operations
pub use crate::Error;

/// The result type used throughout cilflow
pub use crate::Result;

// ================================================================================================
// Instruction Model
// ================================================================================================

/// Opcodes and their static classifications
pub use crate::assembly::{Code, FlowType, OperandKind, PopBehavior, PushBehavior};

/// Instructions, operands and callee signatures
pub use crate::assembly::{
    Immediate, InstrId, Instruction, MethodRef, MethodRefRc, Operand, SequencePoint, Token,
};

/// Stack-depth simulation
pub use crate::assembly::{simulate, simulate_block, update_stack};

// ================================================================================================
// Block Graph and Scheduling
// ================================================================================================

/// Block graph shapes and the scheduler entry point
pub use crate::blocks::{
    schedule, BaseBlock, Block, BlockArena, BlockId, RegionBlock, RegionKind, Scope, ScopeKind,
};

// ================================================================================================
// Method Bodies
// ================================================================================================

/// Bodies, handlers, snapshot/restore
pub use crate::method::{
    find_instruction_run, BodySnapshot, ExceptionHandler, ExceptionHandlerFlags, MethodBody,
};

// ================================================================================================
// Call Tallies
// ================================================================================================

/// Per-invocation call accumulators
pub use crate::counters::{CallCounter, MethodCalls};
