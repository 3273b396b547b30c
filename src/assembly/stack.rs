//! Evaluation-stack depth simulation.
//!
//! A pure mapping from `(instruction, incoming depth)` to the outgoing depth, and its
//! fold over instruction sequences. This is integer bookkeeping only: no values are
//! tracked, no operand types are checked. The scheduler uses it to compute the depth
//! every block is entered and exited with, and a downstream emitter uses the same
//! arithmetic to infer a method's maximum stack depth.
//!
//! Call-class opcodes are simulated through their callee signature; everything else
//! goes through the categorical push/pop table on [`Code`]. Two deliberate table
//! quirks are preserved from the reference behavior:
//!
//! - `ret` returns the input depth unchanged. Whether it logically pops a value
//!   depends on the enclosing method signature, which is irrelevant for bounding the
//!   depth of the already-unreachable code after it.
//! - `calli` runs through its signature like any other call; the popped function
//!   pointer is not modeled.

use crate::{
    assembly::{Code, FlowType, Instruction, Operand, PopBehavior, PushBehavior},
    blocks::Block,
    Error, Result,
};

/// Computes the stack depth after executing `instruction` at depth `depth_in`.
///
/// # Errors
///
/// Returns [`Error::InvalidOperand`] if a call-class instruction carries no callee
/// signature, and [`Error::InvalidOpcode`] if a non-call opcode is classified as
/// `Variable`, a table gap that must surface immediately rather than corrupt the
/// depth accounting silently.
pub fn update_stack(instruction: &Instruction, depth_in: i32) -> Result<i32> {
    if instruction.code().flow() == FlowType::Call {
        return update_stack_call(instruction, depth_in);
    }

    let mut depth = depth_in;
    match instruction.code().push_behavior() {
        PushBehavior::None => {}
        PushBehavior::One => depth += 1,
        PushBehavior::Two => depth += 2,
        PushBehavior::Variable => {
            return Err(Error::InvalidOpcode(instruction.code().mnemonic()));
        }
    }

    match instruction.code().pop_behavior() {
        PopBehavior::None => {}
        PopBehavior::One => depth -= 1,
        PopBehavior::Two => depth -= 2,
        PopBehavior::Three => depth -= 3,
        PopBehavior::All => depth = 0,
        PopBehavior::Variable => {
            // Only ret reaches this arm; its pop depends on the enclosing method
            // signature and is ignored.
            if instruction.code() != Code::Ret {
                return Err(Error::InvalidOpcode(instruction.code().mnemonic()));
            }
        }
    }

    Ok(depth)
}

fn update_stack_call(instruction: &Instruction, depth_in: i32) -> Result<i32> {
    let Operand::Method(method) = instruction.operand() else {
        return Err(Error::InvalidOperand(format!(
            "'{}' carries no callee signature",
            instruction.code().mnemonic()
        )));
    };

    let is_newobj = instruction.code() == Code::Newobj;
    let mut depth = depth_in;
    if method.has_return {
        depth += 1;
    }
    if method.has_this && is_newobj {
        depth += 1;
    }

    depth -= i32::try_from(method.param_count).unwrap_or(i32::MAX);
    if method.has_this && !is_newobj {
        depth -= 1;
    }

    Ok(depth)
}

/// Folds [`update_stack`] over `instructions` in order.
///
/// Associative with concatenation: simulating two sequences back to back equals
/// simulating their concatenation.
///
/// # Errors
///
/// Propagates the first [`update_stack`] failure.
pub fn simulate(instructions: &[Instruction], depth_in: i32) -> Result<i32> {
    let mut depth = depth_in;
    for instruction in instructions {
        depth = update_stack(instruction, depth)?;
    }
    Ok(depth)
}

/// Simulates a block's instruction sequence starting at depth `depth_in`.
///
/// # Errors
///
/// Propagates the first [`update_stack`] failure.
pub fn simulate_block(block: &Block, depth_in: i32) -> Result<i32> {
    simulate(block.instructions(), depth_in)
}
