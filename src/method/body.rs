//! Method body snapshot and restore.
//!
//! A transformation that rewrites a method body speculatively needs a way to put the
//! original back when it bails out. [`MethodBody::snapshot`] deep-copies the
//! instruction list and exception-handler table with full identity remapping: every
//! operand and handler boundary that references another instruction in the same body
//! is redirected to the corresponding copy. [`MethodBody::restore`] swaps a snapshot
//! back in place.
//!
//! Non-reference operands (literals, strings, method and member references) are
//! shared between the original and the copy, not duplicated.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    assembly::{Code, InstrId, Instruction, Operand},
    method::ExceptionHandler,
    Error, Result,
};

/// An independent, remapped copy of a body's instructions and handlers.
///
/// Produced by [`MethodBody::snapshot`]; consumed by [`MethodBody::restore`].
#[derive(Debug, Clone)]
pub struct BodySnapshot {
    /// The copied instruction list, ids renumbered positionally.
    pub instructions: Vec<Instruction>,
    /// The copied handler table, boundaries remapped into `instructions`.
    pub exception_handlers: Vec<ExceptionHandler>,
}

/// The live instruction list and exception-handler table of one method.
///
/// Instruction ids are expected to be unique within a body; bodies built through
/// [`MethodBody::new`] and maintained through [`MethodBody::restore`] keep that
/// property.
#[derive(Debug, Clone, Default)]
pub struct MethodBody {
    instructions: Vec<Instruction>,
    exception_handlers: Vec<ExceptionHandler>,
}

impl MethodBody {
    /// Creates a body from an instruction list and handler table.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>, exception_handlers: Vec<ExceptionHandler>) -> Self {
        MethodBody {
            instructions,
            exception_handlers,
        }
    }

    /// Returns the instruction list in order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the exception-handler table.
    #[must_use]
    pub fn exception_handlers(&self) -> &[ExceptionHandler] {
        &self.exception_handlers
    }

    /// Deep-copies the body with identity remapping.
    ///
    /// Instructions are copied in order and renumbered positionally. Every
    /// [`Operand::Target`], every entry of an [`Operand::Switch`] list, and all five
    /// boundaries of every handler are remapped from the old instruction's identity to
    /// the corresponding new instruction's identity through an id-to-position lookup
    /// built over the old list. Literals and member/signature references are shared,
    /// not duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an operand or handler boundary references
    /// an instruction that is not part of this body.
    pub fn snapshot(&self) -> Result<BodySnapshot> {
        let index_of: HashMap<InstrId, u32> = self
            .instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| (instruction.id(), index as u32))
            .collect();

        let remap = |id: InstrId| -> Result<InstrId> {
            index_of.get(&id).map(|&index| InstrId::new(index)).ok_or_else(|| {
                Error::InvalidArgument(format!("reference to an instruction outside the body: {id}"))
            })
        };

        let mut instructions = Vec::with_capacity(self.instructions.len());
        for (index, instruction) in self.instructions.iter().enumerate() {
            let mut copy = instruction.clone_with_id(InstrId::new(index as u32));
            match copy.operand_mut() {
                Operand::Target(target) => *target = remap(*target)?,
                Operand::Switch(targets) => {
                    for target in targets {
                        *target = remap(*target)?;
                    }
                }
                _ => {}
            }
            instructions.push(copy);
        }

        let remap_boundary = |boundary: Option<InstrId>| -> Result<Option<InstrId>> {
            boundary.map(&remap).transpose()
        };

        let mut exception_handlers = Vec::with_capacity(self.exception_handlers.len());
        for handler in &self.exception_handlers {
            exception_handlers.push(ExceptionHandler {
                flags: handler.flags,
                catch_type: handler.catch_type,
                try_start: remap_boundary(handler.try_start)?,
                try_end: remap_boundary(handler.try_end)?,
                filter_start: remap_boundary(handler.filter_start)?,
                handler_start: remap_boundary(handler.handler_start)?,
                handler_end: remap_boundary(handler.handler_end)?,
            });
        }

        Ok(BodySnapshot {
            instructions,
            exception_handlers,
        })
    }

    /// Replaces the live instruction list and handler table in place.
    ///
    /// Restoring does not produce another remappable snapshot by itself; a caller that
    /// needs a further independent copy calls [`MethodBody::snapshot`] again against
    /// the restored state.
    pub fn restore(&mut self, snapshot: BodySnapshot) {
        self.instructions = snapshot.instructions;
        self.exception_handlers = snapshot.exception_handlers;
    }

    /// Collects the `ldstr` operands of the body in order.
    #[must_use]
    pub fn code_strings(&self) -> Vec<Arc<str>> {
        self.instructions
            .iter()
            .filter_map(|instruction| match instruction.operand() {
                Operand::String(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the body consists of nothing but `nop` and `ret`.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.instructions
            .iter()
            .all(|instruction| matches!(instruction.code(), Code::Nop | Code::Ret))
    }
}

/// Matches a fixed opcode sequence at `start`.
///
/// Returns the matched instruction run if `instructions[start..]` begins with exactly
/// the opcodes in `codes`, or `None` on any mismatch or when the slice is too short.
#[must_use]
pub fn find_instruction_run<'a>(
    instructions: &'a [Instruction],
    start: usize,
    codes: &[Code],
) -> Option<&'a [Instruction]> {
    let end = start.checked_add(codes.len())?;
    let run = instructions.get(start..end)?;
    if run
        .iter()
        .zip(codes)
        .all(|(instruction, &code)| instruction.code() == code)
    {
        Some(run)
    } else {
        None
    }
}
