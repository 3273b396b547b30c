//! CIL instruction representation and the classification/mutation facade.
//!
//! This module defines the instruction value type the whole crate operates on. An
//! [`Instruction`] couples a stable identity ([`InstrId`]), an opcode ([`Code`]) and a
//! decoded [`Operand`]. Identity matters here: branch operands and exception-handler
//! boundaries reference other instructions through their [`InstrId`], never by position,
//! so lists can be copied, reordered and spliced without breaking references as long as
//! ids are remapped consistently (see [`crate::method::MethodBody::snapshot`]).
//!
//! # Key Types
//! - [`Instruction`] - one bytecode operation with identity and operand
//! - [`Operand`] / [`Immediate`] - decoded operand shapes
//! - [`MethodRef`] - the callee signature shape call-class opcodes carry
//! - [`SequencePoint`] - opaque debug-position tag
//!
//! Non-reference operands (literals, string and member references) are shared between
//! copies rather than duplicated; only instruction references are identity-remapped.

use std::fmt;
use std::sync::Arc;

use crate::{
    assembly::{Code, FlowType, OperandKind},
    Error, Result,
};

/// Stable identity of one instruction within a method body.
///
/// Ids are plain integers so that identity checks and remapping tables are O(1) array
/// or hash operations instead of pointer comparisons. Uniqueness is per body; two
/// different bodies may reuse the same id values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrId(u32);

impl InstrId {
    /// Creates an instruction id from its raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        InstrId(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IL_{:04}", self.0)
    }
}

/// A metadata token referencing a field, type or other member.
///
/// The engine never resolves tokens; it carries them opaquely so rewritten bodies keep
/// referring to the same metadata rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u32);

impl Token {
    /// Creates a token from its raw 32-bit value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Token(value)
    }

    /// Returns the raw token value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

/// A numeric literal embedded in an instruction.
///
/// The variant records the encoded width: `ldc.i4.s` carries an [`Immediate::Int8`]
/// that decodes by sign extension, while `ldc.i4` carries its value verbatim as
/// [`Immediate::Int32`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immediate {
    /// Signed 8-bit literal.
    Int8(i8),
    /// Unsigned 8-bit literal.
    UInt8(u8),
    /// Signed 32-bit literal.
    Int32(i32),
    /// Signed 64-bit literal.
    Int64(i64),
    /// 32-bit floating literal.
    Float32(f32),
    /// 64-bit floating literal.
    Float64(f64),
}

/// The callee signature shape a call-class instruction references.
///
/// This is all the stack simulator needs from a method reference: whether a return
/// value is pushed, whether an instance receiver is bound, and how many fixed
/// parameters are popped. The full name is carried for diagnostics and call tallies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Full name of the referenced method, used as a stable key.
    pub full_name: String,
    /// Whether the callee binds an instance receiver.
    pub has_this: bool,
    /// Whether the callee declares a return value.
    pub has_return: bool,
    /// Number of fixed parameters.
    pub param_count: u32,
}

impl MethodRef {
    /// Creates a new method reference.
    #[must_use]
    pub fn new(full_name: impl Into<String>, has_this: bool, has_return: bool, param_count: u32) -> Self {
        MethodRef {
            full_name: full_name.into(),
            has_this,
            has_return,
            param_count,
        }
    }
}

/// Shared handle to a [`MethodRef`].
///
/// Method references are shared between instruction copies, not duplicated.
pub type MethodRefRc = Arc<MethodRef>;

/// An opaque debug-position tag.
///
/// Carried through copies and reorderings untouched so a downstream writer can emit
/// sequence-point tables for the rewritten body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePoint {
    /// Original IL offset the position was recorded at.
    pub offset: u32,
    /// Source line.
    pub line: u32,
    /// Source column.
    pub column: u32,
}

/// A decoded instruction operand.
///
/// [`Operand::Target`] and [`Operand::Switch`] reference other instructions by
/// identity; all other variants are plain values or shared references.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand.
    None,
    /// Numeric literal.
    Immediate(Immediate),
    /// Local variable slot.
    Local(u16),
    /// Method argument slot.
    Argument(u16),
    /// Branch target.
    Target(InstrId),
    /// Ordered `switch` targets.
    Switch(Vec<InstrId>),
    /// Callee signature reference.
    Method(MethodRefRc),
    /// User string (`ldstr`).
    String(Arc<str>),
    /// Field/type/member token.
    Token(Token),
}

/// One bytecode operation.
///
/// # Examples
///
/// ```rust
/// use cilflow::assembly::{Code, Instruction, InstrId, Operand};
///
/// let instr = Instruction::new(InstrId::new(7), Code::LdcI42, Operand::None);
/// assert!(instr.is_ldc_i4());
/// assert_eq!(instr.ldc_i4_value()?, 2);
/// # Ok::<(), cilflow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    id: InstrId,
    code: Code,
    operand: Operand,
    sequence_point: Option<SequencePoint>,
}

impl Instruction {
    /// Creates an instruction with the given identity, opcode and operand.
    #[must_use]
    pub fn new(id: InstrId, code: Code, operand: Operand) -> Self {
        Instruction {
            id,
            code,
            operand,
            sequence_point: None,
        }
    }

    /// Attaches a debug-position tag, consuming and returning the instruction.
    #[must_use]
    pub fn with_sequence_point(mut self, point: SequencePoint) -> Self {
        self.sequence_point = Some(point);
        self
    }

    /// Returns this instruction's identity.
    #[must_use]
    pub fn id(&self) -> InstrId {
        self.id
    }

    /// Returns the opcode.
    #[must_use]
    pub fn code(&self) -> Code {
        self.code
    }

    /// Returns the operand.
    #[must_use]
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Returns the debug-position tag, if one is attached.
    #[must_use]
    pub fn sequence_point(&self) -> Option<SequencePoint> {
        self.sequence_point
    }

    pub(crate) fn clone_with_id(&self, id: InstrId) -> Self {
        Instruction {
            id,
            code: self.code,
            operand: self.operand.clone(),
            sequence_point: self.sequence_point,
        }
    }

    pub(crate) fn operand_mut(&mut self) -> &mut Operand {
        &mut self.operand
    }

    /// Returns `true` for the `ldc.i4` family of integer-literal pushes.
    #[must_use]
    pub fn is_ldc_i4(&self) -> bool {
        self.code.is_ldc_i4()
    }

    /// Decodes the pushed integer literal of an `ldc.i4`-family instruction.
    ///
    /// The nine dedicated short forms decode to −1..8, `ldc.i4.s` sign-extends its byte
    /// operand, and `ldc.i4` returns its stored value verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperand`] if this is not an `ldc.i4`-family instruction,
    /// or if the operand does not have the width the opcode requires.
    pub fn ldc_i4_value(&self) -> Result<i32> {
        if let Some(value) = self.code.ldc_i4_shorthand() {
            return Ok(value);
        }
        match (self.code, &self.operand) {
            (Code::LdcI4S, Operand::Immediate(Immediate::Int8(value))) => Ok(i32::from(*value)),
            (Code::LdcI4, Operand::Immediate(Immediate::Int32(value))) => Ok(*value),
            _ => Err(Error::InvalidOperand(format!(
                "not an ldc.i4 instruction: {}",
                self.code.mnemonic()
            ))),
        }
    }

    /// Returns `true` for two-way conditional branches.
    #[must_use]
    pub fn is_conditional_branch(&self) -> bool {
        self.code.is_conditional_branch()
    }

    /// Returns `true` for `br`/`br.s`.
    #[must_use]
    pub fn is_br(&self) -> bool {
        matches!(self.code, Code::Br | Code::BrS)
    }

    /// Returns `true` for `brfalse`/`brfalse.s`.
    #[must_use]
    pub fn is_brfalse(&self) -> bool {
        matches!(self.code, Code::Brfalse | Code::BrfalseS)
    }

    /// Returns `true` for `brtrue`/`brtrue.s`.
    #[must_use]
    pub fn is_brtrue(&self) -> bool {
        matches!(self.code, Code::Brtrue | Code::BrtrueS)
    }

    /// Returns `true` for `leave`/`leave.s`.
    #[must_use]
    pub fn is_leave(&self) -> bool {
        matches!(self.code, Code::Leave | Code::LeaveS)
    }

    /// Returns `true` for `nop`.
    #[must_use]
    pub fn is_nop(&self) -> bool {
        self.code == Code::Nop
    }

    /// Returns `true` for `pop`.
    #[must_use]
    pub fn is_pop(&self) -> bool {
        self.code == Code::Pop
    }

    /// Returns `true` for the `stloc` family.
    #[must_use]
    pub fn is_stloc(&self) -> bool {
        matches!(
            self.code,
            Code::Stloc | Code::StlocS | Code::Stloc0 | Code::Stloc1 | Code::Stloc2 | Code::Stloc3
        )
    }

    /// Returns `true` for the `ldloc` family (value loads, not address-of).
    #[must_use]
    pub fn is_ldloc(&self) -> bool {
        matches!(
            self.code,
            Code::Ldloc | Code::LdlocS | Code::Ldloc0 | Code::Ldloc1 | Code::Ldloc2 | Code::Ldloc3
        )
    }

    /// Returns `true` if the instruction pushes exactly one value and pops nothing:
    /// literal loads, local/argument loads and address-of, string and token loads.
    #[must_use]
    pub fn is_simple_load(&self) -> bool {
        matches!(
            self.code,
            Code::Ldarg
                | Code::LdargS
                | Code::Ldarg0
                | Code::Ldarg1
                | Code::Ldarg2
                | Code::Ldarg3
                | Code::Ldarga
                | Code::LdargaS
                | Code::LdcI4
                | Code::LdcI4S
                | Code::LdcI4M1
                | Code::LdcI40
                | Code::LdcI41
                | Code::LdcI42
                | Code::LdcI43
                | Code::LdcI44
                | Code::LdcI45
                | Code::LdcI46
                | Code::LdcI47
                | Code::LdcI48
                | Code::LdcI8
                | Code::LdcR4
                | Code::LdcR8
                | Code::Ldloc
                | Code::LdlocS
                | Code::Ldloc0
                | Code::Ldloc1
                | Code::Ldloc2
                | Code::Ldloc3
                | Code::Ldloca
                | Code::LdlocaS
                | Code::Ldnull
                | Code::Ldstr
                | Code::Ldtoken
        )
    }

    /// Returns `true` if control can fall through to the next instruction: sequential
    /// opcodes, conditional and multi-way branches, and calls other than `jmp`.
    #[must_use]
    pub fn is_fall_through(&self) -> bool {
        match self.code.flow() {
            FlowType::Call => self.code != Code::Jmp,
            FlowType::Sequential | FlowType::ConditionalBranch | FlowType::Switch => true,
            _ => false,
        }
    }

    /// Resolves the local slot of a `ldloc`/`stloc`-family instruction, including the
    /// `.0`–`.3` shorthand forms. Returns `None` for anything else.
    #[must_use]
    pub fn local_index(&self) -> Option<u16> {
        match self.code {
            Code::Ldloc0 | Code::Stloc0 => Some(0),
            Code::Ldloc1 | Code::Stloc1 => Some(1),
            Code::Ldloc2 | Code::Stloc2 => Some(2),
            Code::Ldloc3 | Code::Stloc3 => Some(3),
            Code::Ldloc | Code::LdlocS | Code::Stloc | Code::StlocS => match self.operand {
                Operand::Local(index) => Some(index),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns the negated opcode of a reversible conditional branch, or `None`.
    #[must_use]
    pub fn flipped_branch_code(&self) -> Option<Code> {
        self.code.flipped_branch()
    }

    /// Returns `true` if [`Instruction::flip_conditional_branch`] would succeed.
    #[must_use]
    pub fn can_flip_conditional_branch(&self) -> bool {
        self.code.flipped_branch().is_some()
    }

    /// Replaces the opcode with its logical negation, keeping the operand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for non-reversible branches: equality
    /// and inequality-unsigned tests, and anything that is not a conditional branch.
    pub fn flip_conditional_branch(&mut self) -> Result<()> {
        match self.code.flipped_branch() {
            Some(flipped) => {
                self.code = flipped;
                Ok(())
            }
            None => Err(Error::UnsupportedOperation(format!(
                "can't flip conditional '{}'",
                self.code.mnemonic()
            ))),
        }
    }

    /// Returns the instruction references this instruction transfers control to, in
    /// operand order. Empty for opcodes with no target operand.
    #[must_use]
    pub fn targets(&self) -> Vec<InstrId> {
        match &self.operand {
            Operand::Target(target) => vec![*target],
            Operand::Switch(targets) => targets.clone(),
            _ => Vec::new(),
        }
    }

    /// Rewrites the control-transfer operand(s) to reference `targets`.
    ///
    /// Single-target branches take exactly one replacement, `switch` takes a non-empty
    /// positionally-ordered list, and every other opcode takes an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the list length does not match the
    /// opcode's operand shape.
    pub fn update_targets(&mut self, targets: &[InstrId]) -> Result<()> {
        match self.code.operand_kind() {
            OperandKind::Target => {
                if targets.len() != 1 {
                    return Err(Error::InvalidArgument(format!(
                        "'{}' takes exactly one target, got {}",
                        self.code.mnemonic(),
                        targets.len()
                    )));
                }
                self.operand = Operand::Target(targets[0]);
                Ok(())
            }
            OperandKind::Switch => {
                if targets.is_empty() {
                    return Err(Error::InvalidArgument(
                        "'switch' takes at least one target".into(),
                    ));
                }
                self.operand = Operand::Switch(targets.to_vec());
                Ok(())
            }
            _ => {
                if !targets.is_empty() {
                    return Err(Error::InvalidArgument(format!(
                        "'{}' doesn't have any targets",
                        self.code.mnemonic()
                    )));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.code.mnemonic())?;
        match &self.operand {
            Operand::None => Ok(()),
            Operand::Immediate(imm) => write!(f, " {imm:?}"),
            Operand::Local(index) => write!(f, " V_{index}"),
            Operand::Argument(index) => write!(f, " A_{index}"),
            Operand::Target(target) => write!(f, " -> {target}"),
            Operand::Switch(targets) => write!(f, " switch[{}]", targets.len()),
            Operand::Method(method) => write!(f, " {}", method.full_name),
            Operand::String(value) => write!(f, " {value:?}"),
            Operand::Token(token) => write!(f, " {token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(code: Code, operand: Operand) -> Instruction {
        Instruction::new(InstrId::new(0), code, operand)
    }

    #[test]
    fn ldc_i4_value_short_forms() {
        let expected = [
            (Code::LdcI4M1, -1),
            (Code::LdcI40, 0),
            (Code::LdcI41, 1),
            (Code::LdcI42, 2),
            (Code::LdcI43, 3),
            (Code::LdcI44, 4),
            (Code::LdcI45, 5),
            (Code::LdcI46, 6),
            (Code::LdcI47, 7),
            (Code::LdcI48, 8),
        ];
        for (code, value) in expected {
            assert_eq!(instr(code, Operand::None).ldc_i4_value().unwrap(), value);
        }
    }

    #[test]
    fn ldc_i4_value_byte_form_sign_extends() {
        let i = instr(Code::LdcI4S, Operand::Immediate(Immediate::Int8(-100)));
        assert_eq!(i.ldc_i4_value().unwrap(), -100);
    }

    #[test]
    fn ldc_i4_value_int_form_is_verbatim() {
        let i = instr(Code::LdcI4, Operand::Immediate(Immediate::Int32(0x1234_5678)));
        assert_eq!(i.ldc_i4_value().unwrap(), 0x1234_5678);
    }

    #[test]
    fn ldc_i4_value_rejects_other_opcodes() {
        let i = instr(Code::LdcI8, Operand::Immediate(Immediate::Int64(1)));
        assert!(matches!(i.ldc_i4_value(), Err(Error::InvalidOperand(_))));
    }

    #[test]
    fn flip_swaps_and_preserves_operand() {
        let target = InstrId::new(42);
        let mut i = instr(Code::Bge, Operand::Target(target));
        i.flip_conditional_branch().unwrap();
        assert_eq!(i.code(), Code::Blt);
        assert_eq!(*i.operand(), Operand::Target(target));

        i.flip_conditional_branch().unwrap();
        assert_eq!(i.code(), Code::Bge);
    }

    #[test]
    fn flip_rejects_equality_branches() {
        let mut i = instr(Code::Beq, Operand::Target(InstrId::new(1)));
        assert!(!i.can_flip_conditional_branch());
        assert!(matches!(
            i.flip_conditional_branch(),
            Err(Error::UnsupportedOperation(_))
        ));
        assert_eq!(i.code(), Code::Beq);
    }

    #[test]
    fn update_targets_single_branch() {
        let mut i = instr(Code::BrS, Operand::Target(InstrId::new(1)));
        let replacement = InstrId::new(9);
        i.update_targets(&[replacement]).unwrap();
        assert_eq!(i.targets(), vec![replacement]);

        assert!(matches!(
            i.update_targets(&[]),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            i.update_targets(&[replacement, replacement]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn update_targets_switch_round_trips_in_order() {
        let mut i = instr(Code::Switch, Operand::Switch(vec![InstrId::new(1)]));
        let replacement = [InstrId::new(5), InstrId::new(3), InstrId::new(5)];
        i.update_targets(&replacement).unwrap();
        assert_eq!(i.targets(), replacement.to_vec());

        assert!(matches!(
            i.update_targets(&[]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn update_targets_rejects_targets_on_plain_opcodes() {
        let mut i = instr(Code::Add, Operand::None);
        i.update_targets(&[]).unwrap();
        assert!(matches!(
            i.update_targets(&[InstrId::new(0)]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn local_index_resolves_shorthand_and_operand_forms() {
        assert_eq!(instr(Code::Ldloc2, Operand::None).local_index(), Some(2));
        assert_eq!(instr(Code::Stloc0, Operand::None).local_index(), Some(0));
        assert_eq!(
            instr(Code::StlocS, Operand::Local(17)).local_index(),
            Some(17)
        );
        assert_eq!(instr(Code::LdlocaS, Operand::Local(4)).local_index(), None);
        assert_eq!(instr(Code::Nop, Operand::None).local_index(), None);
    }

    #[test]
    fn simple_load_classification() {
        assert!(instr(Code::Ldnull, Operand::None).is_simple_load());
        assert!(instr(Code::LdargaS, Operand::Argument(0)).is_simple_load());
        assert!(instr(Code::Ldstr, Operand::String("x".into())).is_simple_load());
        // Pops a receiver, so not a simple load.
        assert!(!instr(Code::Ldfld, Operand::Token(Token::new(0x0400_0001))).is_simple_load());
        assert!(!instr(Code::Dup, Operand::None).is_simple_load());
    }

    #[test]
    fn simple_loads_push_one_and_pop_nothing() {
        use strum::IntoEnumIterator;

        use crate::assembly::{PopBehavior, PushBehavior};

        for code in Code::iter() {
            if instr(code, Operand::None).is_simple_load() {
                assert_eq!(code.push_behavior(), PushBehavior::One, "{}", code.mnemonic());
                assert_eq!(code.pop_behavior(), PopBehavior::None, "{}", code.mnemonic());
            }
        }
    }

    #[test]
    fn fall_through_classification() {
        assert!(instr(Code::Nop, Operand::None).is_fall_through());
        assert!(instr(Code::BrfalseS, Operand::Target(InstrId::new(1))).is_fall_through());
        assert!(instr(Code::Switch, Operand::Switch(vec![InstrId::new(1)])).is_fall_through());
        assert!(!instr(Code::Br, Operand::Target(InstrId::new(1))).is_fall_through());
        assert!(!instr(Code::Ret, Operand::None).is_fall_through());
        assert!(!instr(Code::Throw, Operand::None).is_fall_through());

        let sig = Arc::new(MethodRef::new("void Ns.T::M()", false, false, 0));
        assert!(instr(Code::Call, Operand::Method(sig.clone())).is_fall_through());
        assert!(!instr(Code::Jmp, Operand::Method(sig)).is_fall_through());
    }
}
