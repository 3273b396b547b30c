//! CIL opcode identities and the static classification table (ECMA-335).
//!
//! This module defines [`Code`], one variant per CIL instruction (single-byte and
//! `0xFE`-prefixed), together with the per-opcode metadata the rest of the crate is built
//! on: mnemonic, control-flow class, operand shape, and stack push/pop classification.
//! The table is the single source of truth: the stack simulator, the instruction facade,
//! and the scheduler all read it rather than carrying their own opcode knowledge.
//!
//! # Key Types
//! - [`Code`] - opcode identity with table lookups as methods
//! - [`FlowType`] - how an instruction affects control flow
//! - [`OperandKind`] - the operand shape an opcode encodes
//! - [`PushBehavior`] / [`PopBehavior`] - categorical stack effects
//!
//! Branch opcodes exist in short and long encodings (`br.s`/`br`); both decode to the
//! same operand shape here, since encoding width is an emitter concern and irrelevant to
//! scheduling.

use strum::{EnumCount, EnumIter};

/// How an instruction affects control flow.
///
/// This classification drives basic-block construction upstream and the stack simulator
/// here: [`FlowType::Call`] opcodes are simulated through their callee signature instead
/// of the categorical table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Normal execution continues to the next instruction.
    Sequential,
    /// Always branches to another location.
    UnconditionalBranch,
    /// Two-way branch: taken target or fall-through.
    ConditionalBranch,
    /// Multi-way branch with fall-through (`switch`).
    Switch,
    /// Transfers to another method (`call`, `callvirt`, `calli`, `newobj`, `jmp`).
    Call,
    /// Returns from the current method.
    Return,
    /// Raises an exception (`throw`, `rethrow`).
    Throw,
    /// Exits a protected region (`leave`, `leave.s`).
    Leave,
    /// Ends a finally or fault handler.
    EndFinally,
}

/// The operand shape an opcode encodes after decoding.
///
/// Branch targets and switch tables hold instruction references by identity; the numeric
/// kinds describe the literal the instruction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// No operand.
    None,
    /// Signed 8-bit literal (`ldc.i4.s`).
    Int8,
    /// Unsigned 8-bit literal (`unaligned.`, `no.`).
    UInt8,
    /// Signed 32-bit literal (`ldc.i4`).
    Int32,
    /// Signed 64-bit literal (`ldc.i8`).
    Int64,
    /// 32-bit floating literal (`ldc.r4`).
    Float32,
    /// 64-bit floating literal (`ldc.r8`).
    Float64,
    /// Local variable slot.
    Local,
    /// Method argument slot.
    Argument,
    /// Single instruction reference (branch target).
    Target,
    /// Ordered list of instruction references (`switch`).
    Switch,
    /// Callee signature reference (call-class opcodes, `ldftn`/`ldvirtftn`).
    Method,
    /// Field reference token.
    Field,
    /// Type reference token.
    Type,
    /// User-string reference (`ldstr`).
    String,
    /// Any other metadata token (`ldtoken`).
    Token,
}

/// Categorical push classification of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushBehavior {
    /// Pushes nothing.
    None,
    /// Pushes exactly one value.
    One,
    /// Pushes two values (`dup`).
    Two,
    /// Push count depends on the callee signature; legal only for call-class opcodes.
    Variable,
}

/// Categorical pop classification of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopBehavior {
    /// Pops nothing.
    None,
    /// Pops one value.
    One,
    /// Pops two values.
    Two,
    /// Pops three values.
    Three,
    /// Clears the whole evaluation stack (`leave`, `endfinally`).
    All,
    /// Pop count depends on the callee signature (call-class) or the enclosing method
    /// signature (`ret`).
    Variable,
}

macro_rules! opcodes {
    ($($variant:ident => ($mnemonic:literal, $flow:ident, $operand:ident, $push:ident, $pop:ident),)*) => {
        /// A CIL opcode (ECMA-335, Partition III).
        ///
        /// One variant per instruction; classification metadata is available through the
        /// table-lookup methods ([`Code::flow`], [`Code::operand_kind`],
        /// [`Code::push_behavior`], [`Code::pop_behavior`]).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter)]
        pub enum Code {
            $(
                #[doc = concat!("The `", $mnemonic, "` instruction.")]
                $variant,
            )*
        }

        impl Code {
            /// Returns the instruction mnemonic.
            #[must_use]
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Code::$variant => $mnemonic,)*
                }
            }

            /// Returns how this opcode affects control flow.
            #[must_use]
            pub const fn flow(self) -> FlowType {
                match self {
                    $(Code::$variant => FlowType::$flow,)*
                }
            }

            /// Returns the operand shape this opcode carries.
            #[must_use]
            pub const fn operand_kind(self) -> OperandKind {
                match self {
                    $(Code::$variant => OperandKind::$operand,)*
                }
            }

            /// Returns the categorical push classification.
            #[must_use]
            pub const fn push_behavior(self) -> PushBehavior {
                match self {
                    $(Code::$variant => PushBehavior::$push,)*
                }
            }

            /// Returns the categorical pop classification.
            #[must_use]
            pub const fn pop_behavior(self) -> PopBehavior {
                match self {
                    $(Code::$variant => PopBehavior::$pop,)*
                }
            }
        }
    };
}

opcodes! {
    // ── Misc ───────────────────────────────────────────────────────────────
    Nop => ("nop", Sequential, None, None, None),
    Break => ("break", Sequential, None, None, None),

    // ── Argument/local shorthand ───────────────────────────────────────────
    Ldarg0 => ("ldarg.0", Sequential, None, One, None),
    Ldarg1 => ("ldarg.1", Sequential, None, One, None),
    Ldarg2 => ("ldarg.2", Sequential, None, One, None),
    Ldarg3 => ("ldarg.3", Sequential, None, One, None),
    Ldloc0 => ("ldloc.0", Sequential, None, One, None),
    Ldloc1 => ("ldloc.1", Sequential, None, One, None),
    Ldloc2 => ("ldloc.2", Sequential, None, One, None),
    Ldloc3 => ("ldloc.3", Sequential, None, One, None),
    Stloc0 => ("stloc.0", Sequential, None, None, One),
    Stloc1 => ("stloc.1", Sequential, None, None, One),
    Stloc2 => ("stloc.2", Sequential, None, None, One),
    Stloc3 => ("stloc.3", Sequential, None, None, One),
    LdargS => ("ldarg.s", Sequential, Argument, One, None),
    LdargaS => ("ldarga.s", Sequential, Argument, One, None),
    StargS => ("starg.s", Sequential, Argument, None, One),
    LdlocS => ("ldloc.s", Sequential, Local, One, None),
    LdlocaS => ("ldloca.s", Sequential, Local, One, None),
    StlocS => ("stloc.s", Sequential, Local, None, One),

    // ── Constant loaders ───────────────────────────────────────────────────
    Ldnull => ("ldnull", Sequential, None, One, None),
    LdcI4M1 => ("ldc.i4.m1", Sequential, None, One, None),
    LdcI40 => ("ldc.i4.0", Sequential, None, One, None),
    LdcI41 => ("ldc.i4.1", Sequential, None, One, None),
    LdcI42 => ("ldc.i4.2", Sequential, None, One, None),
    LdcI43 => ("ldc.i4.3", Sequential, None, One, None),
    LdcI44 => ("ldc.i4.4", Sequential, None, One, None),
    LdcI45 => ("ldc.i4.5", Sequential, None, One, None),
    LdcI46 => ("ldc.i4.6", Sequential, None, One, None),
    LdcI47 => ("ldc.i4.7", Sequential, None, One, None),
    LdcI48 => ("ldc.i4.8", Sequential, None, One, None),
    LdcI4S => ("ldc.i4.s", Sequential, Int8, One, None),
    LdcI4 => ("ldc.i4", Sequential, Int32, One, None),
    LdcI8 => ("ldc.i8", Sequential, Int64, One, None),
    LdcR4 => ("ldc.r4", Sequential, Float32, One, None),
    LdcR8 => ("ldc.r8", Sequential, Float64, One, None),

    // ── Stack manipulation ─────────────────────────────────────────────────
    Dup => ("dup", Sequential, None, Two, One),
    Pop => ("pop", Sequential, None, None, One),

    // ── Call / return ──────────────────────────────────────────────────────
    Jmp => ("jmp", Call, Method, None, None),
    Call => ("call", Call, Method, Variable, Variable),
    Calli => ("calli", Call, Method, Variable, Variable),
    Ret => ("ret", Return, None, None, Variable),

    // ── Branches (short form) ──────────────────────────────────────────────
    BrS => ("br.s", UnconditionalBranch, Target, None, None),
    BrfalseS => ("brfalse.s", ConditionalBranch, Target, None, One),
    BrtrueS => ("brtrue.s", ConditionalBranch, Target, None, One),
    BeqS => ("beq.s", ConditionalBranch, Target, None, Two),
    BgeS => ("bge.s", ConditionalBranch, Target, None, Two),
    BgtS => ("bgt.s", ConditionalBranch, Target, None, Two),
    BleS => ("ble.s", ConditionalBranch, Target, None, Two),
    BltS => ("blt.s", ConditionalBranch, Target, None, Two),
    BneUnS => ("bne.un.s", ConditionalBranch, Target, None, Two),
    BgeUnS => ("bge.un.s", ConditionalBranch, Target, None, Two),
    BgtUnS => ("bgt.un.s", ConditionalBranch, Target, None, Two),
    BleUnS => ("ble.un.s", ConditionalBranch, Target, None, Two),
    BltUnS => ("blt.un.s", ConditionalBranch, Target, None, Two),

    // ── Branches (long form) ───────────────────────────────────────────────
    Br => ("br", UnconditionalBranch, Target, None, None),
    Brfalse => ("brfalse", ConditionalBranch, Target, None, One),
    Brtrue => ("brtrue", ConditionalBranch, Target, None, One),
    Beq => ("beq", ConditionalBranch, Target, None, Two),
    Bge => ("bge", ConditionalBranch, Target, None, Two),
    Bgt => ("bgt", ConditionalBranch, Target, None, Two),
    Ble => ("ble", ConditionalBranch, Target, None, Two),
    Blt => ("blt", ConditionalBranch, Target, None, Two),
    BneUn => ("bne.un", ConditionalBranch, Target, None, Two),
    BgeUn => ("bge.un", ConditionalBranch, Target, None, Two),
    BgtUn => ("bgt.un", ConditionalBranch, Target, None, Two),
    BleUn => ("ble.un", ConditionalBranch, Target, None, Two),
    BltUn => ("blt.un", ConditionalBranch, Target, None, Two),
    Switch => ("switch", Switch, Switch, None, One),

    // ── Indirect loads/stores ──────────────────────────────────────────────
    LdindI1 => ("ldind.i1", Sequential, None, One, One),
    LdindU1 => ("ldind.u1", Sequential, None, One, One),
    LdindI2 => ("ldind.i2", Sequential, None, One, One),
    LdindU2 => ("ldind.u2", Sequential, None, One, One),
    LdindI4 => ("ldind.i4", Sequential, None, One, One),
    LdindU4 => ("ldind.u4", Sequential, None, One, One),
    LdindI8 => ("ldind.i8", Sequential, None, One, One),
    LdindI => ("ldind.i", Sequential, None, One, One),
    LdindR4 => ("ldind.r4", Sequential, None, One, One),
    LdindR8 => ("ldind.r8", Sequential, None, One, One),
    LdindRef => ("ldind.ref", Sequential, None, One, One),
    StindRef => ("stind.ref", Sequential, None, None, Two),
    StindI1 => ("stind.i1", Sequential, None, None, Two),
    StindI2 => ("stind.i2", Sequential, None, None, Two),
    StindI4 => ("stind.i4", Sequential, None, None, Two),
    StindI8 => ("stind.i8", Sequential, None, None, Two),
    StindR4 => ("stind.r4", Sequential, None, None, Two),
    StindR8 => ("stind.r8", Sequential, None, None, Two),

    // ── Arithmetic / bitwise ───────────────────────────────────────────────
    Add => ("add", Sequential, None, One, Two),
    Sub => ("sub", Sequential, None, One, Two),
    Mul => ("mul", Sequential, None, One, Two),
    Div => ("div", Sequential, None, One, Two),
    DivUn => ("div.un", Sequential, None, One, Two),
    Rem => ("rem", Sequential, None, One, Two),
    RemUn => ("rem.un", Sequential, None, One, Two),
    And => ("and", Sequential, None, One, Two),
    Or => ("or", Sequential, None, One, Two),
    Xor => ("xor", Sequential, None, One, Two),
    Shl => ("shl", Sequential, None, One, Two),
    Shr => ("shr", Sequential, None, One, Two),
    ShrUn => ("shr.un", Sequential, None, One, Two),
    Neg => ("neg", Sequential, None, One, One),
    Not => ("not", Sequential, None, One, One),

    // ── Conversions ────────────────────────────────────────────────────────
    ConvI1 => ("conv.i1", Sequential, None, One, One),
    ConvI2 => ("conv.i2", Sequential, None, One, One),
    ConvI4 => ("conv.i4", Sequential, None, One, One),
    ConvI8 => ("conv.i8", Sequential, None, One, One),
    ConvR4 => ("conv.r4", Sequential, None, One, One),
    ConvR8 => ("conv.r8", Sequential, None, One, One),
    ConvU4 => ("conv.u4", Sequential, None, One, One),
    ConvU8 => ("conv.u8", Sequential, None, One, One),

    // ── Object model ───────────────────────────────────────────────────────
    Callvirt => ("callvirt", Call, Method, Variable, Variable),
    Cpobj => ("cpobj", Sequential, Type, None, Two),
    Ldobj => ("ldobj", Sequential, Type, One, One),
    Ldstr => ("ldstr", Sequential, String, One, None),
    Newobj => ("newobj", Call, Method, Variable, Variable),
    Castclass => ("castclass", Sequential, Type, One, One),
    Isinst => ("isinst", Sequential, Type, One, One),
    ConvRUn => ("conv.r.un", Sequential, None, One, One),
    Unbox => ("unbox", Sequential, Type, One, One),
    Throw => ("throw", Throw, None, None, One),
    Ldfld => ("ldfld", Sequential, Field, One, One),
    Ldflda => ("ldflda", Sequential, Field, One, One),
    Stfld => ("stfld", Sequential, Field, None, Two),
    Ldsfld => ("ldsfld", Sequential, Field, One, None),
    Ldsflda => ("ldsflda", Sequential, Field, One, None),
    Stsfld => ("stsfld", Sequential, Field, None, One),
    Stobj => ("stobj", Sequential, Type, None, Two),
    ConvOvfI1Un => ("conv.ovf.i1.un", Sequential, None, One, One),
    ConvOvfI2Un => ("conv.ovf.i2.un", Sequential, None, One, One),
    ConvOvfI4Un => ("conv.ovf.i4.un", Sequential, None, One, One),
    ConvOvfI8Un => ("conv.ovf.i8.un", Sequential, None, One, One),
    ConvOvfU1Un => ("conv.ovf.u1.un", Sequential, None, One, One),
    ConvOvfU2Un => ("conv.ovf.u2.un", Sequential, None, One, One),
    ConvOvfU4Un => ("conv.ovf.u4.un", Sequential, None, One, One),
    ConvOvfU8Un => ("conv.ovf.u8.un", Sequential, None, One, One),
    ConvOvfIUn => ("conv.ovf.i.un", Sequential, None, One, One),
    ConvOvfUUn => ("conv.ovf.u.un", Sequential, None, One, One),
    Box => ("box", Sequential, Type, One, One),
    Newarr => ("newarr", Sequential, Type, One, One),
    Ldlen => ("ldlen", Sequential, None, One, One),
    Ldelema => ("ldelema", Sequential, Type, One, Two),
    LdelemI1 => ("ldelem.i1", Sequential, None, One, Two),
    LdelemU1 => ("ldelem.u1", Sequential, None, One, Two),
    LdelemI2 => ("ldelem.i2", Sequential, None, One, Two),
    LdelemU2 => ("ldelem.u2", Sequential, None, One, Two),
    LdelemI4 => ("ldelem.i4", Sequential, None, One, Two),
    LdelemU4 => ("ldelem.u4", Sequential, None, One, Two),
    LdelemI8 => ("ldelem.i8", Sequential, None, One, Two),
    LdelemI => ("ldelem.i", Sequential, None, One, Two),
    LdelemR4 => ("ldelem.r4", Sequential, None, One, Two),
    LdelemR8 => ("ldelem.r8", Sequential, None, One, Two),
    LdelemRef => ("ldelem.ref", Sequential, None, One, Two),
    StelemI => ("stelem.i", Sequential, None, None, Three),
    StelemI1 => ("stelem.i1", Sequential, None, None, Three),
    StelemI2 => ("stelem.i2", Sequential, None, None, Three),
    StelemI4 => ("stelem.i4", Sequential, None, None, Three),
    StelemI8 => ("stelem.i8", Sequential, None, None, Three),
    StelemR4 => ("stelem.r4", Sequential, None, None, Three),
    StelemR8 => ("stelem.r8", Sequential, None, None, Three),
    StelemRef => ("stelem.ref", Sequential, None, None, Three),
    Ldelem => ("ldelem", Sequential, Type, One, Two),
    Stelem => ("stelem", Sequential, Type, None, Three),
    UnboxAny => ("unbox.any", Sequential, Type, One, One),
    ConvOvfI1 => ("conv.ovf.i1", Sequential, None, One, One),
    ConvOvfU1 => ("conv.ovf.u1", Sequential, None, One, One),
    ConvOvfI2 => ("conv.ovf.i2", Sequential, None, One, One),
    ConvOvfU2 => ("conv.ovf.u2", Sequential, None, One, One),
    ConvOvfI4 => ("conv.ovf.i4", Sequential, None, One, One),
    ConvOvfU4 => ("conv.ovf.u4", Sequential, None, One, One),
    ConvOvfI8 => ("conv.ovf.i8", Sequential, None, One, One),
    ConvOvfU8 => ("conv.ovf.u8", Sequential, None, One, One),
    Refanyval => ("refanyval", Sequential, Type, One, One),
    Ckfinite => ("ckfinite", Sequential, None, One, One),
    Mkrefany => ("mkrefany", Sequential, Type, One, One),
    Ldtoken => ("ldtoken", Sequential, Token, One, None),
    ConvU2 => ("conv.u2", Sequential, None, One, One),
    ConvU1 => ("conv.u1", Sequential, None, One, One),
    ConvI => ("conv.i", Sequential, None, One, One),
    ConvOvfI => ("conv.ovf.i", Sequential, None, One, One),
    ConvOvfU => ("conv.ovf.u", Sequential, None, One, One),
    AddOvf => ("add.ovf", Sequential, None, One, Two),
    AddOvfUn => ("add.ovf.un", Sequential, None, One, Two),
    MulOvf => ("mul.ovf", Sequential, None, One, Two),
    MulOvfUn => ("mul.ovf.un", Sequential, None, One, Two),
    SubOvf => ("sub.ovf", Sequential, None, One, Two),
    SubOvfUn => ("sub.ovf.un", Sequential, None, One, Two),
    Endfinally => ("endfinally", EndFinally, None, None, All),
    Leave => ("leave", Leave, Target, None, All),
    LeaveS => ("leave.s", Leave, Target, None, All),
    StindI => ("stind.i", Sequential, None, None, Two),
    ConvU => ("conv.u", Sequential, None, One, One),

    // ── Two-byte opcodes (0xFE prefix) ─────────────────────────────────────
    Arglist => ("arglist", Sequential, None, One, None),
    Ceq => ("ceq", Sequential, None, One, Two),
    Cgt => ("cgt", Sequential, None, One, Two),
    CgtUn => ("cgt.un", Sequential, None, One, Two),
    Clt => ("clt", Sequential, None, One, Two),
    CltUn => ("clt.un", Sequential, None, One, Two),
    Ldftn => ("ldftn", Sequential, Method, One, None),
    Ldvirtftn => ("ldvirtftn", Sequential, Method, One, One),
    Ldarg => ("ldarg", Sequential, Argument, One, None),
    Ldarga => ("ldarga", Sequential, Argument, One, None),
    Starg => ("starg", Sequential, Argument, None, One),
    Ldloc => ("ldloc", Sequential, Local, One, None),
    Ldloca => ("ldloca", Sequential, Local, One, None),
    Stloc => ("stloc", Sequential, Local, None, One),
    Localloc => ("localloc", Sequential, None, One, One),
    Endfilter => ("endfilter", Return, None, None, One),
    Unaligned => ("unaligned.", Sequential, UInt8, None, None),
    Volatile => ("volatile.", Sequential, None, None, None),
    Tail => ("tail.", Sequential, None, None, None),
    Initobj => ("initobj", Sequential, Type, None, One),
    Constrained => ("constrained.", Sequential, Type, None, None),
    Cpblk => ("cpblk", Sequential, None, None, Three),
    Initblk => ("initblk", Sequential, None, None, Three),
    No => ("no.", Sequential, UInt8, None, None),
    Rethrow => ("rethrow", Throw, None, None, None),
    Sizeof => ("sizeof", Sequential, Type, One, None),
    Refanytype => ("refanytype", Sequential, None, One, One),
    Readonly => ("readonly.", Sequential, None, None, None),
}

impl Code {
    /// Returns `true` for the twelve integer-literal-push forms
    /// (`ldc.i4.m1` … `ldc.i4.8`, `ldc.i4.s`, `ldc.i4`).
    #[must_use]
    pub const fn is_ldc_i4(self) -> bool {
        matches!(
            self,
            Code::LdcI4M1
                | Code::LdcI40
                | Code::LdcI41
                | Code::LdcI42
                | Code::LdcI43
                | Code::LdcI44
                | Code::LdcI45
                | Code::LdcI46
                | Code::LdcI47
                | Code::LdcI48
                | Code::LdcI4S
                | Code::LdcI4
        )
    }

    /// Returns the literal value encoded in the opcode itself for the nine dedicated
    /// `ldc.i4` short forms (−1..8), or `None` for every other opcode.
    #[must_use]
    pub const fn ldc_i4_shorthand(self) -> Option<i32> {
        match self {
            Code::LdcI4M1 => Some(-1),
            Code::LdcI40 => Some(0),
            Code::LdcI41 => Some(1),
            Code::LdcI42 => Some(2),
            Code::LdcI43 => Some(3),
            Code::LdcI44 => Some(4),
            Code::LdcI45 => Some(5),
            Code::LdcI46 => Some(6),
            Code::LdcI47 => Some(7),
            Code::LdcI48 => Some(8),
            _ => None,
        }
    }

    /// Returns `true` for the two-way conditional branches (relational, equality and
    /// truthy/falsy tests, short and long forms). `switch` is not included.
    #[must_use]
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self.flow(), FlowType::ConditionalBranch)
    }

    /// Returns the logically-negated opcode for reversible two-way branches.
    ///
    /// Relational branches flip to their complement with the same signedness and
    /// encoding width (`bge` ↔ `blt`, `bgt.un.s` ↔ `ble.un.s`); truthy/falsy tests swap
    /// (`brtrue` ↔ `brfalse`). Equality and inequality-unsigned branches return `None`:
    /// their operands may be object references or floating values, for which negating
    /// the comparison is unsound.
    #[must_use]
    pub const fn flipped_branch(self) -> Option<Code> {
        match self {
            Code::Bge => Some(Code::Blt),
            Code::BgeS => Some(Code::BltS),
            Code::BgeUn => Some(Code::BltUn),
            Code::BgeUnS => Some(Code::BltUnS),

            Code::Blt => Some(Code::Bge),
            Code::BltS => Some(Code::BgeS),
            Code::BltUn => Some(Code::BgeUn),
            Code::BltUnS => Some(Code::BgeUnS),

            Code::Bgt => Some(Code::Ble),
            Code::BgtS => Some(Code::BleS),
            Code::BgtUn => Some(Code::BleUn),
            Code::BgtUnS => Some(Code::BleUnS),

            Code::Ble => Some(Code::Bgt),
            Code::BleS => Some(Code::BgtS),
            Code::BleUn => Some(Code::BgtUn),
            Code::BleUnS => Some(Code::BgtUnS),

            Code::Brfalse => Some(Code::Brtrue),
            Code::BrfalseS => Some(Code::BrtrueS),
            Code::Brtrue => Some(Code::Brfalse),
            Code::BrtrueS => Some(Code::BrfalseS),

            _ => None,
        }
    }
}
