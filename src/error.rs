use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant describes a precondition or consistency failure, not a user-data error: each
/// one indicates that an upstream graph-construction or table-maintenance step produced input
/// this engine was promised it would never see. They are all fatal for the scope being
/// processed: the engine aborts scheduling that one method or region rather than attempting
/// partial recovery. Whether to skip the offending method and continue with the rest of the
/// input is the caller's policy decision.
///
/// # Error Categories
///
/// ## Instruction-level failures
/// - [`Error::InvalidOperand`] - an operand accessor was called on the wrong opcode or shape
/// - [`Error::UnsupportedOperation`] - a branch flip was requested on a non-reversible branch
/// - [`Error::InvalidArgument`] - a target rewrite did not match the opcode's operand arity
/// - [`Error::InvalidOpcode`] - an opcode's stack classification is missing from the table
///
/// ## Scheduler failures
/// - [`Error::InconsistentBlockSet`] - the reachability pass failed to visit every scope block
/// - [`Error::ReorderInvariantViolation`] - the reordering pass broke a structural invariant
///
/// # Examples
///
/// ```rust
/// use cilflow::{Error, assembly::{Code, Instruction, InstrId, Operand}};
///
/// let add = Instruction::new(InstrId::new(0), Code::Add, Operand::None);
/// match add.ldc_i4_value() {
///     Err(Error::InvalidOperand(msg)) => eprintln!("not a literal: {msg}"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An operand accessor was used on an instruction that does not carry that operand.
    ///
    /// Raised when decoding an integer literal from a non-`ldc.i4` opcode, or when the
    /// stack simulator finds a call-class instruction without a callee signature operand.
    /// The message names the offending instruction.
    #[error("Invalid operand access - {0}")]
    InvalidOperand(String),

    /// The requested mutation is not defined for this instruction.
    ///
    /// Raised when flipping a conditional branch whose comparison cannot be soundly
    /// negated (the `beq`/`bne.un` families, whose operands may be object references or
    /// floating-point values).
    #[error("Unsupported operation - {0}")]
    UnsupportedOperation(String),

    /// A target-list rewrite did not match the opcode's operand shape.
    ///
    /// Single-target branches take exactly one replacement target, `switch` takes a
    /// non-empty ordered list, and every other opcode takes an empty list.
    #[error("Invalid argument - {0}")]
    InvalidArgument(String),

    /// An opcode's push/pop classification is outside the simulation table.
    ///
    /// A `Variable` stack classification is only meaningful for call-class opcodes and
    /// `ret`; hitting it anywhere else means the opcode table has a gap. Surfacing the
    /// gap immediately keeps depth accounting from being corrupted silently.
    #[error("No stack classification for opcode '{0}'")]
    InvalidOpcode(&'static str),

    /// The reachability pass did not visit every block in the scope.
    ///
    /// Scheduling requires depth information for all blocks. Unvisited blocks mean dead
    /// blocks were left behind by an earlier transformation, or the edge set handed to
    /// the scheduler is malformed.
    ///
    /// # Fields
    ///
    /// * `visited` - number of blocks the reachability pass reached
    /// * `total` - number of blocks in the scope
    #[error("Didn't visit all blocks: {visited} vs {total}")]
    InconsistentBlockSet {
        /// Number of blocks reached from the root set.
        visited: usize,
        /// Number of blocks the scope contains.
        total: usize,
    },

    /// The reordering pass produced a structurally invalid permutation.
    ///
    /// The output must contain every input block exactly once with the entry block
    /// first; anything else would make the emitted method body unverifiable.
    #[error("Reorder invariant violated - {0}")]
    ReorderInvariantViolation(String),
}
