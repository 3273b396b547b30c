//! Exception handler representation for CIL method bodies.
//!
//! Handlers delimit try/filter/handler regions by referencing their boundary
//! instructions by identity. When a body is deep-copied, all five boundaries must be
//! remapped consistently with the instruction list they originate from; see
//! [`crate::method::MethodBody::snapshot`].

use bitflags::bitflags;

use crate::assembly::{InstrId, Token};

bitflags! {
    /// Exception handler flags defining the type of exception handling clause.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExceptionHandlerFlags: u16 {
        /// A typed exception clause; `catch_type` names the caught exception type.
        const EXCEPTION = 0x0000;

        /// An exception filter and handler clause.
        ///
        /// Filter code runs before the handler to decide whether the exception is
        /// handled; it begins at the `filter_start` boundary.
        const FILTER = 0x0001;

        /// A finally clause, executed on both normal and exceptional exit.
        const FINALLY = 0x0002;

        /// A fault clause, executed only when an exception is thrown.
        const FAULT = 0x0004;
    }
}

/// One try/filter/handler clause of a method body.
///
/// All boundary references are by instruction identity, not position, so the clause
/// survives reordering of the instruction list. `try_end` and `handler_end` follow the
/// usual half-open convention: they reference the first instruction after the region.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionHandler {
    /// The kind of clause (catch, filter, finally, fault).
    pub flags: ExceptionHandlerFlags,
    /// Caught exception type for `EXCEPTION` clauses.
    pub catch_type: Option<Token>,
    /// First instruction of the protected region.
    pub try_start: Option<InstrId>,
    /// First instruction after the protected region.
    pub try_end: Option<InstrId>,
    /// First instruction of the filter expression, for `FILTER` clauses.
    pub filter_start: Option<InstrId>,
    /// First instruction of the handler.
    pub handler_start: Option<InstrId>,
    /// First instruction after the handler.
    pub handler_end: Option<InstrId>,
}

impl ExceptionHandler {
    /// Creates a handler of the given kind with no boundaries set.
    #[must_use]
    pub fn new(flags: ExceptionHandlerFlags) -> Self {
        ExceptionHandler {
            flags,
            catch_type: None,
            try_start: None,
            try_end: None,
            filter_start: None,
            handler_start: None,
            handler_end: None,
        }
    }

    /// Returns the five boundary references in a fixed order:
    /// try start/end, filter start, handler start/end.
    #[must_use]
    pub fn boundaries(&self) -> [Option<InstrId>; 5] {
        [
            self.try_start,
            self.try_end,
            self.filter_start,
            self.handler_start,
            self.handler_end,
        ]
    }
}
