//! Method bodies: instruction lists, exception handlers, snapshot/restore.
//!
//! # Key Types
//! - [`MethodBody`] - the live instruction list and handler table of one method
//! - [`BodySnapshot`] - an independent, identity-remapped copy
//! - [`ExceptionHandler`] / [`ExceptionHandlerFlags`] - try/filter/handler clauses

mod body;
mod exceptions;

pub use body::{find_instruction_run, BodySnapshot, MethodBody};
pub use exceptions::{ExceptionHandler, ExceptionHandlerFlags};
