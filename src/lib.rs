// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cilflow
//!
//! [![Crates.io](https://img.shields.io/crates/v/cilflow.svg)](https://crates.io/crates/cilflow)
//! [![Documentation](https://docs.rs/cilflow/badge.svg)](https://docs.rs/cilflow)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/cilflow/blob/main/LICENSE-APACHE)
//!
//! Block scheduling and stack-depth simulation for rewriting CIL (Common Intermediate
//! Language) method bodies. After control-flow-altering transformations (deobfuscation
//! passes in particular) have restructured a method's basic-block graph, `cilflow`
//! produces a linear block ordering that satisfies the bytecode verifier's
//! forward-dataflow rule and lets a downstream emitter infer the correct maximum stack
//! depth.
//!
//! ## Features
//!
//! - **🧭 Forward-scan scheduling** - Repair arbitrary block orders so every block
//!   entered with a non-empty stack has a witness predecessor placed before it
//! - **🧮 Stack-effect simulation** - Pure integer depth arithmetic over the full CIL
//!   opcode set, including callee-signature-driven call effects
//! - **🔧 Instruction facade** - Classification predicates, literal decoding, branch
//!   flipping, and target rewriting on individual instructions
//! - **📋 Body snapshot/restore** - Deep copies of instruction lists and exception
//!   handlers with full identity remapping
//! - **🛡️ No approximation** - Structural invariants are checked and violations
//!   surface as typed errors instead of silently miscompiled bytecode
//!
//! ## Quick Start
//!
//! Add `cilflow` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cilflow = "0.2"
//! ```
//!
//! ### Scheduling a scope
//!
//! ```rust
//! use cilflow::prelude::*;
//!
//! // Three blocks: the entry falls through to B, B falls through to C, and C is
//! // entered with one value on the stack. Ids are allocation order: A=0, B=1, C=2.
//! let mut arena = BlockArena::new();
//! let a = arena.alloc(BaseBlock::Block(Block::new(
//!     vec![Instruction::new(InstrId::new(0), Code::Nop, Operand::None)],
//!     None,
//!     vec![BlockId::new(1)],
//! )));
//! let b = arena.alloc(BaseBlock::Block(Block::new(
//!     vec![Instruction::new(InstrId::new(1), Code::LdcI40, Operand::None)],
//!     Some(vec![BlockId::new(0)]),
//!     vec![BlockId::new(2)],
//! )));
//! let c = arena.alloc(BaseBlock::Block(Block::new(
//!     vec![
//!         Instruction::new(InstrId::new(2), Code::Pop, Operand::None),
//!         Instruction::new(InstrId::new(3), Code::Ret, Operand::None),
//!     ],
//!     Some(vec![BlockId::new(1)]),
//!     Vec::new(),
//! )));
//!
//! // A transformation left the blocks in the order [A, C, B]; C needs its witness
//! // source B placed first, so the scheduler reinserts B before it.
//! let scope = Scope::new(&arena, vec![a, c, b], ScopeKind::Method)?;
//! assert_eq!(schedule(&scope)?, vec![a, b, c]);
//! # Ok::<(), cilflow::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `cilflow` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and functions
//! - [`assembly`] - Opcodes, instructions, and stack-effect simulation
//! - [`blocks`] - The block-graph contract and the forward-scan scheduler
//! - [`method`] - Method bodies, exception handlers, snapshot/restore
//! - [`counters`] - Explicit per-invocation call tallies
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Scheduling Engine
//!
//! [`blocks::schedule`] runs two passes over a [`blocks::Scope`]: a reachability pass
//! that walks forward from every root computing the stack depth each block starts and
//! ends with, then a reordering pass that walks the reference order and pulls a
//! witness predecessor in front of any block entered with a non-empty stack. The
//! output is a permutation of the input with the entry block still first; anything
//! else is a typed error, never a silently wrong order.
//!
//! ### Division of Labor
//!
//! Graph construction (block splitting, jump-target resolution, region nesting) and
//! body emission live upstream and downstream of this crate. One invocation owns its
//! transient state completely, so hosts are free to process many method bodies in
//! parallel, one scope per worker.

/// Opcodes, instructions and stack simulation (ECMA-335, Partition III).
///
/// # Key Types
///
/// - [`assembly::Code`] - opcode identity with its static classification table
/// - [`assembly::Instruction`] - one operation with identity, operand and facade
/// - [`assembly::MethodRef`] - the callee signature shape call-class opcodes carry
///
/// # Main Functions
///
/// - [`assembly::update_stack`] - stack effect of one instruction
/// - [`assembly::simulate_block`] - depth fold over a block
pub mod assembly;

/// The block-graph contract and the forward-scan scheduler.
///
/// # Key Types
///
/// - [`blocks::BlockArena`] / [`blocks::BlockId`] - arena storage, stable identities
/// - [`blocks::BaseBlock`] - instruction-bearing block or region container
/// - [`blocks::Scope`] - the set of blocks under one scheduling invocation
///
/// # Main Functions
///
/// - [`blocks::schedule`] - produce a verifier-compatible block order
pub mod blocks;

/// Explicit per-invocation call tallies ([`counters::CallCounter`],
/// [`counters::MethodCalls`]).
pub mod counters;

/// Method bodies, exception handlers, and snapshot/restore.
///
/// # Key Types
///
/// - [`method::MethodBody`] - live instruction list and handler table
/// - [`method::BodySnapshot`] - independent, identity-remapped copy
/// - [`method::ExceptionHandler`] - try/filter/handler clause boundaries
pub mod method;

mod error;

/// Convenient re-exports of the most commonly used types and functions.
///
/// # Example
///
/// ```rust
/// use cilflow::prelude::*;
///
/// let arena = BlockArena::new();
/// let scope = Scope::new(&arena, Vec::new(), ScopeKind::Method)?;
/// assert!(schedule(&scope)?.is_empty());
/// # Ok::<(), cilflow::Error>(())
/// ```
pub mod prelude;

pub use error::Error;

/// The result type used by all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
