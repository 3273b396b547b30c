//! Block graph contract and the forward-scan scheduler.
//!
//! This module holds the read-only block-graph shape the scheduler consumes
//! (arena-allocated [`BaseBlock`] nodes and the [`Scope`] under scheduling) and the
//! scheduler itself. Graph construction lives upstream; one [`schedule`] invocation
//! reads the graph and produces a new permutation of the scope's reference order,
//! never mutating block contents or edges.
//!
//! # Key Types
//! - [`BlockArena`] / [`BlockId`] - arena storage with stable integer identities
//! - [`BaseBlock`], [`Block`], [`RegionBlock`] - the two block kinds
//! - [`Scope`] / [`ScopeKind`] - the set of blocks under one invocation
//!
//! # Main Functions
//! - [`schedule`] - the forward-scan ordering algorithm

mod block;
mod scheduler;
mod scope;

pub use block::{BaseBlock, Block, BlockArena, BlockId, RegionBlock, RegionKind};
pub use scheduler::schedule;
pub use scope::{Scope, ScopeKind};
