//! The set of blocks under scheduling in one invocation.
//!
//! A [`Scope`] is either a whole method body or the body of one nested region. It
//! pairs a reference order (an initial, validated list containing every block of the
//! scope exactly once, entry block first) with O(1) membership checks over the
//! backing [`BlockArena`]. Blocks outside the scope remain visible through the arena
//! (edges may cross scope boundaries), but only members are scheduled.

use crate::{
    blocks::{BaseBlock, BlockArena, BlockId},
    Error, Result,
};

/// What kind of scope a block list represents.
///
/// Filter and handler bodies are entered with the active exception object already on
/// the evaluation stack; that is the only place the distinction matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// A whole method body.
    Method,
    /// The protected region of a try clause.
    Try,
    /// A filter expression body.
    Filter,
    /// A catch/finally/fault handler body.
    Handler,
}

impl ScopeKind {
    /// Returns the stack depth the scope's designated entry block starts at.
    #[must_use]
    pub fn entry_stack(self) -> i32 {
        match self {
            ScopeKind::Filter | ScopeKind::Handler => 1,
            ScopeKind::Method | ScopeKind::Try => 0,
        }
    }
}

/// A scheduling scope: reference order, kind, and membership.
#[derive(Debug)]
pub struct Scope<'a> {
    arena: &'a BlockArena,
    order: Vec<BlockId>,
    kind: ScopeKind,
    members: Vec<bool>,
}

impl<'a> Scope<'a> {
    /// Creates a scope over `order`, entry block first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the order references a block outside the
    /// arena or contains a block more than once.
    pub fn new(arena: &'a BlockArena, order: Vec<BlockId>, kind: ScopeKind) -> Result<Self> {
        let mut members = vec![false; arena.len()];
        for &id in &order {
            if !arena.contains(id) {
                return Err(Error::InvalidArgument(format!(
                    "scope references unallocated block {id}"
                )));
            }
            if members[id.index()] {
                return Err(Error::InvalidArgument(format!(
                    "scope contains block {id} more than once"
                )));
            }
            members[id.index()] = true;
        }
        Ok(Scope {
            arena,
            order,
            kind,
            members,
        })
    }

    /// Returns the backing arena.
    #[must_use]
    pub fn arena(&self) -> &'a BlockArena {
        self.arena
    }

    /// Returns the reference order, entry block first.
    #[must_use]
    pub fn order(&self) -> &[BlockId] {
        &self.order
    }

    /// Returns the scope kind.
    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Returns the designated entry block, or `None` for an empty scope.
    #[must_use]
    pub fn entry(&self) -> Option<BlockId> {
        self.order.first().copied()
    }

    /// Returns the number of blocks in the scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` for a scope with no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `id` belongs to this scope.
    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        self.members.get(id.index()).copied().unwrap_or(false)
    }

    /// Returns the block with the given id from the backing arena.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &'a BaseBlock {
        self.arena.block(id)
    }
}
