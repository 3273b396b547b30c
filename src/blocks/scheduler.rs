//! Forward-scan block scheduling.
//!
//! A linear emitter or verifier processes blocks once, left to right, and assumes that
//! whenever a block begins with a non-empty evaluation stack, some earlier-processed
//! block has already established that depth along a real control-flow edge. Graph
//! transformations routinely break that assumption without breaking the control flow
//! itself, because block position and block reachability are independent properties.
//!
//! [`schedule`] repairs the ordering: given a scope's reference order it produces a
//! permutation in which every block entered with a non-empty stack has at least one of
//! its source blocks placed at a strictly earlier position. That single witness
//! predecessor is sufficient for both the verifier rule and max-stack inference, which
//! only need one already-established path.
//!
//! The algorithm runs two passes. Pass 1 walks forward from every root along target
//! edges, computing the stack depth each block starts and ends with. Pass 2 walks the
//! reference order and pulls a witness source in front of any block that needs one.
//! Both passes are deterministic: pass 1 visits targets first to last, and pass 2
//! picks the first in-scope source in each block's recorded source order.

use log::debug;

use crate::{
    assembly::simulate_block,
    blocks::{BaseBlock, BlockId, Scope},
    Error, Result,
};

/// Per-block depth bookkeeping, computed in pass 1 and read in pass 2.
///
/// Owned by one scheduling invocation and discarded with it.
#[derive(Debug, Clone, Copy)]
struct BlockInfo {
    stack_start: i32,
    stack_end: i32,
}

/// Produces an ordering of `scope` that satisfies the forward-dataflow rule.
///
/// The result is a permutation of `scope.order()` with the entry block still first,
/// every block present exactly once, and a witness source placed before every block
/// whose computed entry depth is non-zero. The scope's graph is only read; the caller
/// owns materializing the new order into a method body.
///
/// # Errors
///
/// Returns [`Error::InconsistentBlockSet`] if the reachability pass cannot visit every
/// scope block (residual dead blocks, or a malformed edge set upstream), and
/// [`Error::ReorderInvariantViolation`] if the reordering pass produces a structurally
/// invalid permutation. Failures from the stack simulator propagate unchanged. All of
/// them are fatal for this scope.
pub fn schedule(scope: &Scope<'_>) -> Result<Vec<BlockId>> {
    ForwardScan::new(scope).run()
}

/// One scheduling invocation: the scope under work plus all transient state.
struct ForwardScan<'s, 'a> {
    scope: &'s Scope<'a>,
    /// Depth info per arena block; `None` for blocks pass 1 never reached.
    infos: Vec<Option<BlockInfo>>,
    /// Pass-2 marks, set when a block enters the output (or its witness chain).
    placed: Vec<bool>,
    output: Vec<BlockId>,
}

impl<'s, 'a> ForwardScan<'s, 'a> {
    fn new(scope: &'s Scope<'a>) -> Self {
        let arena_len = scope.arena().len();
        ForwardScan {
            scope,
            infos: vec![None; arena_len],
            placed: vec![false; arena_len],
            output: Vec::with_capacity(scope.len()),
        }
    }

    fn run(mut self) -> Result<Vec<BlockId>> {
        self.compute_block_infos()?;
        self.reorder()?;
        Ok(self.output)
    }

    // ── Pass 1: reachability and depth computation ─────────────────────────

    fn compute_block_infos(&mut self) -> Result<()> {
        let entry_depth = self.scope.kind().entry_stack();
        for root in self.roots() {
            let depth = if Some(root) == self.scope.entry() {
                entry_depth
            } else {
                0
            };
            self.scan(root, depth)?;
        }

        let visited = self.infos.iter().flatten().count();
        if visited != self.scope.len() {
            return Err(Error::InconsistentBlockSet {
                visited,
                total: self.scope.len(),
            });
        }
        Ok(())
    }

    /// The root set: the designated entry, plus every other block that can be entered
    /// independently: region containers, blocks with unknown sources, and blocks with
    /// at least one source outside the scope (handler-region entries reached only from
    /// edges that do not belong to this scope).
    fn roots(&self) -> Vec<BlockId> {
        let mut roots = Vec::new();
        let Some(entry) = self.scope.entry() else {
            return roots;
        };
        roots.push(entry);
        for &id in &self.scope.order()[1..] {
            match self.scope.block(id) {
                BaseBlock::Region(_) => roots.push(id),
                BaseBlock::Block(block) => match block.sources() {
                    None => roots.push(id),
                    Some(sources) => {
                        if sources.is_empty()
                            || sources.iter().any(|&source| !self.scope.contains(source))
                        {
                            roots.push(id);
                        }
                    }
                },
            }
        }
        roots
    }

    /// Depth-first walk forward along target edges from one root.
    ///
    /// Targets are pushed in reverse so they are visited first to last, and the first
    /// arrival at a block wins: a later arrival computing a different depth neither
    /// revisits nor re-validates it. Divergent arrivals are only surfaced as a debug
    /// diagnostic; hardening them into an error would change which reconciliation the
    /// downstream emitter sees.
    fn scan(&mut self, root: BlockId, depth: i32) -> Result<()> {
        let mut work = vec![(root, depth)];
        while let Some((id, depth)) = work.pop() {
            if !self.scope.contains(id) {
                continue;
            }
            if let Some(info) = self.infos[id.index()] {
                if info.stack_start != depth {
                    debug!(
                        "{id}: arrival at depth {depth} reconciled to first-seen depth {}",
                        info.stack_start
                    );
                }
                continue;
            }

            match self.scope.block(id) {
                // Region boundaries must be stack-empty; the exact values don't
                // matter, and the interior belongs to a nested scope.
                BaseBlock::Region(_) => {
                    self.infos[id.index()] = Some(BlockInfo {
                        stack_start: 0,
                        stack_end: 0,
                    });
                }
                BaseBlock::Block(block) => {
                    let stack_end = simulate_block(block, depth)?;
                    self.infos[id.index()] = Some(BlockInfo {
                        stack_start: depth,
                        stack_end,
                    });
                    for &target in block.targets().iter().rev() {
                        work.push((target, stack_end));
                    }
                }
            }
        }
        Ok(())
    }

    // ── Pass 2: reordering ─────────────────────────────────────────────────

    fn reorder(&mut self) -> Result<()> {
        for index in 0..self.scope.order().len() {
            self.append_with_witnesses(self.scope.order()[index]);
        }

        if self.output.len() != self.scope.len() {
            return Err(Error::ReorderInvariantViolation(format!(
                "too many/few blocks after sorting: {} vs {}",
                self.output.len(),
                self.scope.len()
            )));
        }
        if !self.output.is_empty() && self.output.first().copied() != self.scope.entry() {
            return Err(Error::ReorderInvariantViolation(
                "entry block is not first after sorting".into(),
            ));
        }
        Ok(())
    }

    /// Appends `start`, first resolving the chain of witness sources it depends on.
    ///
    /// Each block on the chain is marked placed on entry, before its own witness is
    /// resolved; a source cycle therefore terminates at the first block that sees a
    /// chain member among its sources and counts it as already placed. The chain is
    /// then appended deepest witness first.
    fn append_with_witnesses(&mut self, start: BlockId) {
        let mut chain = Vec::new();
        let mut current = start;
        loop {
            if !self.scope.contains(current) || self.is_placed(current) {
                break;
            }
            self.placed[current.index()] = true;
            chain.push(current);
            match self.witness_source(current) {
                Some(source) => current = source,
                None => break,
            }
        }

        if chain.len() > 1 {
            debug!(
                "pulled {} witness block(s) in front of {start}",
                chain.len() - 1
            );
        }
        for &id in chain.iter().rev() {
            self.output.push(id);
        }
    }

    /// Decides whether `id` still needs a source placed before it, and picks one.
    ///
    /// A block is appended directly, no witness needed, when it starts with an empty
    /// stack, is the designated entry, is a region container, has unknown sources, or
    /// already has some source marked placed. Otherwise the witness is the first
    /// in-scope source in the block's recorded source order (first in-scope wins, so
    /// the result is deterministic given a deterministic upstream edge order).
    fn witness_source(&self, id: BlockId) -> Option<BlockId> {
        // Present for every scope member once pass 1 has run.
        let info = self.infos[id.index()]?;
        if info.stack_start == 0 || Some(id) == self.scope.entry() {
            return None;
        }
        let block = self.scope.block(id).as_block()?;
        let sources = block.sources()?;
        if sources.iter().any(|&source| self.is_placed(source)) {
            return None;
        }
        sources
            .iter()
            .copied()
            .find(|&source| self.scope.contains(source))
    }

    /// Placed marks only ever cover scope members; anything else reads as unplaced.
    fn is_placed(&self, id: BlockId) -> bool {
        self.placed.get(id.index()).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assembly::{Code, InstrId, Instruction, Operand},
        blocks::{Block, BlockArena, RegionBlock, RegionKind, ScopeKind},
    };

    fn push_block(arena: &mut BlockArena, codes: &[Code]) -> BlockId {
        let instructions = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                Instruction::new(InstrId::new(index as u32), code, Operand::None)
            })
            .collect();
        arena.alloc(BaseBlock::Block(Block::new(instructions, None, Vec::new())))
    }

    #[test]
    fn empty_scope_schedules_to_nothing() {
        let arena = BlockArena::new();
        let scope = Scope::new(&arena, Vec::new(), ScopeKind::Method).unwrap();
        assert!(schedule(&scope).unwrap().is_empty());
    }

    #[test]
    fn single_block_method() {
        let mut arena = BlockArena::new();
        let entry = push_block(&mut arena, &[Code::Ret]);
        let scope = Scope::new(&arena, vec![entry], ScopeKind::Method).unwrap();
        assert_eq!(schedule(&scope).unwrap(), vec![entry]);
    }

    #[test]
    fn region_nodes_are_roots_with_zero_depth() {
        let mut arena = BlockArena::new();
        let entry = push_block(&mut arena, &[Code::Ret]);
        let region = arena.alloc(BaseBlock::Region(RegionBlock::new(RegionKind::Try)));
        let scope = Scope::new(&arena, vec![entry, region], ScopeKind::Method).unwrap();
        assert_eq!(schedule(&scope).unwrap(), vec![entry, region]);
    }

    #[test]
    fn scope_validation_rejects_duplicates() {
        let mut arena = BlockArena::new();
        let entry = push_block(&mut arena, &[Code::Ret]);
        assert!(matches!(
            Scope::new(&arena, vec![entry, entry], ScopeKind::Method),
            Err(Error::InvalidArgument(_))
        ));
    }
}
