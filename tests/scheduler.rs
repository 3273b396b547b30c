//! Forward-scan scheduler integration tests.
//!
//! These tests exercise the full scheduling pipeline through the public API:
//! 1. Build a block graph in an arena (standing in for the upstream graph builder)
//! 2. Create a scope over a reference order
//! 3. Schedule and verify the structural invariants the downstream emitter relies on

use std::collections::HashSet;

use cilflow::prelude::*;

/// Build an instruction-bearing block and return its id.
fn block(
    arena: &mut BlockArena,
    codes: &[Code],
    sources: Option<Vec<BlockId>>,
    targets: Vec<BlockId>,
) -> BlockId {
    let instructions = codes
        .iter()
        .enumerate()
        .map(|(index, &code)| Instruction::new(InstrId::new(index as u32), code, Operand::None))
        .collect();
    arena.alloc(BaseBlock::Block(Block::new(instructions, sources, targets)))
}

/// Assert that `order` is a permutation of `expected_members`.
fn assert_permutation(order: &[BlockId], expected_members: &[BlockId]) {
    assert_eq!(order.len(), expected_members.len());
    let seen: HashSet<BlockId> = order.iter().copied().collect();
    assert_eq!(seen.len(), order.len(), "duplicate block in output");
    for member in expected_members {
        assert!(seen.contains(member), "missing block {member}");
    }
}

#[test]
fn valid_order_is_left_unchanged() -> Result<()> {
    // A -> B, A -> C, B -> C; every edge carries depth 0.
    let mut arena = BlockArena::new();
    let a = block(
        &mut arena,
        &[Code::LdcI41, Code::Brtrue],
        None,
        vec![BlockId::new(1), BlockId::new(2)],
    );
    let b = block(
        &mut arena,
        &[Code::Nop, Code::Br],
        Some(vec![a]),
        vec![BlockId::new(2)],
    );
    let c = block(&mut arena, &[Code::Ret], Some(vec![a, b]), Vec::new());

    let scope = Scope::new(&arena, vec![a, b, c], ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, vec![a, b, c]);
    Ok(())
}

#[test]
fn witness_source_is_reinserted_before_its_dependent() -> Result<()> {
    // B leaves one value on the stack for C; the input order has C before B.
    let mut arena = BlockArena::new();
    let a = block(&mut arena, &[Code::Nop], None, vec![BlockId::new(1)]);
    let b = block(
        &mut arena,
        &[Code::LdcI40],
        Some(vec![a]),
        vec![BlockId::new(2)],
    );
    let c = block(
        &mut arena,
        &[Code::Pop, Code::Ret],
        Some(vec![b]),
        Vec::new(),
    );

    let scope = Scope::new(&arena, vec![a, c, b], ScopeKind::Method)?;
    let order = schedule(&scope)?;
    assert_eq!(order, vec![a, b, c]);
    assert_permutation(&order, &[a, b, c]);
    Ok(())
}

#[test]
fn unreachable_block_is_a_fatal_inconsistency() -> Result<()> {
    let mut arena = BlockArena::new();
    let a = block(&mut arena, &[Code::Ret], None, Vec::new());
    // D claims A as its source, but nothing targets it: not a root, never visited.
    let d = block(&mut arena, &[Code::Ret], Some(vec![a]), Vec::new());

    let scope = Scope::new(&arena, vec![a, d], ScopeKind::Method)?;
    match schedule(&scope) {
        Err(Error::InconsistentBlockSet { visited, total }) => {
            assert_eq!(visited, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected InconsistentBlockSet, got {other:?}"),
    }
    Ok(())
}

#[test]
fn reversed_chain_is_fully_reordered() -> Result<()> {
    // B0 -> B1 -> ... -> B9, every block pushing one more value. Handing the
    // scheduler the order [B0, B9, B8, ..., B1] must recover the chain.
    const LEN: u32 = 10;
    let mut arena = BlockArena::new();
    let mut chain = Vec::new();
    for i in 0..LEN {
        let sources = if i == 0 {
            None
        } else {
            Some(vec![BlockId::new(i - 1)])
        };
        let targets = if i + 1 < LEN {
            vec![BlockId::new(i + 1)]
        } else {
            Vec::new()
        };
        chain.push(block(&mut arena, &[Code::LdcI40], sources, targets));
    }

    let mut shuffled = vec![chain[0]];
    shuffled.extend(chain[1..].iter().rev());

    let scope = Scope::new(&arena, shuffled, ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, chain);
    Ok(())
}

#[test]
fn source_cycles_terminate_and_order_the_witness_first() -> Result<()> {
    // B and C form a loop entered from A with one value on the stack.
    let mut arena = BlockArena::new();
    let a = block(&mut arena, &[Code::LdcI40], None, vec![BlockId::new(1)]);
    let b = block(
        &mut arena,
        &[Code::Nop],
        Some(vec![a, BlockId::new(2)]),
        vec![BlockId::new(2)],
    );
    let c = block(&mut arena, &[Code::Nop], Some(vec![b]), vec![BlockId::new(1)]);

    let scope = Scope::new(&arena, vec![a, c, b], ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, vec![a, b, c]);
    Ok(())
}

#[test]
fn region_nodes_and_external_entries_are_roots() -> Result<()> {
    let mut arena = BlockArena::new();
    let entry = block(&mut arena, &[Code::Nop], None, vec![BlockId::new(1)]);
    let region = arena.alloc(BaseBlock::Region(RegionBlock::new(RegionKind::Try)));
    // A block belonging to the region's interior, scheduled with the nested scope
    // rather than this one.
    let interior = block(&mut arena, &[Code::Leave], None, vec![BlockId::new(3)]);
    // Reached only by the leave edge from the interior; since that source is not
    // part of this scope, the block is independently rooted at depth 0.
    let after = block(&mut arena, &[Code::Ret], Some(vec![interior]), Vec::new());

    let scope = Scope::new(&arena, vec![entry, region, after], ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, vec![entry, region, after]);
    Ok(())
}

#[test]
fn handler_scope_entry_starts_with_the_exception_object() -> Result<()> {
    // A handler body that immediately consumes the pushed exception. Under
    // ScopeKind::Handler the entry starts at depth 1, so `pop` is balanced.
    let mut arena = BlockArena::new();
    let entry = block(&mut arena, &[Code::Pop, Code::Nop], None, vec![BlockId::new(1)]);
    let exit = block(&mut arena, &[Code::Ret], Some(vec![entry]), Vec::new());

    let scope = Scope::new(&arena, vec![entry, exit], ScopeKind::Handler)?;
    assert_eq!(schedule(&scope)?, vec![entry, exit]);

    // The same blocks are equally schedulable as a method scope: depth
    // bookkeeping may go negative, only ordering invariants are enforced.
    let scope = Scope::new(&arena, vec![entry, exit], ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, vec![entry, exit]);
    Ok(())
}

#[test]
fn filter_scopes_behave_like_handler_scopes() -> Result<()> {
    let mut arena = BlockArena::new();
    let entry = block(&mut arena, &[Code::Pop, Code::LdcI40, Code::Ret], None, Vec::new());
    let scope = Scope::new(&arena, vec![entry], ScopeKind::Filter)?;
    assert_eq!(schedule(&scope)?, vec![entry]);
    Ok(())
}

#[test]
fn simulator_failures_abort_the_scope() -> Result<()> {
    // A call instruction without a callee signature cannot be simulated.
    let mut arena = BlockArena::new();
    let entry = arena.alloc(BaseBlock::Block(Block::new(
        vec![Instruction::new(InstrId::new(0), Code::Call, Operand::None)],
        None,
        Vec::new(),
    )));

    let scope = Scope::new(&arena, vec![entry], ScopeKind::Method)?;
    assert!(matches!(schedule(&scope), Err(Error::InvalidOperand(_))));
    Ok(())
}

#[test]
fn scheduling_is_deterministic() -> Result<()> {
    let mut arena = BlockArena::new();
    let a = block(&mut arena, &[Code::LdcI40], None, vec![BlockId::new(1), BlockId::new(2)]);
    let b = block(
        &mut arena,
        &[Code::Nop],
        Some(vec![a]),
        vec![BlockId::new(3)],
    );
    let c = block(
        &mut arena,
        &[Code::Nop],
        Some(vec![a]),
        vec![BlockId::new(3)],
    );
    // Two candidate witnesses; the first in-scope source in recorded order wins.
    let d = block(
        &mut arena,
        &[Code::Pop, Code::Ret],
        Some(vec![b, c]),
        Vec::new(),
    );

    let order = vec![a, d, b, c];
    let scope = Scope::new(&arena, order.clone(), ScopeKind::Method)?;
    let first = schedule(&scope)?;
    assert_eq!(first, vec![a, b, d, c]);

    let scope = Scope::new(&arena, order, ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, first);
    Ok(())
}

#[test]
fn call_effects_flow_through_block_depths() -> Result<()> {
    use std::sync::Arc;

    // A pushes two arguments and calls int F(int, int), leaving the return value
    // for C; in the broken order [A, C, B] the witness B is pulled forward.
    let factory = Arc::new(MethodRef::new("int32 T::F(int32, int32)", false, true, 2));
    let mut arena = BlockArena::new();
    let a = block(&mut arena, &[Code::Nop], None, vec![BlockId::new(1)]);
    let b = arena.alloc(BaseBlock::Block(Block::new(
        vec![
            Instruction::new(InstrId::new(0), Code::LdcI41, Operand::None),
            Instruction::new(InstrId::new(1), Code::LdcI42, Operand::None),
            Instruction::new(InstrId::new(2), Code::Call, Operand::Method(factory)),
        ],
        Some(vec![a]),
        vec![BlockId::new(2)],
    )));
    let c = block(
        &mut arena,
        &[Code::Pop, Code::Ret],
        Some(vec![b]),
        Vec::new(),
    );

    let scope = Scope::new(&arena, vec![a, c, b], ScopeKind::Method)?;
    assert_eq!(schedule(&scope)?, vec![a, b, c]);
    Ok(())
}
