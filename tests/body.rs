//! Body snapshot/restore integration tests.
//!
//! A transformation that rewrites a method body speculatively takes a snapshot first,
//! mutates the live body, and restores the snapshot if the rewrite turns out not to
//! apply. These tests run that workflow through the public API.

use std::sync::Arc;

use cilflow::prelude::*;

/// try { ldstr; call; brtrue -> ret } finally { endfinally }, roughly.
fn sample_body() -> MethodBody {
    let callee = Arc::new(MethodRef::new("bool C::test(string)", false, true, 1));
    let instructions = vec![
        Instruction::new(InstrId::new(0), Code::Ldstr, Operand::String("lock".into())),
        Instruction::new(InstrId::new(1), Code::Call, Operand::Method(callee)),
        Instruction::new(InstrId::new(2), Code::Brtrue, Operand::Target(InstrId::new(4))),
        Instruction::new(InstrId::new(3), Code::Endfinally, Operand::None),
        Instruction::new(InstrId::new(4), Code::Ret, Operand::None),
    ];
    let mut handler = ExceptionHandler::new(ExceptionHandlerFlags::FINALLY);
    handler.try_start = Some(InstrId::new(0));
    handler.try_end = Some(InstrId::new(3));
    handler.handler_start = Some(InstrId::new(3));
    handler.handler_end = Some(InstrId::new(4));
    MethodBody::new(instructions, vec![handler])
}

#[test]
fn speculative_rewrite_can_be_rolled_back() -> Result<()> {
    let mut body = sample_body();
    let snapshot = body.snapshot()?;

    // A failed rewrite attempt leaves the body half-changed...
    let mut broken = body.instructions().to_vec();
    broken.truncate(2);
    let handlers = body.exception_handlers().to_vec();
    body = MethodBody::new(broken, handlers);
    assert_eq!(body.instructions().len(), 2);

    // ...and restoring brings back a complete, internally consistent body.
    body.restore(snapshot);
    assert_eq!(body.instructions().len(), 5);
    assert_eq!(
        *body.instructions()[2].operand(),
        Operand::Target(InstrId::new(4))
    );
    let handler = &body.exception_handlers()[0];
    assert_eq!(handler.try_start, Some(InstrId::new(0)));
    assert_eq!(handler.handler_end, Some(InstrId::new(4)));
    Ok(())
}

#[test]
fn snapshot_is_independent_of_later_mutation() -> Result<()> {
    let mut body = sample_body();
    let snapshot = body.snapshot()?;

    // Flip the branch in the live body; the snapshot must keep the original.
    let mut instructions = body.instructions().to_vec();
    instructions[2].flip_conditional_branch()?;
    let handlers = body.exception_handlers().to_vec();
    body = MethodBody::new(instructions, handlers);
    assert_eq!(body.instructions()[2].code(), Code::Brfalse);
    assert_eq!(snapshot.instructions[2].code(), Code::Brtrue);

    body.restore(snapshot);
    assert_eq!(body.instructions()[2].code(), Code::Brtrue);
    Ok(())
}

#[test]
fn signature_operands_are_shared_across_copies() -> Result<()> {
    let body = sample_body();
    let snapshot = body.snapshot()?;

    let (Operand::Method(original), Operand::Method(copy)) = (
        body.instructions()[1].operand(),
        snapshot.instructions[1].operand(),
    ) else {
        panic!("expected method operands");
    };
    assert!(Arc::ptr_eq(original, copy));
    Ok(())
}

#[test]
fn restored_state_snapshots_again() -> Result<()> {
    let mut body = sample_body();
    let first = body.snapshot()?;
    body.restore(first);

    // The restore itself is not a snapshot; taking a fresh one must work and
    // renumber from the restored ids.
    let second = body.snapshot()?;
    assert_eq!(second.instructions.len(), 5);
    assert_eq!(
        *second.instructions[2].operand(),
        Operand::Target(InstrId::new(4))
    );
    assert_eq!(second.exception_handlers[0].handler_start, Some(InstrId::new(3)));
    Ok(())
}

#[test]
fn call_tallies_survive_the_round_trip() -> Result<()> {
    let mut body = sample_body();
    body.restore(body.snapshot()?);

    let mut calls = MethodCalls::new();
    calls.add_method_calls(&body);
    assert_eq!(calls.count("bool C::test(string)"), 1);
    assert_eq!(body.code_strings(), vec![Arc::<str>::from("lock")]);
    Ok(())
}
