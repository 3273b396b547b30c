//! Per-invocation call tallies.
//!
//! Detection heuristics upstream often need to know which callee a group of rewritten
//! call sites most frequently references. These accumulators are plain values created
//! per invocation and passed explicitly, never shared global state, so hosts that
//! process method bodies in parallel can give each worker its own.

use std::collections::HashMap;

use crate::{
    assembly::{MethodRef, MethodRefRc, Operand},
    method::MethodBody,
};

/// Counts references to callees and reports the most frequent one.
#[derive(Debug, Default)]
pub struct CallCounter {
    calls: HashMap<MethodRefRc, usize>,
}

impl CallCounter {
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        CallCounter::default()
    }

    /// Records one reference to `method`.
    pub fn add(&mut self, method: &MethodRefRc) {
        *self.calls.entry(method.clone()).or_insert(0) += 1;
    }

    /// Returns the most frequently recorded callee, or `None` if nothing was
    /// recorded. Ties resolve to whichever entry is seen first.
    #[must_use]
    pub fn most(&self) -> Option<MethodRefRc> {
        let mut best: Option<(&MethodRefRc, usize)> = None;
        for (method, &count) in &self.calls {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((method, count));
            }
        }
        best.map(|(method, _)| method.clone())
    }
}

/// Tallies call sites by full method name.
#[derive(Debug, Default)]
pub struct MethodCalls {
    method_calls: HashMap<String, usize>,
}

impl MethodCalls {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        MethodCalls::default()
    }

    /// Records every callee reference found in `body`.
    pub fn add_method_calls(&mut self, body: &MethodBody) {
        for instruction in body.instructions() {
            if let Operand::Method(method) = instruction.operand() {
                self.add(method);
            }
        }
    }

    /// Records one reference to `method`.
    pub fn add(&mut self, method: &MethodRef) {
        *self
            .method_calls
            .entry(method.full_name.clone())
            .or_insert(0) += 1;
    }

    /// Returns how many times `full_name` was recorded.
    #[must_use]
    pub fn count(&self, full_name: &str) -> usize {
        self.method_calls.get(full_name).copied().unwrap_or(0)
    }

    /// Returns `true` if `full_name` was recorded at least once.
    #[must_use]
    pub fn called(&self, full_name: &str) -> bool {
        self.count(full_name) != 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assembly::{Code, InstrId, Instruction};

    fn method(name: &str) -> MethodRefRc {
        Arc::new(MethodRef::new(name, false, false, 0))
    }

    #[test]
    fn call_counter_reports_most_frequent() {
        let mut counter = CallCounter::new();
        assert!(counter.most().is_none());

        let a = method("void A::a()");
        let b = method("void B::b()");
        counter.add(&a);
        counter.add(&b);
        counter.add(&b);

        assert_eq!(counter.most().unwrap().full_name, "void B::b()");
    }

    #[test]
    fn method_calls_tallies_a_body() {
        let decrypt = method("string C::decrypt(int)");
        let body = MethodBody::new(
            vec![
                Instruction::new(InstrId::new(0), Code::Call, Operand::Method(decrypt.clone())),
                Instruction::new(InstrId::new(1), Code::Call, Operand::Method(decrypt)),
                Instruction::new(InstrId::new(2), Code::Ret, Operand::None),
            ],
            Vec::new(),
        );

        let mut calls = MethodCalls::new();
        calls.add_method_calls(&body);

        assert_eq!(calls.count("string C::decrypt(int)"), 2);
        assert!(calls.called("string C::decrypt(int)"));
        assert!(!calls.called("void D::other()"));
    }
}
