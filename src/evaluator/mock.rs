//! Fixed-answer [`Evaluator`] fakes.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::Evaluator;

/// Always reports a match, counting how many times it was asked.
#[derive(Default)]
pub struct AlwaysMatch {
    calls: AtomicUsize,
}

impl AlwaysMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Evaluator for AlwaysMatch {
    async fn is_match(&self, _prompt_a: &str, _prompt_b: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }
}

/// Always reports no match, counting how many times it was asked.
#[derive(Default)]
pub struct NeverMatch {
    calls: AtomicUsize,
}

impl NeverMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Evaluator for NeverMatch {
    async fn is_match(&self, _prompt_a: &str, _prompt_b: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        false
    }
}

/// Returns a fixed verdict and counts invocations; used where a test needs to assert
/// the judge was (or was not) called.
pub struct ScriptedEvaluator {
    verdict: bool,
    calls: AtomicUsize,
}

impl ScriptedEvaluator {
    pub fn new(verdict: bool) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Evaluator for ScriptedEvaluator {
    async fn is_match(&self, _prompt_a: &str, _prompt_b: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}
