use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AgentDecision, DecisionContext, DecisionProvider};
use crate::models::error::DecisionError;

/// Deterministic provider for tests and local simulation: hands out queued
/// decisions in order, then passes. Queue a `fail` entry to exercise the
/// skip-on-error path.
#[derive(Default)]
pub struct ScriptedDecisionProvider {
    script: Mutex<VecDeque<Result<AgentDecision, DecisionError>>>,
}

impl ScriptedDecisionProvider {
    pub fn new() -> Self {
        ScriptedDecisionProvider::default()
    }

    pub fn push(&self, decision: AgentDecision) {
        self.script.lock().unwrap().push_back(Ok(decision));
    }

    pub fn push_failure(&self, reason: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(DecisionError::Unavailable(reason.to_string())));
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl DecisionProvider for ScriptedDecisionProvider {
    async fn decide(&self, _ctx: DecisionContext) -> Result<AgentDecision, DecisionError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(AgentDecision::Wait))
    }
}
