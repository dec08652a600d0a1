use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{AgentDecision, DecisionContext, DecisionProvider};
use crate::models::error::DecisionError;

/// Posts the decision context to an external endpoint and expects an
/// `AgentDecision` back as JSON.
pub struct HttpDecisionProvider {
    client: Client,
    endpoint: String,
}

impl HttpDecisionProvider {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, DecisionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpDecisionProvider { client, endpoint })
    }
}

#[async_trait]
impl DecisionProvider for HttpDecisionProvider {
    async fn decide(&self, ctx: DecisionContext) -> Result<AgentDecision, DecisionError> {
        let response = self.client.post(&self.endpoint).json(&ctx).send().await?;
        if !response.status().is_success() {
            return Err(DecisionError::BadStatus(response.status().as_u16()));
        }
        let decision: AgentDecision = response.json().await?;
        Ok(decision)
    }
}
