//! Feedback endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::error::Result;
use deskmate_core::feedback::{FeedbackStats, FeedbackSubmission};
use deskmate_core::gateway::FeedbackGateway;

/// `FeedbackGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpFeedbackGateway {
    api: ApiClient,
}

impl HttpFeedbackGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl FeedbackGateway for HttpFeedbackGateway {
    async fn rate_message(&self, message_id: &str, submission: &FeedbackSubmission) -> Result<()> {
        self.api
            .send_unit(
                self.api
                    .post(&format!("/chat/{message_id}/feedback"))
                    .json(submission),
            )
            .await
    }

    async fn submit(&self, submission: &FeedbackSubmission) -> Result<()> {
        self.api
            .send_unit(self.api.post("/feedback/submit").json(submission))
            .await
    }

    async fn stats(&self) -> Result<FeedbackStats> {
        self.api.send_json(self.api.get("/feedback/stats")).await
    }
}
