//! Assistant chat endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::conversation::ChatMessage;
use deskmate_core::error::Result;
use deskmate_core::gateway::{AnalyzeRequest, AnalyzeResponse, ChatGateway};

/// `ChatGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpChatGateway {
    api: ApiClient,
}

impl HttpChatGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        self.api
            .send_json(self.api.post("/chat/analyze").json(request))
            .await
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>> {
        self.api
            .send_json(self.api.get(&format!("/chat/history/{user_id}")))
            .await
    }
}
