//! Help-category endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::category::Category;
use deskmate_core::error::Result;
use deskmate_core::gateway::CategoryGateway;

/// `CategoryGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpCategoryGateway {
    api: ApiClient,
}

impl HttpCategoryGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CategoryGateway for HttpCategoryGateway {
    async fn list(&self) -> Result<Vec<Category>> {
        self.api.send_json(self.api.get("/categories")).await
    }

    async fn get(&self, category_id: &str) -> Result<Category> {
        self.api
            .send_json(self.api.get(&format!("/categories/{category_id}")))
            .await
    }
}
