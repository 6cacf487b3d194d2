//! Admin surface endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::admin::{ActivityLog, RoleInfo, UsageMetrics};
use deskmate_core::error::Result;
use deskmate_core::gateway::AdminGateway;
use deskmate_core::session::User;

/// `AdminGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpAdminGateway {
    api: ApiClient,
}

impl HttpAdminGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdminGateway for HttpAdminGateway {
    async fn metrics(&self) -> Result<UsageMetrics> {
        self.api.send_json(self.api.get("/admin/metrics")).await
    }

    async fn users(&self) -> Result<Vec<User>> {
        self.api.send_json(self.api.get("/admin/users")).await
    }

    async fn roles(&self) -> Result<Vec<RoleInfo>> {
        self.api.send_json(self.api.get("/admin/roles")).await
    }

    async fn logs(&self) -> Result<Vec<ActivityLog>> {
        self.api.send_json(self.api.get("/admin/logs")).await
    }
}
