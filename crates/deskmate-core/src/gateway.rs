//! Remote collaborator contracts.
//!
//! The backend REST API is externally owned; these traits define exactly
//! what the client expects of it, decoupling the application services from
//! the HTTP transport. The concrete reqwest implementation lives in the
//! `deskmate-api` crate; tests substitute hand-rolled mocks.

use crate::admin::{ActivityLog, RoleInfo, UsageMetrics};
use crate::category::Category;
use crate::conversation::ChatMessage;
use crate::error::Result;
use crate::feedback::{FeedbackStats, FeedbackSubmission};
use crate::media::{AnalysisJob, AnalysisStatus, MediaKind};
use crate::session::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Successful credential exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    /// Opaque bearer credential
    pub access_token: String,
    /// Identity attached to the credential
    pub user: User,
}

/// Payload for account creation.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Payload sent to the assistant analyze endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    /// Sanitized message text
    pub content: String,
    /// Category display name
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Client-side send timestamp (ISO 8601)
    pub timestamp: String,
    /// Input modality ("text", "voice", "image")
    #[serde(rename = "type")]
    pub kind: String,
}

/// Assistant answer returned by the analyze endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    /// Server-assigned id of the assistant message
    pub id: String,
    /// Answer text
    pub content: String,
    /// Server confidence in the answer, 0.0..=1.0
    pub confidence: f32,
    /// Server-side creation timestamp
    pub created_at: String,
    /// Server-assigned id for the user message that triggered this answer
    #[serde(default)]
    pub user_message_id: Option<String>,
}

/// Acknowledgement of a media upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReceipt {
    /// Analysis job id to poll
    pub id: String,
    /// Initial job status, normally `Processing`
    pub status: AnalysisStatus,
}

/// Authentication endpoints.
///
/// The bearer credential itself is carried by the shared
/// [`BearerToken`](crate::session::BearerToken) handle, not passed per
/// call; `verify` operates on whatever token is currently held.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a token and identity.
    ///
    /// # Returns
    ///
    /// - `Ok(SignInResponse)`: Credentials accepted
    /// - `Err(InvalidCredentials)`: The server answered 401
    /// - `Err(_)`: Transport failure or malformed response
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResponse>;

    /// Re-validates the currently held token.
    async fn verify(&self) -> Result<User>;

    /// Creates a new account.
    async fn register(&self, registration: &Registration) -> Result<User>;
}

/// Help-category endpoints.
#[async_trait]
pub trait CategoryGateway: Send + Sync {
    /// Lists all categories.
    async fn list(&self) -> Result<Vec<Category>>;

    /// Fetches a single category by id.
    async fn get(&self, category_id: &str) -> Result<Category>;
}

/// Assistant chat endpoints.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Submits a user message for analysis and returns the assistant answer.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse>;

    /// Fetches the server-side message history for a user.
    async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>>;
}

/// Media upload and analysis endpoints.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Uploads an asset for asynchronous analysis.
    ///
    /// Transport failures surface immediately; there is no silent retry.
    async fn upload(&self, kind: MediaKind, bytes: Vec<u8>, file_name: &str)
    -> Result<UploadReceipt>;

    /// Reads the current state of an analysis job.
    async fn fetch_analysis(&self, job_id: &str) -> Result<AnalysisJob>;
}

/// Feedback endpoints.
#[async_trait]
pub trait FeedbackGateway: Send + Sync {
    /// Rates a single assistant message.
    async fn rate_message(&self, message_id: &str, submission: &FeedbackSubmission) -> Result<()>;

    /// Submits standalone feedback.
    async fn submit(&self, submission: &FeedbackSubmission) -> Result<()>;

    /// Fetches aggregate feedback counters.
    async fn stats(&self) -> Result<FeedbackStats>;
}

/// Admin surface endpoints.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// Fetches usage metrics for the dashboard.
    async fn metrics(&self) -> Result<UsageMetrics>;

    /// Lists all users.
    async fn users(&self) -> Result<Vec<User>>;

    /// Lists all roles.
    async fn roles(&self) -> Result<Vec<RoleInfo>>;

    /// Fetches the system activity log.
    async fn logs(&self) -> Result<Vec<ActivityLog>>;
}
