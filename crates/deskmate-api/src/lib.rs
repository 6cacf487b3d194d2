//! Typed client for the support-desk REST API.
//!
//! Implements the gateway traits from `deskmate-core` over HTTP. All
//! gateways share one [`ApiClient`], which owns the base URL, the request
//! timeout, and bearer-token injection from the session store's shared
//! handle.

pub mod admin;
pub mod auth;
pub mod categories;
pub mod chat;
pub mod client;
pub mod feedback;
pub mod media;

pub use admin::HttpAdminGateway;
pub use auth::HttpAuthGateway;
pub use categories::HttpCategoryGateway;
pub use chat::HttpChatGateway;
pub use client::ApiClient;
pub use feedback::HttpFeedbackGateway;
pub use media::HttpMediaGateway;
