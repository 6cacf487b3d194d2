//! Application services for the Deskmate client.
//!
//! Wires the domain types, storage and HTTP gateways into the four
//! stateful components the client runs on: the session store, the
//! conversation store, the media analysis client and the route guard with
//! its idle watchdog. [`container::AppContainer`] is the composition root.

pub mod admin_service;
pub mod chat_service;
pub mod container;
pub mod conversation_store;
pub mod media_service;
pub mod session_store;
pub mod telemetry;
pub mod watchdog;

#[cfg(test)]
mod test_support;

pub use admin_service::{AdminService, DASHBOARD_REFRESH_PERIOD, DashboardSnapshot};
pub use chat_service::{ChatService, SendOutcome};
pub use container::{AppContainer, Collaborators};
pub use conversation_store::ConversationStore;
pub use media_service::{Delay, MediaAnalysisService, POLL_ATTEMPTS, POLL_DELAY, TokioDelay};
pub use session_store::SessionStore;
pub use watchdog::{GuardEvent, IDLE_CHECK_PERIOD, TimerHandle, spawn_idle_watchdog};
