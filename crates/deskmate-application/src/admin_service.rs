//! Admin surface use case.
//!
//! Thin role-gated bindings over the admin endpoints, plus the dashboard
//! auto-refresh task. The backend enforces authorization on its own; the
//! client-side role check just keeps a non-admin from issuing requests
//! that are guaranteed to 403 and force a sign-out.

use crate::session_store::SessionStore;
use crate::watchdog::TimerHandle;
use deskmate_core::admin::{ActivityLog, RoleInfo, UsageMetrics};
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::AdminGateway;
use deskmate_core::session::User;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Period of the dashboard auto-refresh.
pub const DASHBOARD_REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// One refresh of the dashboard data.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub metrics: UsageMetrics,
    pub logs: Vec<ActivityLog>,
}

/// Role-gated access to the admin endpoints.
pub struct AdminService {
    admin: Arc<dyn AdminGateway>,
    session: Arc<SessionStore>,
}

impl AdminService {
    pub fn new(admin: Arc<dyn AdminGateway>, session: Arc<SessionStore>) -> Self {
        Self { admin, session }
    }

    async fn require_admin(&self) -> Result<()> {
        if self.session.current().await.is_admin() {
            Ok(())
        } else {
            Err(DeskmateError::authentication("Admin role required"))
        }
    }

    /// Fetches usage metrics for the dashboard.
    pub async fn metrics(&self) -> Result<UsageMetrics> {
        self.require_admin().await?;
        self.admin.metrics().await
    }

    /// Lists all users.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.require_admin().await?;
        self.admin.users().await
    }

    /// Lists all roles.
    pub async fn roles(&self) -> Result<Vec<RoleInfo>> {
        self.require_admin().await?;
        self.admin.roles().await
    }

    /// Fetches the system activity log.
    pub async fn logs(&self) -> Result<Vec<ActivityLog>> {
        self.require_admin().await?;
        self.admin.logs().await
    }

    /// Fetches everything the dashboard renders in one pass.
    pub async fn fetch_dashboard(&self) -> Result<DashboardSnapshot> {
        self.require_admin().await?;
        let metrics = self.admin.metrics().await?;
        let logs = self.admin.logs().await?;
        Ok(DashboardSnapshot { metrics, logs })
    }

    /// Spawns the dashboard auto-refresh task.
    ///
    /// Emits a fresh snapshot immediately and then every
    /// [`DASHBOARD_REFRESH_PERIOD`] until the handle is cancelled or
    /// dropped. Fetch failures are logged and skipped; the next tick tries
    /// again.
    pub fn start_auto_refresh(
        self: &Arc<Self>,
        events: mpsc::UnboundedSender<DashboardSnapshot>,
    ) -> TimerHandle {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let service = Arc::clone(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(DASHBOARD_REFRESH_PERIOD);
            tracing::debug!(
                period_secs = DASHBOARD_REFRESH_PERIOD.as_secs(),
                "Dashboard auto-refresh started"
            );

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {
                        match service.fetch_dashboard().await {
                            Ok(snapshot) => {
                                if events.send(snapshot).is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "Dashboard refresh failed");
                            }
                        }
                    }
                }
            }

            tracing::debug!("Dashboard auto-refresh stopped");
        });

        TimerHandle::new(token)
    }
}
