//! Background idle-session watchdog.
//!
//! Navigation evaluates the route guard on its own; this task covers the
//! case where the user walks away mid-view. Every minute it re-checks the
//! idle timeout and, once exceeded, forces a sign-out and tells the
//! embedding UI where to redirect. The task must be cancelled on teardown
//! so no callback outlives the view and acts on stale state; dropping the
//! returned handle does that.

use crate::session_store::SessionStore;
use deskmate_core::route::LOGIN_ROUTE;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Period of the idle-session re-check.
pub const IDLE_CHECK_PERIOD: Duration = Duration::from_secs(60);

/// Notification emitted when the watchdog forces a sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardEvent {
    /// The idle timeout elapsed; the session was cleared and the UI must
    /// redirect to the given route.
    SessionExpired { redirect: &'static str },
}

/// Cancellation handle for a background timer task.
///
/// The task stops at the next scheduling point after `cancel`; dropping
/// the handle cancels implicitly.
#[derive(Debug)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Stops the background task.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once `cancel` has been called (or the handle dropped).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns the idle watchdog.
///
/// The first check runs immediately, then once per [`IDLE_CHECK_PERIOD`].
/// An expired session is signed out exactly once; subsequent ticks see an
/// unauthenticated session and do nothing.
pub fn spawn_idle_watchdog(
    session: Arc<SessionStore>,
    events: mpsc::UnboundedSender<GuardEvent>,
) -> TimerHandle {
    let token = CancellationToken::new();
    let task_token = token.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(IDLE_CHECK_PERIOD);
        tracing::debug!(period_secs = IDLE_CHECK_PERIOD.as_secs(), "Idle watchdog started");

        loop {
            tokio::select! {
                _ = task_token.cancelled() => break,
                _ = ticker.tick() => {
                    if session.is_authenticated().await && session.is_expired().await {
                        tracing::info!("Idle timeout elapsed; forcing sign-out");
                        if let Err(e) = session.sign_out().await {
                            tracing::error!(error = %e, "Forced sign-out failed to clear storage");
                        }
                        if events
                            .send(GuardEvent::SessionExpired { redirect: LOGIN_ROUTE })
                            .is_err()
                        {
                            // Receiver gone: the owning view is down.
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!("Idle watchdog stopped");
    });

    TimerHandle::new(token)
}
