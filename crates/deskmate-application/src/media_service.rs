//! Media analysis use case.
//!
//! Uploads a voice or image asset, then polls the analysis endpoint until
//! the job reaches a terminal state or the attempt ceiling is hit. The
//! loop is strictly sequential (request, delay, request); the only
//! consumer is a single caller awaiting one result, so there is no fan-out
//! and no shared polling state. Abandoning the returned future abandons
//! the loop; a late terminal status on the server is simply never read.

use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::MediaGateway;
use deskmate_core::media::{AnalysisJob, AnalysisStatus, MediaKind};
use std::sync::Arc;
use std::time::Duration;

/// Fixed number of status checks before the poll gives up.
pub const POLL_ATTEMPTS: u32 = 10;

/// Fixed delay between non-terminal status checks.
pub const POLL_DELAY: Duration = Duration::from_secs(1);

/// Awaitable delay between poll attempts.
///
/// Injected so tests can run the full attempt ceiling without wall-clock
/// waits.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Delay backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Upload-then-poll client for voice and image analysis.
pub struct MediaAnalysisService {
    media: Arc<dyn MediaGateway>,
    delay: Arc<dyn Delay>,
}

impl MediaAnalysisService {
    pub fn new(media: Arc<dyn MediaGateway>, delay: Arc<dyn Delay>) -> Self {
        Self { media, delay }
    }

    /// Uploads an asset and returns the analysis job id.
    ///
    /// Transport failures surface immediately as upload failures; nothing
    /// is retried here.
    pub async fn upload(&self, kind: MediaKind, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        let receipt = self.media.upload(kind, bytes, file_name).await?;
        Ok(receipt.id)
    }

    /// Polls a job until it reaches a terminal state.
    ///
    /// A job that reports `status: error` is returned as a job; that is
    /// the server's answer. Exhausting the attempt ceiling without a
    /// terminal status is [`DeskmateError::Timeout`], so callers can tell
    /// "we gave up" from "the server said no".
    pub async fn poll_until_terminal(&self, job_id: &str) -> Result<AnalysisJob> {
        for attempt in 1..=POLL_ATTEMPTS {
            let job = self.media.fetch_analysis(job_id).await?;
            if job.is_terminal() {
                tracing::debug!(job_id, attempt, status = ?job.status, "Analysis finished");
                return Ok(job);
            }
            if attempt < POLL_ATTEMPTS {
                self.delay.wait(POLL_DELAY).await;
            }
        }

        tracing::warn!(job_id, attempts = POLL_ATTEMPTS, "Analysis poll gave up");
        Err(DeskmateError::timeout("media analysis poll", POLL_ATTEMPTS))
    }

    /// Uploads an asset and waits for its recognized text.
    ///
    /// Convenience for the chat input: a completed job yields its text, a
    /// server-reported failure becomes a validation error carrying the
    /// server's message, and the poll timeout passes through unchanged.
    pub async fn transcribe(
        &self,
        kind: MediaKind,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<String> {
        let job_id = self.upload(kind, bytes, file_name).await?;
        let job = self.poll_until_terminal(&job_id).await?;

        match job.status {
            AnalysisStatus::Completed => job
                .result
                .map(|r| r.text)
                .ok_or_else(|| {
                    DeskmateError::validation("Completed analysis carried no result text")
                }),
            AnalysisStatus::Error => Err(DeskmateError::validation(
                job.error
                    .unwrap_or_else(|| format!("Failed to process {kind} input")),
            )),
            AnalysisStatus::Processing => Err(DeskmateError::internal(
                "poll_until_terminal returned a non-terminal job",
            )),
        }
    }
}
