//! Media upload and analysis endpoints.

use crate::client::ApiClient;
use async_trait::async_trait;
use deskmate_core::error::{DeskmateError, Result};
use deskmate_core::gateway::{MediaGateway, UploadReceipt};
use deskmate_core::media::{AnalysisJob, MediaKind};
use reqwest::multipart::{Form, Part};

/// `MediaGateway` implementation over the REST API.
#[derive(Clone)]
pub struct HttpMediaGateway {
    api: ApiClient,
}

impl HttpMediaGateway {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn mime_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Voice => "audio/wav",
        MediaKind::Image => "image/*",
    }
}

#[async_trait]
impl MediaGateway for HttpMediaGateway {
    async fn upload(
        &self,
        kind: MediaKind,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadReceipt> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(kind))
            .map_err(|e| DeskmateError::internal(format!("Invalid upload mime type: {e}")))?;
        let form = Form::new().part("file", part);

        let receipt: UploadReceipt = self
            .api
            .send_json(self.api.post(&format!("/media/{kind}")).multipart(form))
            .await?;

        tracing::debug!(job_id = %receipt.id, kind = %kind, "Media uploaded");
        Ok(receipt)
    }

    async fn fetch_analysis(&self, job_id: &str) -> Result<AnalysisJob> {
        self.api
            .send_json(self.api.get(&format!("/media/analysis/{job_id}")))
            .await
    }
}
