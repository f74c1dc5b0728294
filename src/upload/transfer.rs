use crate::config::ConverterConfig;
use crate::error::TransferError;
use crate::upload::progress::{ProgressFn, UploadProgress};
use crate::upload::types::{ResponseType, SelectedFile};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Url};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Multipart field the service reads the document from.
pub const FILE_FIELD: &str = "file";

const CHUNK_SIZE: usize = 64 * 1024;

/// Performs one conversion exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Uploads `file` and returns the response body shaped by `response_type`.
    ///
    /// `on_progress` is called for every upload progress event.
    async fn send(
        &self,
        file: &SelectedFile,
        response_type: ResponseType,
        on_progress: ProgressFn,
    ) -> Result<Bytes, TransferError>;
}

/// Body of the service's `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// FastAPI-style error body; `detail` is a string or a list of validation errors.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    convert_url: Url,
    health_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ConverterConfig) -> Result<Self, TransferError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransferError::Request)?;

        Ok(Self {
            client,
            convert_url: config.convert_url(),
            health_url: config.health_url(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.convert_url
    }

    pub async fn health(&self) -> Result<HealthReport, TransferError> {
        let response = self
            .client
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(TransferError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<HealthReport>()
            .await
            .map_err(TransferError::Body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        file: &SelectedFile,
        response_type: ResponseType,
        on_progress: ProgressFn,
    ) -> Result<Bytes, TransferError> {
        let content = tokio::fs::read(&file.path)
            .await
            .map_err(|source| TransferError::Read {
                path: file.path.clone(),
                source,
            })?;
        let total = content.len() as u64;

        let part = Part::stream_with_length(progress_body(Bytes::from(content), on_progress), total)
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(TransferError::Request)?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(file = %file.name, bytes = total, url = %self.convert_url, "Uploading for conversion");

        let response = self
            .client
            .post(self.convert_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(TransferError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(err) => warn!(status = status.as_u16(), detail = %err.detail, "Conversion rejected"),
                Err(_) => warn!(status = status.as_u16(), "Conversion rejected"),
            }
            return Err(TransferError::Status {
                status: status.as_u16(),
            });
        }

        let body = match response_type {
            ResponseType::Binary => response.bytes().await.map_err(TransferError::Body)?,
            ResponseType::Text => Bytes::from(response.text().await.map_err(TransferError::Body)?),
        };
        debug!(file = %file.name, bytes = body.len(), "Conversion response received");
        Ok(body)
    }
}

/// Streams `content` in fixed chunks, reporting progress as each chunk is
/// handed to the transport.
fn progress_body(content: Bytes, on_progress: ProgressFn) -> Body {
    let mut progress = UploadProgress::new(content.len() as u64);
    let chunks: Vec<Bytes> = (0..content.len())
        .step_by(CHUNK_SIZE)
        .map(|start| content.slice(start..(start + CHUNK_SIZE).min(content.len())))
        .collect();

    let stream = stream::iter(chunks).map(move |chunk| {
        if let Some(percent) = progress.advance(chunk.len() as u64) {
            on_progress(percent);
        }
        Ok::<_, std::io::Error>(chunk)
    });
    Body::wrap_stream(stream)
}
