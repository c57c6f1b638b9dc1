//! Async client for the external image service
//!
//! Generation never waits on this. Requests arrive over the event queue
//! and are posted one at a time; any failure is logged and the request is
//! dropped.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::core::error::{GalaxyError, Result};
use crate::galaxy::events::{GenerationEvent, ImageSubject};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    subject: &'a ImageSubject,
    prompt: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImageResponse {
    pub url: String,
}

pub struct ImageService {
    client: Client,
    endpoint: String,
}

impl ImageService {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GalaxyError::ImageService(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Create a service from `IMAGE_SERVICE_URL`, if set
    pub fn from_env() -> Option<Result<Self>> {
        std::env::var("IMAGE_SERVICE_URL").ok().map(Self::new)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn request(&self, subject: &ImageSubject, prompt: &str) -> Result<ImageResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ImageRequest { subject, prompt })
            .send()
            .await
            .map_err(|e| GalaxyError::ImageService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GalaxyError::ImageService(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GalaxyError::ImageService(e.to_string()))
    }
}

/// Outcome counts of a drained queue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub received: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Drain the queue until every sender is dropped
///
/// Without a service, requests are only logged.
pub async fn run_image_worker(
    mut rx: UnboundedReceiver<GenerationEvent>,
    service: Option<ImageService>,
) -> WorkerReport {
    let mut report = WorkerReport::default();

    while let Some(event) = rx.recv().await {
        report.received += 1;
        let GenerationEvent::ImageGenerationRequested { subject, prompt } = event;

        let Some(service) = service.as_ref() else {
            tracing::debug!(%subject, "No image service configured, skipping");
            continue;
        };

        match service.request(&subject, &prompt).await {
            Ok(image) => {
                report.delivered += 1;
                tracing::debug!(%subject, url = %image.url, "Image generated");
            }
            Err(err) => {
                report.failed += 1;
                tracing::warn!(%subject, error = %err, "Image generation failed");
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SpeciesId;
    use crate::galaxy::events::EventSender;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_worker_without_service_drains_queue() {
        let (sender, rx) = EventSender::channel();
        for n in 0..3 {
            sender.request_image(
                ImageSubject::SpeciesPortrait(SpeciesId(Uuid::from_u128(n))),
                format!("prompt {}", n),
            );
        }
        drop(sender);

        let report = run_image_worker(rx, None).await;
        assert_eq!(report.received, 3);
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_unreachable_service_counts_failures() {
        let (sender, rx) = EventSender::channel();
        sender.request_image(
            ImageSubject::SpeciesPortrait(SpeciesId(Uuid::nil())),
            "prompt".into(),
        );
        drop(sender);

        let service = ImageService::new("http://127.0.0.1:9/images").unwrap();
        let report = run_image_worker(rx, Some(service)).await;
        assert_eq!(report.received, 1);
        assert_eq!(report.failed, 1);
    }
}
