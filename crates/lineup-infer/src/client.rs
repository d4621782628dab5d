//! HTTP client for the face-inference service.

use crate::dto::{FaceDto, ReadyDto};
use lineup_core::{AnalyzerError, Detection, FaceAnalyzer};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferError {
    #[error("inference service not ready at {url}: {reason}")]
    ModelUnavailable { url: String, reason: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("inference service returned status {0}")]
    Status(u16),
    #[error("malformed inference response: {0}")]
    BadResponse(String),
}

impl From<InferError> for AnalyzerError {
    fn from(err: InferError) -> Self {
        match err {
            InferError::ModelUnavailable { .. } => AnalyzerError::Unavailable(err.to_string()),
            other => AnalyzerError::DetectionFailed(other.to_string()),
        }
    }
}

/// Readiness report from the service.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub model: String,
    pub descriptor_dim: usize,
}

/// [`FaceAnalyzer`] backed by a remote inference service.
///
/// Wire format: `POST /v1/faces?mode=all|single` with a raw RGB8 body and
/// `X-Image-Width` / `X-Image-Height` headers; the response is a JSON
/// array of faces.
pub struct RemoteAnalyzer {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteAnalyzer {
    /// Connect to the service and verify its models are loaded.
    ///
    /// The readiness probe is the one-time, fallible initialization step:
    /// a failure here means no detection may be attempted.
    pub fn connect(base_url: &str, timeout: Duration) -> Result<Self, InferError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let analyzer = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        let status = analyzer.status().map_err(|e| InferError::ModelUnavailable {
            url: analyzer.base_url.clone(),
            reason: e.to_string(),
        })?;
        tracing::info!(
            url = %analyzer.base_url,
            model = %status.model,
            descriptor_dim = status.descriptor_dim,
            "inference service ready"
        );
        Ok(analyzer)
    }

    /// Probe `GET /v1/ready`.
    pub fn status(&self) -> Result<ServiceStatus, InferError> {
        let response = self
            .client
            .get(format!("{}/v1/ready", self.base_url))
            .send()?;
        let code = response.status();
        if !code.is_success() {
            return Err(InferError::Status(code.as_u16()));
        }
        let ready: ReadyDto = response
            .json()
            .map_err(|e| InferError::BadResponse(e.to_string()))?;
        Ok(ServiceStatus {
            model: ready.model,
            descriptor_dim: ready.descriptor_dim,
        })
    }

    fn detect(
        &self,
        mode: &str,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, InferError> {
        let response = self
            .client
            .post(format!("{}/v1/faces", self.base_url))
            .query(&[("mode", mode)])
            .header("X-Image-Width", width)
            .header("X-Image-Height", height)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(rgb.to_vec())
            .send()?;

        let code = response.status();
        if !code.is_success() {
            return Err(InferError::Status(code.as_u16()));
        }

        let faces: Vec<FaceDto> = response
            .json()
            .map_err(|e| InferError::BadResponse(e.to_string()))?;
        tracing::debug!(mode, count = faces.len(), "inference service responded");
        Ok(faces.into_iter().map(FaceDto::into_detection).collect())
    }
}

impl FaceAnalyzer for RemoteAnalyzer {
    fn detect_all_faces(
        &self,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Detection>, AnalyzerError> {
        Ok(self.detect("all", rgb, width, height)?)
    }

    fn detect_single_face(
        &self,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Option<Detection>, AnalyzerError> {
        // mode=single asks the service for its most prominent face only
        let faces = self.detect("single", rgb, width, height)?;
        Ok(faces.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_maps_to_analyzer_unavailable() {
        let err = InferError::ModelUnavailable {
            url: "http://127.0.0.1:8470".into(),
            reason: "connection refused".into(),
        };
        assert!(matches!(
            AnalyzerError::from(err),
            AnalyzerError::Unavailable(_)
        ));
    }

    #[test]
    fn test_status_error_maps_to_detection_failed() {
        let err = InferError::Status(503);
        match AnalyzerError::from(err) {
            AnalyzerError::DetectionFailed(msg) => assert!(msg.contains("503")),
            other => panic!("expected DetectionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_connect_refused_is_model_unavailable() {
        // Port 9 (discard) is not serving HTTP; connect must fail the
        // readiness probe rather than hand back a client.
        let err = RemoteAnalyzer::connect("http://127.0.0.1:9", Duration::from_millis(200))
            .unwrap_err();
        assert!(matches!(err, InferError::ModelUnavailable { .. }));
    }
}
