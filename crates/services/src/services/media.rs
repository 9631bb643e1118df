//! ImageKit-style media upload client.
//!
//! Uploads are authorized by a signed, time-limited triple fetched from a
//! trusted backend endpoint; the file itself goes to the CDN's upload API as
//! a multipart form and comes back as a public URL.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, multipart};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use super::config::ImageKitConfig;

const UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";

#[derive(Debug, Clone, Error)]
pub enum MediaError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("json error: {0}")]
    Serde(String),
    #[error("imagekit is not configured: missing {0}")]
    MissingConfig(&'static str),
}

/// Signed upload authorization returned by the trusted backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct UploadAuthParams {
    pub signature: String,
    pub expire: u64,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Clone)]
pub struct MediaService {
    http: Client,
    config: ImageKitConfig,
}

impl MediaService {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(config: ImageKitConfig) -> Result<Self, MediaError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("selectx-admin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MediaError::Transport(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Fetch signed upload-authorization parameters from the configured
    /// backend endpoint.
    pub async fn upload_auth(&self) -> Result<UploadAuthParams, MediaError> {
        let endpoint = self
            .config
            .auth_endpoint
            .as_deref()
            .ok_or(MediaError::MissingConfig("IMAGEKIT_AUTH_ENDPOINT"))?;

        let mut request = self.http.get(endpoint);
        if let Some(bearer) = &self.config.auth_bearer {
            request = request.bearer_auth(bearer);
        }

        let res = request.send().await.map_err(map_reqwest_error)?;
        match res.status() {
            s if s.is_success() => res
                .json::<UploadAuthParams>()
                .await
                .map_err(|e| MediaError::Serde(e.to_string())),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(MediaError::Http { status, body })
            }
        }
    }

    /// Upload one image into the target folder and return its public URL.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<String, MediaError> {
        let public_key = self
            .config
            .public_key
            .clone()
            .ok_or(MediaError::MissingConfig("IMAGEKIT_PUBLIC_KEY"))?;

        let auth = self.upload_auth().await?;

        let form = multipart::Form::new()
            .text("publicKey", public_key)
            .text("signature", auth.signature)
            .text("expire", auth.expire.to_string())
            .text("token", auth.token)
            .text("fileName", file_name.to_string())
            .text("folder", folder.to_string())
            .text("useUniqueFileName", "true")
            .text("file", BASE64.encode(data));

        let res = self
            .http
            .post(UPLOAD_URL)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => {
                let parsed = res
                    .json::<UploadResponse>()
                    .await
                    .map_err(|e| MediaError::Serde(e.to_string()))?;
                Ok(parsed.url)
            }
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(MediaError::Http { status, body })
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> MediaError {
    if e.is_timeout() {
        MediaError::Timeout
    } else {
        MediaError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_auth_endpoint_fails_before_any_network_call() {
        let media = MediaService::new(ImageKitConfig::default()).unwrap();
        let err = media.upload_auth().await.expect_err("must fail");
        assert!(matches!(
            err,
            MediaError::MissingConfig("IMAGEKIT_AUTH_ENDPOINT")
        ));
    }

    #[tokio::test]
    async fn missing_public_key_fails_before_fetching_auth_params() {
        let media = MediaService::new(ImageKitConfig {
            public_key: None,
            auth_endpoint: Some("http://localhost:9/auth".to_string()),
            auth_bearer: None,
        })
        .unwrap();

        let err = media
            .upload(vec![0u8; 16], "photo.jpg", "/properties")
            .await
            .expect_err("must fail");
        assert!(matches!(err, MediaError::MissingConfig("IMAGEKIT_PUBLIC_KEY")));
    }
}
