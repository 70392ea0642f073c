//! Cloudinary image host client
//!
//! Signed REST calls over `reqwest`:
//!
//! - upload:  POST {api_base}/v1_1/{cloud}/image/upload  (multipart)
//! - destroy: POST {api_base}/v1_1/{cloud}/image/destroy (form)
//!
//! Signature = sha256("k1=v1&k2=v2..." + api_secret), params sorted by name,
//! `file` and `api_key` excluded.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{ALLOWED_FORMATS, ImageUpload, MediaStore, StoredImage};
use crate::core::MediaConfig;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    config: MediaConfig,
    http: reqwest::Client,
}

struct Credentials<'a> {
    cloud_name: &'a str,
    api_key: &'a str,
    api_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Compute the request signature for `params`
pub(crate) fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    hex::encode(Sha256::digest(format!("{joined}{api_secret}").as_bytes()))
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> AppResult<Credentials<'_>> {
        match (
            self.config.cloud_name.as_deref(),
            self.config.api_key.as_deref(),
            self.config.api_secret.as_deref(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => Err(AppError::new(ErrorCode::MediaNotConfigured)),
        }
    }

    fn endpoint(&self, cloud_name: &str, action: &str) -> String {
        format!(
            "{}/v1_1/{cloud_name}/image/{action}",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Provider error text from a non-success response
    async fn error_text(resp: reqwest::Response) -> String {
        let status = resp.status();
        match resp.json::<ErrorResponse>().await {
            Ok(body) => format!("{status}: {}", body.error.message),
            Err(_) => status.to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload(&self, image: ImageUpload) -> AppResult<StoredImage> {
        let creds = self.credentials()?;
        let upload_failed = |e: String| AppError::new(ErrorCode::MediaUploadFailed).with_source(e);

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let params = [
            ("allowed_formats", ALLOWED_FORMATS.join(",")),
            ("folder", self.config.folder.clone()),
            ("timestamp", timestamp),
        ];
        let signature = sign_params(&params, creds.api_secret);

        let content_type = image.effective_content_type();
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&content_type)
            .map_err(|e| upload_failed(e.to_string()))?;

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", creds.api_key.to_string())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }

        let resp = self
            .http
            .post(self.endpoint(creds.cloud_name, "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_failed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(upload_failed(Self::error_text(resp).await));
        }

        let body: UploadResponse = resp.json().await.map_err(|e| upload_failed(e.to_string()))?;
        let url = body
            .secure_url
            .or(body.url)
            .ok_or_else(|| upload_failed("response carried no url".into()))?;

        tracing::info!(public_id = %body.public_id, "Image uploaded");
        Ok(StoredImage {
            public_id: body.public_id,
            url,
        })
    }

    async fn destroy(&self, public_id: &str) -> AppResult<()> {
        let creds = self.credentials()?;
        let delete_failed = |e: String| AppError::new(ErrorCode::MediaDeleteFailed).with_source(e);

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let params = [("public_id", public_id.to_string()), ("timestamp", timestamp)];
        let signature = sign_params(&params, creds.api_secret);

        let mut form: Vec<(&str, String)> = params.to_vec();
        form.push(("api_key", creds.api_key.to_string()));
        form.push(("signature", signature));

        let resp = self
            .http
            .post(self.endpoint(creds.cloud_name, "destroy"))
            .form(&form)
            .send()
            .await
            .map_err(|e| delete_failed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(delete_failed(Self::error_text(resp).await));
        }

        let body: DestroyResponse = resp.json().await.map_err(|e| delete_failed(e.to_string()))?;
        match body.result.as_str() {
            "ok" => {
                tracing::info!(public_id = %public_id, "Image deleted");
                Ok(())
            }
            "not found" => {
                tracing::debug!(public_id = %public_id, "Image already gone");
                Ok(())
            }
            other => Err(delete_failed(format!("unexpected result: {other}"))),
        }
    }
}
