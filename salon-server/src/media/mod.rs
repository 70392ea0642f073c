//! Media Module - 商品图片托管
//!
//! Handlers only see [`MediaStore`]; [`CloudinaryClient`] is the production
//! implementation. Uploaded images are validated here before any network call.

mod cloudinary;

pub use cloudinary::CloudinaryClient;

use async_trait::async_trait;
use std::path::Path;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Maximum image size (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted image formats (extension and MIME subtype)
pub const ALLOWED_FORMATS: &[&str] = &["jpeg", "jpg", "png", "gif"];

/// 图床抽象 - 上传 / 删除
#[async_trait]
pub trait MediaStore: Send + Sync + std::fmt::Debug {
    /// Upload a validated image, returning where it lives
    async fn upload(&self, image: ImageUpload) -> AppResult<StoredImage>;

    /// Delete an image by provider object id; an already missing object is success
    async fn destroy(&self, public_id: &str) -> AppResult<()>;
}

/// Image received from a multipart form
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Image stored at the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Provider object id, needed for deletion
    pub public_id: String,
    /// Public URL
    pub url: String,
}

impl ImageUpload {
    /// Lower-cased file extension, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Declared content type without parameters, or one guessed from the file name
    pub fn effective_content_type(&self) -> String {
        match self.content_type.as_deref().map(str::trim).filter(|ct| !ct.is_empty()) {
            Some(ct) => match ct.parse::<mime_guess::Mime>() {
                Ok(mime) => mime.essence_str().to_ascii_lowercase(),
                Err(_) => ct
                    .split(';')
                    .next()
                    .unwrap_or(ct)
                    .trim()
                    .to_ascii_lowercase(),
            },
            None => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }

    /// Check size, extension and content type
    pub fn validate(&self) -> AppResult<()> {
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(file_too_large());
        }

        let ext_ok = self
            .extension()
            .is_some_and(|ext| ALLOWED_FORMATS.contains(&ext.as_str()));

        let content_type = self.effective_content_type();
        let mime_ok = content_type
            .strip_prefix("image/")
            .is_some_and(|sub| ALLOWED_FORMATS.contains(&sub));

        if !(ext_ok && mime_ok) {
            tracing::debug!(
                file_name = %self.file_name,
                content_type = %content_type,
                "Rejected upload"
            );
            return Err(AppError::new(ErrorCode::InvalidFile));
        }
        Ok(())
    }
}

/// Error for an image over [`MAX_IMAGE_BYTES`]
pub fn file_too_large() -> AppError {
    AppError::with_message(
        ErrorCode::FileTooLarge,
        format!("File too large (max {} MB)", MAX_IMAGE_BYTES / 1024 / 1024),
    )
}

/// Derive a provider object id from a hosted URL
///
/// `https://res.cloudinary.com/demo/image/upload/v1/product-images/abc.jpg`
/// with folder `product-images` gives `product-images/abc`. Only used for
/// records that were stored without a `public_id`.
pub fn public_id_from_url(url: &str, folder: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last = path.trim_end_matches('/').rsplit('/').next()?;
    let stem = match last.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => last,
    };
    if stem.is_empty() || stem.contains(':') {
        return None;
    }
    if folder.is_empty() {
        Some(stem.to_string())
    } else {
        Some(format!("{}/{stem}", folder.trim_end_matches('/')))
    }
}
