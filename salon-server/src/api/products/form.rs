//! Multipart form parsing for product create / update
//!
//! Text fields: `name`, `description`, `price`, `category`, `stock`, `inStock`,
//! `version`. File field: `image`. Unknown fields are ignored.

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use shared::models::{ProductCreate, ProductUpdate};

use crate::media::{ImageUpload, MAX_IMAGE_BYTES, file_too_large};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, optional_text, require_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Raw form values, before type conversion
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub stock: Option<String>,
    pub in_stock: Option<String>,
    pub version: Option<String>,
    pub image: Option<ImageUpload>,
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::invalid_request(format!("Multipart error: {e}"))
}

impl ProductForm {
    /// Read every field of the request
    ///
    /// The image is read chunk by chunk and rejected as soon as it passes
    /// [`MAX_IMAGE_BYTES`]; its type is checked once complete. A file field
    /// with no content counts as "no image".
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => form.image = read_image(field).await?,
                "name" => form.name = Some(field.text().await.map_err(multipart_error)?),
                "description" => form.description = Some(field.text().await.map_err(multipart_error)?),
                "price" => form.price = Some(field.text().await.map_err(multipart_error)?),
                "category" => form.category = Some(field.text().await.map_err(multipart_error)?),
                "stock" => form.stock = Some(field.text().await.map_err(multipart_error)?),
                "inStock" => form.in_stock = Some(field.text().await.map_err(multipart_error)?),
                "version" => form.version = Some(field.text().await.map_err(multipart_error)?),
                other => tracing::debug!(field = %other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    /// Convert for create: name, price, category are required
    pub fn into_create(self) -> AppResult<(ProductCreate, Option<ImageUpload>)> {
        let price = self.price.filter(|p| !p.trim().is_empty());
        let payload = ProductCreate {
            name: require_text(self.name, "name", MAX_NAME_LEN)?,
            price: parse_price(&price.ok_or_else(|| AppError::required("price"))?)?,
            category: require_text(self.category, "category", MAX_NAME_LEN)?,
            description: optional_text(self.description, "description", MAX_NOTE_LEN)?,
            stock: self.stock.as_deref().map(parse_stock).transpose()?,
            in_stock: non_empty(self.in_stock).as_deref().map(parse_bool).transpose()?,
        };
        Ok((payload, self.image))
    }

    /// Convert for update: empty text keeps the stored value, `stock` overwrites when present
    pub fn into_update(self) -> AppResult<(ProductUpdate, Option<ImageUpload>)> {
        let name = non_empty(self.name);
        if let Some(name) = &name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        let category = non_empty(self.category);
        if let Some(category) = &category {
            validate_required_text(category, "category", MAX_NAME_LEN)?;
        }

        let payload = ProductUpdate {
            name,
            price: non_empty(self.price).as_deref().map(parse_price).transpose()?,
            category,
            description: optional_text(self.description, "description", MAX_NOTE_LEN)?,
            stock: self.stock.as_deref().map(parse_stock).transpose()?,
            in_stock: non_empty(self.in_stock).as_deref().map(parse_bool).transpose()?,
            version: non_empty(self.version)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map_err(|_| AppError::validation("version must be a positive integer"))
                })
                .transpose()?,
        };
        Ok((payload, self.image))
    }
}

async fn read_image(mut field: Field<'_>) -> AppResult<Option<ImageUpload>> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(file_too_large());
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() && file_name.is_empty() {
        return Ok(None);
    }

    let image = ImageUpload {
        file_name,
        content_type,
        bytes,
    };
    image.validate()?;
    Ok(Some(image))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_price(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| AppError::new(ErrorCode::InvalidPrice))
}

/// Empty means 0
fn parse_stock(raw: &str) -> AppResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i64>()
        .map_err(|_| AppError::validation("stock must be an integer"))
}

fn parse_bool(raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(AppError::validation("inStock must be true or false")),
    }
}
