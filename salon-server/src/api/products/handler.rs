//! Product API Handlers
//!
//! Image-bearing writes touch two stores with no shared transaction:
//!
//! - create: upload → insert (insert fails → delete the new image)
//! - update: upload → conditional save → delete the old image
//!   (save fails → delete the new image instead)
//! - delete: remove record → delete its image
//!
//! Image deletions are best-effort and only logged.
//!
//! The old image is removed only after the new record is saved, and a
//! deleted product loses its record before its image. A failure between the
//! two steps leaves an orphaned image at the provider rather than a record
//! pointing at a missing one.

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::StatusCode,
};
use shared::MessageResponse;
use shared::models::Product;

use super::form::ProductForm;
use crate::core::ServerState;
use crate::db::models as db;
use crate::db::repository::product::PRODUCT_TABLE;
use crate::db::repository::{ProductRepository, parse_key};
use crate::media::{StoredImage, public_id_from_url};
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult, ErrorCode};

fn product_not_found() -> AppError {
    AppError::new(ErrorCode::ProductNotFound)
}

/// Multipart extraction failures use the common error body
fn multipart_payload(multipart: Result<Multipart, MultipartRejection>) -> AppResult<Multipart> {
    multipart.map_err(|rejection| AppError::invalid_request(rejection.body_text()))
}

fn product_key(id: &str) -> AppResult<&str> {
    parse_key(PRODUCT_TABLE, id).ok_or_else(|| AppError::invalid_id(PRODUCT_TABLE, id))
}

/// Provider object id of a stored product image
///
/// Records written before `public_id` was stored fall back to the URL.
fn stored_public_id(state: &ServerState, product: &db::Product) -> Option<String> {
    product.public_id.clone().or_else(|| {
        product
            .image_url
            .as_deref()
            .and_then(|url| public_id_from_url(url, &state.config.media.folder))
    })
}

/// Best-effort image deletion; failures are logged, never returned
async fn discard_image(state: &ServerState, public_id: &str, reason: &str) {
    if let Err(e) = state.media.destroy(public_id).await {
        tracing::warn!(
            public_id = %public_id,
            reason = %reason,
            error = %e,
            source = ?e.source_text,
            "Failed to delete image from media provider"
        );
    }
}

// =============================================================================
// Product Handlers
// =============================================================================

/// GET /api/products - 获取所有商品 (最新在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_all().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/category/:category - 按分类获取商品 (精确匹配)
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_by_category(&category).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let key = product_key(&id)?;
    let repo = ProductRepository::new(state.get_db());
    let product = repo.find_by_id(key).await?.ok_or_else(product_not_found)?;
    Ok(Json(product.into()))
}

/// POST /api/products - 创建商品 (multipart，可选图片)
pub async fn create(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let multipart = multipart_payload(multipart)?;
    let (payload, image) = ProductForm::read(multipart).await?.into_create()?;

    let stored: Option<StoredImage> = match image {
        Some(image) => Some(state.media.upload(image).await?),
        None => None,
    };

    let record = db::Product {
        id: None,
        name: payload.name,
        price: payload.price,
        category: payload.category,
        description: payload.description,
        image_url: stored.as_ref().map(|s| s.url.clone()),
        public_id: stored.as_ref().map(|s| s.public_id.clone()),
        stock: payload.stock.unwrap_or(0),
        in_stock: payload.in_stock.unwrap_or(true),
        created_at: now_millis(),
        updated_at: None,
        version: 1,
    };

    let repo = ProductRepository::new(state.get_db());
    let product = match repo.create(record).await {
        Ok(product) => product,
        Err(e) => {
            if let Some(stored) = &stored {
                discard_image(&state, &stored.public_id, "product insert failed").await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(product_id = ?product.id, has_image = stored.is_some(), "Product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/products/:id - 更新商品 (multipart，缺省/空字段保持原值)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<Product>> {
    let key = product_key(&id)?;
    let multipart = multipart_payload(multipart)?;
    let repo = ProductRepository::new(state.get_db());
    let current = repo.find_by_id(key).await?.ok_or_else(product_not_found)?;

    let (payload, image) = ProductForm::read(multipart).await?.into_update()?;

    let expected_version = current.version;
    if let Some(version) = payload.version
        && version != expected_version
    {
        return Err(AppError::conflict(format!(
            "Product was modified (version {expected_version}, request has {version})"
        )));
    }

    let stored: Option<StoredImage> = match image {
        Some(image) => Some(state.media.upload(image).await?),
        None => None,
    };
    let replaced_public_id = stored
        .as_ref()
        .and_then(|_| stored_public_id(&state, &current));

    let (image_url, public_id) = match &stored {
        Some(s) => (Some(s.url.clone()), Some(s.public_id.clone())),
        None => (current.image_url, current.public_id),
    };

    let record = db::Product {
        id: None,
        name: payload.name.unwrap_or(current.name),
        price: payload.price.unwrap_or(current.price),
        category: payload.category.unwrap_or(current.category),
        description: payload.description.or(current.description),
        image_url,
        public_id,
        stock: payload.stock.unwrap_or(current.stock),
        in_stock: payload.in_stock.unwrap_or(current.in_stock),
        created_at: current.created_at,
        updated_at: Some(now_millis()),
        version: expected_version + 1,
    };

    let product = match repo.save(key, record, expected_version).await {
        Ok(product) => product,
        Err(e) => {
            if let Some(stored) = &stored {
                discard_image(&state, &stored.public_id, "product save failed").await;
            }
            return Err(e.into());
        }
    };

    if let (Some(old), Some(new)) = (&replaced_public_id, &stored)
        && *old != new.public_id
    {
        discard_image(&state, old, "image replaced").await;
    }

    tracing::info!(product_id = %key, version = product.version, "Product updated");
    Ok(Json(product.into()))
}

/// DELETE /api/products/:id - 删除商品及其图片
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let key = product_key(&id)?;
    let repo = ProductRepository::new(state.get_db());
    let product = repo.delete(key).await?.ok_or_else(product_not_found)?;

    if let Some(public_id) = stored_public_id(&state, &product) {
        discard_image(&state, &public_id, "product deleted").await;
    }

    tracing::info!(product_id = %key, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
