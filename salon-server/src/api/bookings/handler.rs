//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::MessageResponse;
use shared::models::{Booking, BookingCreate, BookingUpdate, DEFAULT_BOOKING_STATUS};

use crate::api::extract::JsonOrForm;
use crate::core::ServerState;
use crate::db::models as db;
use crate::db::repository::{BookingRepository, parse_key};
use crate::db::repository::booking::BOOKING_TABLE;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, merge_optional_text,
    merge_required_text, optional_text, require_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn booking_not_found() -> AppError {
    AppError::new(ErrorCode::BookingNotFound)
}

/// Pure record key from the path, or a not-found style error for malformed ids
fn booking_key(id: &str) -> AppResult<&str> {
    parse_key(BOOKING_TABLE, id).ok_or_else(|| AppError::invalid_id(BOOKING_TABLE, id))
}

// =============================================================================
// Booking Handlers
// =============================================================================

/// GET /api/bookings - 获取所有预约 (最新在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Booking>>> {
    let repo = BookingRepository::new(state.get_db());
    let bookings = repo.find_all().await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// GET /api/bookings/:id - 获取单个预约
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Booking>> {
    let key = booking_key(&id)?;
    let repo = BookingRepository::new(state.get_db());
    let booking = repo.find_by_id(key).await?.ok_or_else(booking_not_found)?;
    Ok(Json(booking.into()))
}

/// POST /api/bookings - 创建预约 (JSON 或表单)
pub async fn create(
    State(state): State<ServerState>,
    JsonOrForm(payload): JsonOrForm<BookingCreate>,
) -> AppResult<(StatusCode, Json<Booking>)> {

    let record = db::Booking {
        id: None,
        client_name: require_text(payload.client_name, "clientName", MAX_NAME_LEN)?,
        client_phone: require_text(payload.client_phone, "clientPhone", MAX_SHORT_TEXT_LEN)?,
        client_email: optional_text(payload.client_email, "clientEmail", MAX_EMAIL_LEN)?,
        service_id: require_text(payload.service_id, "serviceId", MAX_SHORT_TEXT_LEN)?,
        service_name: require_text(payload.service_name, "serviceName", MAX_NAME_LEN)?,
        stylist_id: require_text(payload.stylist_id, "stylistId", MAX_SHORT_TEXT_LEN)?,
        stylist_name: require_text(payload.stylist_name, "stylistName", MAX_NAME_LEN)?,
        date: require_text(payload.date, "date", MAX_SHORT_TEXT_LEN)?,
        time: require_text(payload.time, "time", MAX_SHORT_TEXT_LEN)?,
        notes: optional_text(payload.notes, "notes", MAX_NOTE_LEN)?,
        status: optional_text(payload.status, "status", MAX_SHORT_TEXT_LEN)?
            .unwrap_or_else(|| DEFAULT_BOOKING_STATUS.to_string()),
        created_at: now_millis(),
        updated_at: None,
        version: 1,
    };

    let repo = BookingRepository::new(state.get_db());
    let booking = repo.create(record).await?;

    tracing::info!(booking_id = ?booking.id, "Booking created");
    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// PUT /api/bookings/:id - 更新预约 (缺省字段保持原值)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonOrForm(payload): JsonOrForm<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    let key = booking_key(&id)?;

    let repo = BookingRepository::new(state.get_db());
    let current = repo.find_by_id(key).await?.ok_or_else(booking_not_found)?;

    let expected_version = current.version;
    if let Some(version) = payload.version
        && version != expected_version
    {
        return Err(AppError::conflict(format!(
            "Booking was modified (version {expected_version}, request has {version})"
        )));
    }

    let record = db::Booking {
        id: None,
        client_name: merge_required_text(current.client_name, payload.client_name, "clientName", MAX_NAME_LEN)?,
        client_phone: merge_required_text(current.client_phone, payload.client_phone, "clientPhone", MAX_SHORT_TEXT_LEN)?,
        client_email: merge_optional_text(current.client_email, payload.client_email, "clientEmail", MAX_EMAIL_LEN)?,
        service_id: merge_required_text(current.service_id, payload.service_id, "serviceId", MAX_SHORT_TEXT_LEN)?,
        service_name: merge_required_text(current.service_name, payload.service_name, "serviceName", MAX_NAME_LEN)?,
        stylist_id: merge_required_text(current.stylist_id, payload.stylist_id, "stylistId", MAX_SHORT_TEXT_LEN)?,
        stylist_name: merge_required_text(current.stylist_name, payload.stylist_name, "stylistName", MAX_NAME_LEN)?,
        date: merge_required_text(current.date, payload.date, "date", MAX_SHORT_TEXT_LEN)?,
        time: merge_required_text(current.time, payload.time, "time", MAX_SHORT_TEXT_LEN)?,
        notes: merge_optional_text(current.notes, payload.notes, "notes", MAX_NOTE_LEN)?,
        status: merge_required_text(current.status, payload.status, "status", MAX_SHORT_TEXT_LEN)?,
        created_at: current.created_at,
        updated_at: Some(now_millis()),
        version: expected_version + 1,
    };

    let booking = repo.save(key, record, expected_version).await?;

    tracing::info!(booking_id = %key, version = booking.version, "Booking updated");
    Ok(Json(booking.into()))
}

/// DELETE /api/bookings/:id - 删除预约
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let key = booking_key(&id)?;
    let repo = BookingRepository::new(state.get_db());
    repo.delete(key).await?.ok_or_else(booking_not_found)?;

    tracing::info!(booking_id = %key, "Booking deleted");
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}
