//! Request body extractors

use axum::extract::{FromRequest, Request};
use axum::{Form, Json};
use http::header;
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// Request body accepted as JSON or as `application/x-www-form-urlencoded`
///
/// The `Content-Type` header picks the decoder; anything that is not a form
/// goes through the JSON extractor. Rejections become validation errors so
/// every malformed body gets the common error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| {
            essence
                .trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::models::BookingUpdate;

    fn request(content_type: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_body_is_decoded() {
        let req = request(
            "application/x-www-form-urlencoded; charset=utf-8",
            "clientName=Ana+Lopez&version=3",
        );
        let JsonOrForm(update) = JsonOrForm::<BookingUpdate>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(update.client_name.as_deref(), Some("Ana Lopez"));
        assert_eq!(update.version, Some(3));
    }

    #[tokio::test]
    async fn test_json_body_is_decoded() {
        let req = request("application/json", r#"{"notes":"window seat"}"#);
        let JsonOrForm(update) = JsonOrForm::<BookingUpdate>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(update.notes.as_deref(), Some("window seat"));
    }

    #[tokio::test]
    async fn test_unsupported_content_type_is_validation_error() {
        let req = request("text/plain", "clientName=Ana");
        let err = JsonOrForm::<BookingUpdate>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
    }
}
