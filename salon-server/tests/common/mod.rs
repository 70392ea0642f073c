//! Shared helpers for the API integration tests
//!
//! Each test gets its own `mem://` database and an in-memory media store,
//! and drives the full router through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::Value;
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tower::ServiceExt;

use salon_server::core::{Config, DatabaseConfig};
use salon_server::db::DbService;
use salon_server::db::repository::ProductRepository;
use salon_server::{AppError, AppResult, ErrorCode, ImageUpload, MediaStore, ServerState, StoredImage, build_app};

/// In-memory stand-in for the image host
#[derive(Default)]
pub struct FakeMedia {
    uploaded: Mutex<Vec<StoredImage>>,
    destroyed: Mutex<Vec<String>>,
    counter: AtomicUsize,
    fail_uploads: AtomicBool,
    fail_destroys: AtomicBool,
    /// Product to save once more while the next upload is in flight
    touch_on_upload: Mutex<Option<(Surreal<Any>, String)>>,
}

impl std::fmt::Debug for FakeMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeMedia")
            .field("uploaded", &self.uploaded)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl FakeMedia {
    pub fn uploaded(&self) -> Vec<StoredImage> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_destroys(&self, fail: bool) {
        self.fail_destroys.store(fail, Ordering::SeqCst);
    }

    /// During the next upload, save product `key` again so its version moves
    /// on between the handler's read and its write
    pub fn touch_product_on_upload(&self, db: Surreal<Any>, key: &str) {
        *self.touch_on_upload.lock().unwrap() = Some((db, key.to_string()));
    }
}

/// A concurrent writer: re-save the product, bumping its version
async fn touch_product(db: Surreal<Any>, key: &str) {
    let repo = ProductRepository::new(db);
    let mut product = repo.find_by_id(key).await.unwrap().expect("product to touch");
    let version = product.version;
    product.id = None;
    product.version = version + 1;
    repo.save(key, product, version).await.unwrap();
}

#[async_trait]
impl MediaStore for FakeMedia {
    async fn upload(&self, image: ImageUpload) -> AppResult<StoredImage> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::MediaUploadFailed).with_source("provider unavailable"));
        }
        let touch = self.touch_on_upload.lock().unwrap().take();
        if let Some((db, key)) = touch {
            touch_product(db, &key).await;
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let ext = image.extension().unwrap_or_else(|| "bin".into());
        let stored = StoredImage {
            public_id: format!("product-images/img{n}"),
            url: format!("https://media.test/image/upload/v1/product-images/img{n}.{ext}"),
        };
        self.uploaded.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn destroy(&self, public_id: &str) -> AppResult<()> {
        if self.fail_destroys.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::MediaDeleteFailed).with_source("provider unavailable"));
        }
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub media: Arc<FakeMedia>,
    pub db: Surreal<Any>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = DbService::connect(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database")
            .db;
        let media = Arc::new(FakeMedia::default());
        let state = ServerState::new(config, db.clone(), media.clone());
        Self {
            router: build_app(state),
            media,
            db,
        }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty or not JSON)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::DELETE, uri)).await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(method, uri, &body)).await
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// `application/x-www-form-urlencoded` request; `body` must already be encoded
pub fn form_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "----salon-test-boundary";

/// multipart/form-data body builder
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: Method, uri: &str) -> Request<Body> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.bytes))
            .unwrap()
    }
}

/// A few bytes standing in for a PNG; only name and content type are checked
pub fn png_bytes() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\n fake image".to_vec()
}

/// Sample product form with the required fields
pub fn product_form(name: &str, category: &str) -> MultipartBody {
    MultipartBody::new()
        .text("name", name)
        .text("price", "24.50")
        .text("category", category)
}
