#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use rookery_api::config::ServerConfig;
use rookery_api::router::build_app_router;
use rookery_api::state::AppState;
use rookery_api::uploads::UploadStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and storing photos in `upload_dir`.
pub async fn build_test_app(pool: PgPool, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);
    let uploads = UploadStore::open(upload_dir).await.unwrap();

    let state = AppState {
        pool,
        uploads: Arc::new(uploads),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    send_multipart(app, Method::POST, uri, body).await
}

pub async fn put_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    send_multipart(app, Method::PUT, uri, body).await
}

async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    body: MultipartBody,
) -> Response<Body> {
    let (content_type, bytes) = body.finish();
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(bytes))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "rookery-test-boundary";

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.buf,
        )
    }
}

/// A complete, valid observation form without a photo.
pub fn observation_form(location: &str, adults: &str, chicks: &str) -> MultipartBody {
    MultipartBody::new()
        .text("location", location)
        .text("species", "Gentoo Penguin")
        .text("adult_count", adults)
        .text("chick_count", chicks)
        .text("notes", "Counted from the landing site")
}

/// Encode a blank PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image::RgbImage::new(width, height)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Number of files currently in the upload directory.
pub fn stored_file_count(upload_dir: &Path) -> usize {
    std::fs::read_dir(upload_dir).unwrap().count()
}
