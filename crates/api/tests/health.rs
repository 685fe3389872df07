mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, uploads.path()).await;
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_ready"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_reports_missing_upload_dir_as_degraded(pool: PgPool) {
    let root = tempfile::tempdir().unwrap();
    let uploads = root.path().join("uploads");
    let app = common::build_test_app(pool, &uploads).await;
    std::fs::remove_dir(&uploads).unwrap();

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["uploads_ready"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_upload_returns_404(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, uploads.path()).await;
    let response = get(app, "/uploads/does-not-exist.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
