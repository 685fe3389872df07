//! HTTP-level integration tests for the dashboard aggregates.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, observation_form, png_bytes, post_multipart, MultipartBody};
use sqlx::PgPool;

async fn submit(pool: &PgPool, dir: &std::path::Path, body: MultipartBody) {
    let app = common::build_test_app(pool.clone(), dir).await;
    let response = post_multipart(app, "/api/observations", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_on_empty_database(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, uploads.path()).await;
    let response = get(app, "/api/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "total_adults": 0,
            "total_chicks": 0,
            "location_count": 0,
            "random_image": null,
        })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_totals_and_random_image(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    submit(&pool, uploads.path(), observation_form("Port Lockroy", "5", "2")).await;
    submit(
        &pool,
        uploads.path(),
        observation_form("Neko Harbor", "3", "1").file("image", "n.png", "image/png", &png_bytes(3, 3)),
    )
    .await;

    let app = common::build_test_app(pool, uploads.path()).await;
    let json = body_json(get(app, "/api/stats").await).await;
    assert_eq!(json["total_adults"], 8);
    assert_eq!(json["total_chicks"], 3);
    assert_eq!(json["location_count"], 2);

    let image = json["random_image"].as_str().unwrap();
    assert!(image.starts_with("/uploads/"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_metrics_port_lockroy_scenario(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    submit(&pool, uploads.path(), observation_form("Port Lockroy", "5", "2")).await;
    submit(&pool, uploads.path(), observation_form("Port Lockroy", "3", "1")).await;

    let app = common::build_test_app(pool, uploads.path()).await;
    let response = get(app, "/api/location-metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["location"], "Port Lockroy");
    assert_eq!(rows[0]["total_adults"], 8);
    assert_eq!(rows[0]["total_chicks"], 3);
    assert_eq!(rows[0]["total_population"], 11);
    assert_eq!(rows[0]["observation_count"], 2);
    assert_eq!(rows[0]["growth_rate"], 5.5);
    assert!(rows[0]["latest_observation"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_metrics_ordered_by_population(pool: PgPool) {
    let uploads = tempfile::tempdir().unwrap();
    submit(&pool, uploads.path(), observation_form("Brown Bluff", "1", "0")).await;
    submit(&pool, uploads.path(), observation_form("Elephant Island", "40", "10")).await;

    let app = common::build_test_app(pool, uploads.path()).await;
    let json = body_json(get(app, "/api/location-metrics").await).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows[0]["location"], "Elephant Island");
    assert_eq!(rows[1]["location"], "Brown Bluff");
}
