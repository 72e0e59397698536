use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes;
use server::state::ServerState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over a fresh, migrated in-memory store.
async fn build_app() -> anyhow::Result<Router> {
    let db = connect_with_config(&DatabaseConfig::sqlite_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(ServerState::from_db(db), cors()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<Response> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(app.clone().oneshot(req).await?)
}

async fn json_body(resp: Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn create(app: &Router, payload: Value) -> anyhow::Result<Value> {
    let resp = send(app, Method::POST, "/time-entries", Some(payload)).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

#[tokio::test]
async fn get_all_returns_empty_list_when_no_entries() -> anyhow::Result<()> {
    let app = build_app().await?;
    let resp = send(&app, Method::GET, "/time-entries", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn post_creates_entry_and_returns_201() -> anyhow::Result<()> {
    let app = build_app().await?;
    let payload = json!({"date": "2026-02-01", "quantity": 8.0, "multiplier": 1.0, "notes": "Normal day"});
    let resp = send(&app, Method::POST, "/time-entries", Some(payload)).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let location = resp.headers().get(header::LOCATION).cloned();
    let entry = json_body(resp).await?;
    let id = entry["id"].as_i64().expect("numeric id");
    assert!(id > 0);
    assert_eq!(location.as_ref().and_then(|v| v.to_str().ok()), Some(format!("/time-entries/{id}").as_str()));
    assert_eq!(entry["date"], "2026-02-01");
    assert_eq!(entry["quantity"], 8.0);
    assert_eq!(entry["multiplier"], 1.0);
    assert_eq!(entry["notes"], "Normal day");
    Ok(())
}

#[tokio::test]
async fn created_ids_are_unique() -> anyhow::Result<()> {
    let app = build_app().await?;
    let a = create(&app, json!({"date": "2026-02-01", "quantity": 1, "multiplier": 1})).await?;
    let b = create(&app, json!({"date": "2026-02-01", "quantity": 1, "multiplier": 1})).await?;
    assert_ne!(a["id"], b["id"]);
    Ok(())
}

#[tokio::test]
async fn get_by_id_round_trips_created_entry() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-02", "quantity": 4.0, "multiplier": 1.5, "notes": "Overtime"})).await?;

    let resp = send(&app, Method::GET, &format!("/time-entries/{}", entry["id"]), None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await?;
    assert_eq!(fetched, entry);
    assert_eq!(fetched["multiplier"], 1.5);
    Ok(())
}

#[tokio::test]
async fn get_by_id_returns_404_when_missing() -> anyhow::Result<()> {
    let app = build_app().await?;
    let resp = send(&app, Method::GET, "/time-entries/999999", None).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn put_replaces_fields_and_keeps_id() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-03", "quantity": 6.0, "multiplier": 1.0, "notes": "Original"})).await?;
    let other = create(&app, json!({"date": "2026-02-03", "quantity": 3.0, "multiplier": 1.0, "notes": "Untouched"})).await?;
    let uri = format!("/time-entries/{}", entry["id"]);

    let updated = json!({"date": "2026-02-03", "quantity": 7.5, "multiplier": 1.5, "notes": "Updated"});
    let resp = send(&app, Method::PUT, &uri, Some(updated)).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let result = json_body(resp).await?;
    assert_eq!(result["id"], entry["id"]);
    assert_eq!(result["quantity"], 7.5);
    assert_eq!(result["multiplier"], 1.5);
    assert_eq!(result["notes"], "Updated");

    let resp = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(json_body(resp).await?, result);
    let resp = send(&app, Method::GET, &format!("/time-entries/{}", other["id"]), None).await?;
    assert_eq!(json_body(resp).await?, other);
    Ok(())
}

#[tokio::test]
async fn put_is_full_replacement() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-03", "quantity": 6.0, "multiplier": 2.0, "notes": "Original"})).await?;

    let resp = send(
        &app,
        Method::PUT,
        &format!("/time-entries/{}", entry["id"]),
        Some(json!({"date": "2026-02-04", "quantity": 5})),
    )
    .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let result = json_body(resp).await?;
    assert_eq!(result["date"], "2026-02-04");
    assert_eq!(result["multiplier"], 1.0);
    assert_eq!(result["notes"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn put_returns_404_when_missing() -> anyhow::Result<()> {
    let app = build_app().await?;
    let body = json!({"date": "2026-02-03", "quantity": 7.5, "multiplier": 1.5, "notes": "Updated"});
    let resp = send(&app, Method::PUT, "/time-entries/999999", Some(body)).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_removes_entry_and_returns_204() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-04", "quantity": 2.0, "multiplier": 1.0, "notes": null})).await?;
    let uri = format!("/time-entries/{}", entry["id"]);

    let resp = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(to_bytes(resp.into_body(), usize::MAX).await?.is_empty());

    let resp = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn second_delete_returns_404() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-04", "quantity": 2.0})).await?;
    let uri = format!("/time-entries/{}", entry["id"]);

    assert_eq!(send(&app, Method::DELETE, &uri, None).await?.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, Method::DELETE, &uri, None).await?.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, Method::DELETE, "/time-entries/999999", None).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn list_is_date_descending() -> anyhow::Result<()> {
    let app = build_app().await?;
    for date in ["2026-02-01", "2026-03-15", "2026-01-20"] {
        create(&app, json!({"date": date, "quantity": 1})).await?;
    }
    let resp = send(&app, Method::GET, "/time-entries", None).await?;
    let dates: Vec<Value> = json_body(resp).await?
        .as_array()
        .expect("array body")
        .iter()
        .map(|e| e["date"].clone())
        .collect();
    assert_eq!(dates, vec![json!("2026-03-15"), json!("2026-02-01"), json!("2026-01-20")]);
    Ok(())
}

#[tokio::test]
async fn omitted_multiplier_defaults_to_one() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-01", "quantity": 8})).await?;
    assert_eq!(entry["multiplier"], 1.0);
    assert_eq!(entry["notes"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn negative_quantity_is_accepted() -> anyhow::Result<()> {
    let app = build_app().await?;
    let entry = create(&app, json!({"date": "2026-02-01", "quantity": -2.5, "multiplier": 0.5})).await?;
    assert_eq!(entry["quantity"], -2.5);
    assert_eq!(entry["multiplier"], 0.5);
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_return_400() -> anyhow::Result<()> {
    let app = build_app().await?;
    for body in [
        json!({"quantity": 8}),
        json!({"date": "not-a-date", "quantity": 8}),
        json!({"date": "2026-02-01", "quantity": "eight"}),
        json!([1, 2, 3]),
    ] {
        let resp = send(&app, Method::POST, "/time-entries", Some(body.clone())).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(json_body(resp).await?["error"], "Bad Request");
    }

    let req = Request::builder()
        .method(Method::POST)
        .uri("/time-entries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"date\": "))?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/time-entries")
        .body(Body::from("date=2026-02-01"))?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, Method::GET, "/time-entries", None).await?;
    assert_eq!(json_body(resp).await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_returns_400() -> anyhow::Result<()> {
    let app = build_app().await?;
    let resp = send(&app, Method::GET, "/time-entries/abc", None).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn diagnostics_routes() -> anyhow::Result<()> {
    let app = build_app().await?;

    let resp = send(&app, Method::GET, "/", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&to_bytes(resp.into_body(), usize::MAX).await?[..], b"Hello World!");

    let resp = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(json_body(resp).await?, json!({"status": "ok"}));

    let resp = send(&app, Method::GET, "/db-test", None).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await?, json!("Connected to the database successfully!"));
    Ok(())
}
