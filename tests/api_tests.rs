//! Integration tests for the MessMate API.
//!
//! Every test drives the real router over an in-memory SQLite database:
//! auth middleware, discovery filters/ranking, listing CRUD, reviews,
//! subscriptions, menus, inventory and announcements.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use messmate::build_router;
use messmate::database::schema;

/// Test helper: fresh in-memory database with the full schema. A single
/// connection is required because every pooled connection would otherwise get
/// its own private memory database.
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");
    schema::init_schema(&pool)
        .await
        .expect("Should create schema");
    pool
}

async fn setup_app() -> axum::Router {
    build_router(setup_test_db().await)
}

/// Test helper: unsigned JWT cookie for the given user. The auth layer only
/// decodes the payload's sub claim.
fn auth_cookie(user_id: &str) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{}"}}"#, user_id));
    format!("access_token={}.{}.sig", header, payload)
}

fn get_request(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, auth_cookie(user_id))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, user_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, auth_cookie(user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: create a listing through the API and return its id. `extra`
/// overrides or extends the default body fields.
async fn seed_listing(app: &axum::Router, owner: &str, name: &str, extra: Value) -> String {
    let mut body = json!({
        "name": name,
        "address": "12 MG Road, Bangalore",
        "price_monthly": 3000.0,
    });
    if let (Value::Object(base), Value::Object(more)) = (&mut body, extra) {
        for (k, v) in more {
            base.insert(k, v);
        }
    }

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/listings", owner, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = extract_json(response.into_body()).await;
    body["listing"]["listing_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health and authentication
// =============================================================================

#[tokio::test]
async fn health_needs_no_auth() {
    let app = setup_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "messmate");
    assert!(body["version"].is_string());
    assert!(body["build_id"].is_string());
}

#[tokio::test]
async fn api_rejects_missing_token() {
    let app = setup_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/discovery")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn api_rejects_garbled_token() {
    let app = setup_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/discovery")
        .header(header::COOKIE, "access_token=not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn create_and_fetch_listing() {
    let app = setup_app().await;
    let id = seed_listing(
        &app,
        "owner-1",
        "Sharma Mess",
        json!({ "description": "Home-style thalis", "is_vegetarian": true }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/listings/{}", id), "viewer-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["listing"]["name"], "Sharma Mess");
    assert_eq!(body["listing"]["price_monthly"], 3000.0);
    assert_eq!(body["listing"]["is_vegetarian"], true);
    // Unreviewed listings present the default rating with a zero count.
    assert_eq!(body["rating"]["count"], 0);
    assert_eq!(body["rating"]["average"], 4.5);
    assert_eq!(body["subscription_status"], Value::Null);
    assert_eq!(body["viewer_has_reviewed"], false);
}

#[tokio::test]
async fn create_listing_validates_input() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/listings",
            "owner-1",
            json!({ "name": "   ", "address": "MG Road", "price_monthly": 3000.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/listings",
            "owner-1",
            json!({ "name": "Mess", "address": "MG Road", "price_monthly": 0.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "price must be positive");
}

#[tokio::test]
async fn detail_of_unknown_listing_is_404() {
    let app = setup_app().await;

    let response = app
        .oneshot(get_request("/api/listings/nope", "viewer-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_is_owner_scoped_and_partial() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;

    // Someone else cannot tell the listing apart from a missing one.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/listings/{}", id),
            "intruder",
            json!({ "price_monthly": 1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner updates one field; the rest stays.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/listings/{}", id),
            "owner-1",
            json!({ "price_monthly": 3500.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["listing"]["price_monthly"], 3500.0);
    assert_eq!(body["listing"]["name"], "Sharma Mess");
}

// =============================================================================
// Discovery
// =============================================================================

#[tokio::test]
async fn discovery_on_empty_database() {
    let app = setup_app().await;

    let response = app
        .oneshot(get_request("/api/discovery", "viewer-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["listings"], json!([]));
    assert_eq!(body["filters"]["radius_km"], 25.0);
    assert_eq!(body["filters"]["min_rating"], 1.0);
}

#[tokio::test]
async fn discovery_ranks_by_distance_with_viewer() {
    let app = setup_app().await;
    // ~5 km and ~1 km north of the viewer.
    let far = seed_listing(
        &app,
        "owner-1",
        "Far Mess",
        json!({ "latitude": 13.0166, "longitude": 77.5946 }),
    )
    .await;
    let near = seed_listing(
        &app,
        "owner-1",
        "Near Mess",
        json!({ "latitude": 12.9806, "longitude": 77.5946 }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/discovery?lat=12.9716&lng=77.5946",
            "viewer-1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["listings"][0]["listing_id"], near.as_str());
    assert_eq!(body["listings"][1]["listing_id"], far.as_str());
    assert!(body["listings"][0]["distance_km"].as_f64().unwrap() < 2.0);
    assert_eq!(body["viewer"]["latitude"], 12.9716);
}

#[tokio::test]
async fn discovery_leaves_ungeocoded_listings_reachable_without_viewer() {
    let app = setup_app().await;
    // No coordinates supplied: the listing stays at the (0,0) sentinel.
    seed_listing(&app, "owner-1", "Unmapped Mess", json!({})).await;

    // Without a viewer position the distance filter is off.
    let response = app
        .clone()
        .oneshot(get_request("/api/discovery", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["distance_km"], Value::Null);

    // With one, the sentinel distance pushes it out of the default radius.
    let response = app
        .clone()
        .oneshot(get_request(
            "/api/discovery?lat=12.9716&lng=77.5946",
            "viewer-1",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn discovery_text_filter_matches_name_and_address() {
    let app = setup_app().await;
    seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    seed_listing(
        &app,
        "owner-1",
        "Gokul Tiffins",
        json!({ "address": "2 Brigade Road, Bangalore" }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request("/api/discovery?q=sharma", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["name"], "Sharma Mess");

    // Address text matches too.
    let response = app
        .clone()
        .oneshot(get_request("/api/discovery?q=brigade", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["name"], "Gokul Tiffins");
}

#[tokio::test]
async fn discovery_price_bounds_are_inclusive() {
    let app = setup_app().await;
    seed_listing(
        &app,
        "owner-1",
        "Budget Mess",
        json!({ "price_monthly": 2500.0 }),
    )
    .await;
    seed_listing(
        &app,
        "owner-1",
        "Premium Mess",
        json!({ "price_monthly": 6000.0 }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/discovery?price_min=2500&price_max=2500",
            "viewer-1",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["name"], "Budget Mess");
}

#[tokio::test]
async fn discovery_diet_filter() {
    let app = setup_app().await;
    seed_listing(
        &app,
        "owner-1",
        "Green Leaf",
        json!({ "is_vegetarian": true, "is_non_vegetarian": false }),
    )
    .await;
    seed_listing(
        &app,
        "owner-1",
        "Coastal Curries",
        json!({ "is_vegetarian": false, "is_non_vegetarian": true }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get_request("/api/discovery?veg=true", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["listings"][0]["name"], "Green Leaf");
}

#[tokio::test]
async fn discovery_min_rating_uses_default_for_unreviewed() {
    let app = setup_app().await;
    seed_listing(&app, "owner-1", "Fresh Mess", json!({})).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/discovery?min_rating=4.5", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 1);

    let response = app
        .clone()
        .oneshot(get_request("/api/discovery?min_rating=4.6", "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["count"], 0);
}

// =============================================================================
// Reviews
// =============================================================================

#[tokio::test]
async fn second_review_replaces_the_first() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/listings/{}/review", id),
            "eater-1",
            json!({ "rating": 5, "comment": "Great sambar" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "created");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/listings/{}/review", id),
            "eater-1",
            json!({ "rating": 3 }),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "updated");

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/listings/{}/reviews", id),
            "eater-1",
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["reviews"].as_array().unwrap().len(), 1);
    assert_eq!(body["reviews"][0]["rating"], 3);

    // The detail page reflects the replacement, not an accumulation.
    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/listings/{}", id), "eater-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["rating"]["count"], 1);
    assert_eq!(body["rating"]["average"], 3.0);
    assert_eq!(body["viewer_has_reviewed"], true);
}

#[tokio::test]
async fn review_ratings_average_with_half_up_rounding() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;

    for (user, rating) in [("a", 4), ("b", 3), ("c", 3)] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/listings/{}/review", id),
                user,
                json!({ "rating": rating }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/listings/{}", id), "viewer-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    // 10/3 rounds to 3.3 at one decimal.
    assert_eq!(body["rating"]["count"], 3);
    assert_eq!(body["rating"]["average"], 3.3);
}

#[tokio::test]
async fn review_validation() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/listings/{}/review", id),
            "eater-1",
            json!({ "rating": 6 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "rating must be between 1 and 5");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/listings/nope/review",
            "eater-1",
            json!({ "rating": 4 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Subscriptions
// =============================================================================

#[tokio::test]
async fn subscription_lifecycle() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/subscription", id);

    for (action, expected) in [
        ("subscribe", "subscribed"),
        ("subscribe", "already_subscribed"),
        ("cancel", "cancelled"),
        ("cancel", "not_subscribed"),
        ("subscribe", "resubscribed"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                "eater-1",
                json!({ "action": action }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "action {}", action);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["status"], expected, "action {}", action);
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/me/subscriptions", "eater-1"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let subs = body["subscriptions"].as_array().unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0]["listing_name"], "Sharma Mess");
    assert_eq!(subs[0]["status"], "active");
}

#[tokio::test]
async fn subscription_command_validation() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/subscription", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            "eater-1",
            json!({ "action": "renew" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid action");

    // Owners do not subscribe to their own mess.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            "owner-1",
            json!({ "action": "subscribe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn customers_list_is_owner_only() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/listings/{}/subscription", id),
            "eater-1",
            json!({ "action": "subscribe" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/listings/{}/customers", id);
    let response = app
        .clone()
        .oneshot(get_request(&uri, "owner-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let customers = body["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["user_id"], "eater-1");

    let response = app
        .clone()
        .oneshot(get_request(&uri, "eater-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Menus
// =============================================================================

#[tokio::test]
async fn menu_upsert_replaces_the_slot() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/menu", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "day_of_week": 0, "meal_slot": "breakfast", "items": "Idli, sambar" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Same slot again: one row, new items.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "day_of_week": 0, "meal_slot": "Breakfast", "items": "Dosa, chutney" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "eater-1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let menu = body["menu"].as_array().unwrap();
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0]["items"], "Dosa, chutney");
    assert_eq!(menu[0]["meal_slot"], "breakfast");
}

#[tokio::test]
async fn menu_validation_and_ownership() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/menu", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "day_of_week": 7, "meal_slot": "lunch", "items": "Thali" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "day_of_week": 1, "meal_slot": "brunch", "items": "Thali" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "invalid meal slot");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "intruder",
            json!({ "day_of_week": 1, "meal_slot": "lunch", "items": "Thali" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn menu_item_delete() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/menu", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "day_of_week": 2, "meal_slot": "dinner", "items": "Chapati, dal" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "owner-1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let item_id = body["menu"][0]["item_id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/listings/{}/menu/{}", id, item_id))
        .header(header::COOKIE, auth_cookie("owner-1"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "owner-1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["menu"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Inventory
// =============================================================================

#[tokio::test]
async fn inventory_upsert_restocks_by_item_name() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/inventory", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "item_name": "Rice", "quantity": 25 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Restocking the same item keeps one row with the new quantity.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "item_name": "Rice", "quantity": 40 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "owner-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let inventory = body["inventory"].as_array().unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0]["item_name"], "Rice");
    assert_eq!(inventory[0]["quantity"], 40);

    // Stock levels stay between the owner and the database.
    let response = app.clone().oneshot(get_request(&uri, "eater-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inventory_validation_and_delete() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/inventory", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "item_name": "   ", "quantity": 5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "item_name": "Oil", "quantity": -2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "quantity must not be negative");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "intruder",
            json!({ "item_name": "Oil", "quantity": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            "owner-1",
            json!({ "item_name": "Oil", "quantity": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "owner-1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let item_id = body["inventory"][0]["item_id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/listings/{}/inventory/{}", id, item_id))
        .header(header::COOKIE, auth_cookie("owner-1"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get_request(&uri, "owner-1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["inventory"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Announcements
// =============================================================================

#[tokio::test]
async fn announcements_flow() {
    let app = setup_app().await;
    let id = seed_listing(&app, "owner-1", "Sharma Mess", json!({})).await;
    let uri = format!("/api/listings/{}/announcements", id);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            "owner-1",
            json!({ "body": "Closed on Sunday" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Only the owner posts.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &uri,
            "eater-1",
            json!({ "body": "Free food for all" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Blank announcements are rejected.
    let response = app
        .clone()
        .oneshot(json_request("POST", &uri, "owner-1", json!({ "body": "  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get_request(&uri, "eater-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let announcements = body["announcements"].as_array().unwrap();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0]["body"], "Closed on Sunday");
}
