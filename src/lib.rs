use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

pub mod database;
pub mod models;
pub mod services;
pub mod web;

use web::middleware::auth as auth_middleware;
use web::routes::{
    announcements, discovery, health, inventory, listings, location, menu, reviews, subscriptions,
};

// The whole API surface lives here so integration tests can drive the exact
// router the binary serves.
pub fn build_router(pool: SqlitePool) -> Router {
    let protected_routes = Router::new()
        .route("/api/discovery", get(discovery::discovery_handler))
        .route("/api/listings", post(listings::create_listing_handler))
        .route(
            "/api/listings/:listing_id",
            get(listings::listing_detail_handler).put(listings::update_listing_handler),
        )
        .route(
            "/api/listings/:listing_id/reviews",
            get(reviews::list_reviews_handler),
        )
        .route(
            "/api/listings/:listing_id/review",
            put(reviews::submit_review_handler),
        )
        .route(
            "/api/listings/:listing_id/subscription",
            post(subscriptions::subscription_command_handler),
        )
        .route(
            "/api/listings/:listing_id/customers",
            get(subscriptions::listing_customers_handler),
        )
        .route(
            "/api/listings/:listing_id/menu",
            get(menu::get_menu_handler).put(menu::upsert_menu_handler),
        )
        .route(
            "/api/listings/:listing_id/menu/:item_id",
            delete(menu::delete_menu_item_handler),
        )
        .route(
            "/api/listings/:listing_id/inventory",
            get(inventory::get_inventory_handler).put(inventory::upsert_inventory_handler),
        )
        .route(
            "/api/listings/:listing_id/inventory/:item_id",
            delete(inventory::delete_inventory_item_handler),
        )
        .route(
            "/api/listings/:listing_id/announcements",
            get(announcements::list_announcements_handler)
                .post(announcements::post_announcement_handler),
        )
        .route(
            "/api/me/subscriptions",
            get(subscriptions::my_subscriptions_handler),
        )
        .route("/api/location/search", get(location::search_locations_handler))
        .layer(middleware::from_fn(auth_middleware::require_auth));

    Router::new()
        // Public routes
        .route("/health", get(health::health_handler))
        // Protected routes
        .merge(protected_routes)
        // Layers
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool)
}
