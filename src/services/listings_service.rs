use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{
    announcements_repo, listings_repo, menu_repo, reviews_repo, subscriptions_repo,
};
use crate::models::{AnnouncementRow, ListingRow, MenuItemRow, ReviewRow};
use crate::services::discovery_service::{aggregate_ratings, RatingSummary, DEFAULT_UNRATED_RATING};

#[derive(Debug, Deserialize)]
pub struct CreateListingBody {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub price_monthly: f64,
    pub is_vegetarian: Option<bool>,
    pub is_non_vegetarian: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateListingBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub price_monthly: Option<f64>,
    pub is_vegetarian: Option<bool>,
    pub is_non_vegetarian: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn create_listing(
    pool: &SqlitePool,
    owner_user_id: &str,
    body: &CreateListingBody,
) -> sqlx::Result<ListingRow> {
    let name = body.name.trim();
    let address = body.address.trim();
    if name.is_empty() {
        return Err(sqlx::Error::Protocol("name must not be empty".into()));
    }
    if address.is_empty() {
        return Err(sqlx::Error::Protocol("address must not be empty".into()));
    }
    if body.price_monthly <= 0.0 {
        return Err(sqlx::Error::Protocol("price must be positive".into()));
    }

    // Coordinates are optional at creation; absent ones stay at the (0,0)
    // sentinel until the owner or the geo backfill fills them in.
    let id = Uuid::new_v4().to_string();
    listings_repo::insert_listing(
        pool,
        listings_repo::NewListing {
            listing_id: &id,
            owner_user_id,
            name,
            address,
            description: body
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty()),
            price_monthly: body.price_monthly,
            is_vegetarian: body.is_vegetarian.unwrap_or(false),
            is_non_vegetarian: body.is_non_vegetarian.unwrap_or(false),
            latitude: body.latitude.unwrap_or(0.0),
            longitude: body.longitude.unwrap_or(0.0),
        },
    )
    .await?;

    listings_repo::get_listing(pool, &id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

// Partial update: absent fields keep their current value. Owner scoping makes
// someone else's listing look like a missing one.
pub async fn update_listing(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    body: &UpdateListingBody,
) -> sqlx::Result<ListingRow> {
    let current = listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let name = body.name.as_deref().unwrap_or(&current.name).trim();
    let address = body.address.as_deref().unwrap_or(&current.address).trim();
    if name.is_empty() {
        return Err(sqlx::Error::Protocol("name must not be empty".into()));
    }
    if address.is_empty() {
        return Err(sqlx::Error::Protocol("address must not be empty".into()));
    }

    let price_monthly = body.price_monthly.unwrap_or(current.price_monthly);
    if price_monthly <= 0.0 {
        return Err(sqlx::Error::Protocol("price must be positive".into()));
    }

    // An explicit empty string clears the description; absence keeps it.
    let description = match &body.description {
        Some(d) => Some(d.trim()).filter(|d| !d.is_empty()),
        None => current.description.as_deref(),
    };

    listings_repo::update_listing(
        pool,
        listing_id,
        owner_user_id,
        listings_repo::UpdatedListing {
            name,
            address,
            description,
            price_monthly,
            is_vegetarian: body.is_vegetarian.unwrap_or(current.is_vegetarian),
            is_non_vegetarian: body.is_non_vegetarian.unwrap_or(current.is_non_vegetarian),
            latitude: body.latitude.unwrap_or(current.latitude),
            longitude: body.longitude.unwrap_or(current.longitude),
        },
    )
    .await?;

    listings_repo::get_listing(pool, listing_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub struct ListingDetailData {
    pub listing: ListingRow,
    // Unreviewed listings present the default rating with a zero count.
    pub rating: RatingSummary,
    pub reviews: Vec<ReviewRow>,
    pub menu: Vec<MenuItemRow>,
    pub announcements: Vec<AnnouncementRow>,
    pub subscription_status: Option<String>,
    pub viewer_has_reviewed: bool,
}

pub async fn build_listing_detail(
    pool: &SqlitePool,
    viewer_user_id: &str,
    listing_id: &str,
) -> sqlx::Result<Option<ListingDetailData>> {
    let Some(mut listing) = listings_repo::get_listing(pool, listing_id).await? else {
        return Ok(None);
    };

    let rating_rows = reviews_repo::list_rating_rows_for_listing(pool, listing_id).await?;
    let summary = aggregate_ratings(&rating_rows).remove(listing_id);
    listing.avg_rating = summary.map(|s| s.average);
    listing.rating_count = summary.map_or(0, |s| s.count);
    let rating = summary.unwrap_or(RatingSummary {
        count: 0,
        average: DEFAULT_UNRATED_RATING,
    });

    let reviews = reviews_repo::list_for_listing(pool, listing_id).await?;
    let menu = menu_repo::list_for_listing(pool, listing_id).await?;
    let announcements = announcements_repo::list_for_listing(pool, listing_id).await?;

    let subscription_status =
        subscriptions_repo::find_for_listing_and_user(pool, listing_id, viewer_user_id)
            .await?
            .map(|s| s.status);
    // The recent-reviews list is capped, so check the viewer's row directly.
    let viewer_has_reviewed = reviews_repo::find_by_reviewer(pool, listing_id, viewer_user_id)
        .await?
        .is_some();

    Ok(Some(ListingDetailData {
        listing,
        rating,
        reviews,
        menu,
        announcements,
        subscription_status,
        viewer_has_reviewed,
    }))
}
