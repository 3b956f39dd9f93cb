use sqlx::SqlitePool;

use crate::models::ListingRow;

// No bounding-box prefilter here: rows still carrying the (0,0) sentinel must
// stay in the candidate set so the discovery engine can apply its own
// sentinel-distance rule. The ORDER BY fixes the "input order" the engine
// preserves when no viewer position is supplied.
const SQL_DISCOVERY_CANDIDATES: &str = r#"
SELECT
    listing_id, owner_user_id, name, address, description,
    price_monthly, is_vegetarian, is_non_vegetarian, latitude, longitude
FROM listings
WHERE is_active = 1
ORDER BY created_at ASC, listing_id ASC
LIMIT 500
"#;

pub async fn load_discovery_candidates(pool: &SqlitePool) -> sqlx::Result<Vec<ListingRow>> {
    sqlx::query_as::<_, ListingRow>(SQL_DISCOVERY_CANDIDATES)
        .fetch_all(pool)
        .await
}

const SQL_GET_LISTING: &str = r#"
SELECT
    listing_id, owner_user_id, name, address, description,
    price_monthly, is_vegetarian, is_non_vegetarian, latitude, longitude
FROM listings
WHERE listing_id = ?1
"#;

pub async fn get_listing(pool: &SqlitePool, listing_id: &str) -> sqlx::Result<Option<ListingRow>> {
    sqlx::query_as::<_, ListingRow>(SQL_GET_LISTING)
        .bind(listing_id)
        .fetch_optional(pool)
        .await
}

// Owner-scoped lookup; a wrong owner is indistinguishable from a missing row.
const SQL_GET_LISTING_FOR_OWNER: &str = r#"
SELECT
    listing_id, owner_user_id, name, address, description,
    price_monthly, is_vegetarian, is_non_vegetarian, latitude, longitude
FROM listings
WHERE listing_id = ?1 AND owner_user_id = ?2
"#;

pub async fn get_listing_for_owner(
    pool: &SqlitePool,
    listing_id: &str,
    owner_user_id: &str,
) -> sqlx::Result<Option<ListingRow>> {
    sqlx::query_as::<_, ListingRow>(SQL_GET_LISTING_FOR_OWNER)
        .bind(listing_id)
        .bind(owner_user_id)
        .fetch_optional(pool)
        .await
}

pub struct NewListing<'a> {
    pub listing_id: &'a str,
    pub owner_user_id: &'a str,
    pub name: &'a str,
    pub address: &'a str,
    pub description: Option<&'a str>,
    pub price_monthly: f64,
    pub is_vegetarian: bool,
    pub is_non_vegetarian: bool,
    pub latitude: f64,
    pub longitude: f64,
}

const SQL_INSERT_LISTING: &str = r#"
INSERT INTO listings (
  listing_id,
  owner_user_id,
  name,
  address,
  description,
  price_monthly,
  is_vegetarian,
  is_non_vegetarian,
  latitude,
  longitude
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub async fn insert_listing(pool: &SqlitePool, listing: NewListing<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_LISTING)
        .bind(listing.listing_id)
        .bind(listing.owner_user_id)
        .bind(listing.name)
        .bind(listing.address)
        .bind(listing.description)
        .bind(listing.price_monthly)
        .bind(listing.is_vegetarian)
        .bind(listing.is_non_vegetarian)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .execute(pool)
        .await?;
    Ok(())
}

pub struct UpdatedListing<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub description: Option<&'a str>,
    pub price_monthly: f64,
    pub is_vegetarian: bool,
    pub is_non_vegetarian: bool,
    pub latitude: f64,
    pub longitude: f64,
}

const SQL_UPDATE_LISTING: &str = r#"
UPDATE listings
SET name = ?1,
    address = ?2,
    description = ?3,
    price_monthly = ?4,
    is_vegetarian = ?5,
    is_non_vegetarian = ?6,
    latitude = ?7,
    longitude = ?8,
    updated_at = CURRENT_TIMESTAMP
WHERE listing_id = ?9 AND owner_user_id = ?10
"#;

pub async fn update_listing(
    pool: &SqlitePool,
    listing_id: &str,
    owner_user_id: &str,
    listing: UpdatedListing<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_LISTING)
        .bind(listing.name)
        .bind(listing.address)
        .bind(listing.description)
        .bind(listing.price_monthly)
        .bind(listing.is_vegetarian)
        .bind(listing.is_non_vegetarian)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(listing_id)
        .bind(owner_user_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

#[derive(Debug, sqlx::FromRow)]
pub struct ListingGeoCandidateRow {
    pub listing_id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

const SQL_LIST_LISTINGS_MISSING_GEO: &str = r#"
SELECT
  listing_id,
  name,
  address,
  latitude,
  longitude
FROM listings
WHERE is_active = 1
  AND latitude = 0
  AND longitude = 0
  AND address != ''
ORDER BY created_at ASC
LIMIT ?
"#;

pub async fn list_listings_missing_geo(
    pool: &SqlitePool,
    limit: i64,
) -> sqlx::Result<Vec<ListingGeoCandidateRow>> {
    sqlx::query_as::<_, ListingGeoCandidateRow>(SQL_LIST_LISTINGS_MISSING_GEO)
        .bind(limit)
        .fetch_all(pool)
        .await
}

const SQL_UPDATE_LISTING_GEO: &str = r#"
UPDATE listings
SET latitude = ?, longitude = ?, updated_at = CURRENT_TIMESTAMP
WHERE listing_id = ?
"#;

pub async fn update_listing_geo(
    pool: &SqlitePool,
    listing_id: &str,
    latitude: f64,
    longitude: f64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_LISTING_GEO)
        .bind(latitude)
        .bind(longitude)
        .bind(listing_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
