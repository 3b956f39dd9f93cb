use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{inventory_repo, listings_repo};
use crate::models::InventoryItemRow;

#[derive(Debug, Deserialize)]
pub struct InventoryItemBody {
    pub item_name: String,
    pub quantity: i64,
}

// Stock levels are the provider's own bookkeeping, so reads are owner-scoped
// like the customer list, unlike the publicly readable menu.
pub async fn get_inventory(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
) -> sqlx::Result<Vec<InventoryItemRow>> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    inventory_repo::list_for_listing(pool, listing_id).await
}

pub async fn upsert_inventory_item(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    body: &InventoryItemBody,
) -> sqlx::Result<()> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let item_name = body.item_name.trim();
    if item_name.is_empty() {
        return Err(sqlx::Error::Protocol("item name must not be empty".into()));
    }
    if body.quantity < 0 {
        return Err(sqlx::Error::Protocol(
            "quantity must not be negative".into(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    inventory_repo::upsert_item(
        pool,
        inventory_repo::NewInventoryItem {
            item_id: &id,
            listing_id,
            item_name,
            quantity: body.quantity,
        },
    )
    .await
}

pub async fn remove_inventory_item(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    item_id: &str,
) -> sqlx::Result<u64> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    inventory_repo::delete_item(pool, item_id, listing_id).await
}
