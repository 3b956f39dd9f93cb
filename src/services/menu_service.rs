use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{listings_repo, menu_repo};
use crate::models::MenuItemRow;

pub const MEAL_SLOTS: [&str; 3] = ["breakfast", "lunch", "dinner"];

#[derive(Debug, Deserialize)]
pub struct MenuSlotBody {
    pub day_of_week: i64,
    pub meal_slot: String,
    pub items: String,
}

pub async fn get_menu(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Option<Vec<MenuItemRow>>> {
    if listings_repo::get_listing(pool, listing_id).await?.is_none() {
        return Ok(None);
    }
    let menu = menu_repo::list_for_listing(pool, listing_id).await?;
    Ok(Some(menu))
}

pub async fn upsert_menu_slot(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    body: &MenuSlotBody,
) -> sqlx::Result<()> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    if !(0..=6).contains(&body.day_of_week) {
        return Err(sqlx::Error::Protocol(
            "day_of_week must be between 0 and 6".into(),
        ));
    }
    let meal_slot = body.meal_slot.trim().to_lowercase();
    if !MEAL_SLOTS.contains(&meal_slot.as_str()) {
        return Err(sqlx::Error::Protocol("invalid meal slot".into()));
    }
    let items = body.items.trim();
    if items.is_empty() {
        return Err(sqlx::Error::Protocol("items must not be empty".into()));
    }

    let id = Uuid::new_v4().to_string();
    menu_repo::upsert_item(
        pool,
        menu_repo::NewMenuItem {
            item_id: &id,
            listing_id,
            day_of_week: body.day_of_week,
            meal_slot: &meal_slot,
            items,
        },
    )
    .await
}

pub async fn remove_menu_item(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    item_id: &str,
) -> sqlx::Result<u64> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    menu_repo::delete_item(pool, item_id, listing_id).await
}
