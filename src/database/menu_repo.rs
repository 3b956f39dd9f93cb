use sqlx::SqlitePool;

use crate::models::MenuItemRow;

const SQL_LIST_FOR_LISTING: &str = r#"
SELECT
    item_id, listing_id, day_of_week, meal_slot, items, updated_at
FROM menu_items
WHERE listing_id = ?1
ORDER BY
    day_of_week ASC,
    CASE meal_slot WHEN 'breakfast' THEN 0 WHEN 'lunch' THEN 1 ELSE 2 END ASC
"#;

pub async fn list_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<MenuItemRow>> {
    sqlx::query_as::<_, MenuItemRow>(SQL_LIST_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}

pub struct NewMenuItem<'a> {
    pub item_id: &'a str,
    pub listing_id: &'a str,
    pub day_of_week: i64,
    pub meal_slot: &'a str,
    pub items: &'a str,
}

// One row per (listing, day, slot) cell; rewriting a cell keeps its item_id.
const SQL_UPSERT_ITEM: &str = r#"
INSERT INTO menu_items (
  item_id,
  listing_id,
  day_of_week,
  meal_slot,
  items
) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(listing_id, day_of_week, meal_slot)
DO UPDATE SET items = excluded.items, updated_at = CURRENT_TIMESTAMP
"#;

pub async fn upsert_item(pool: &SqlitePool, item: NewMenuItem<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_ITEM)
        .bind(item.item_id)
        .bind(item.listing_id)
        .bind(item.day_of_week)
        .bind(item.meal_slot)
        .bind(item.items)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_DELETE_ITEM: &str = r#"
DELETE FROM menu_items
WHERE item_id = ?1 AND listing_id = ?2
"#;

pub async fn delete_item(
    pool: &SqlitePool,
    item_id: &str,
    listing_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ITEM)
        .bind(item_id)
        .bind(listing_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
