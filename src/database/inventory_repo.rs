use sqlx::SqlitePool;

use crate::models::InventoryItemRow;

const SQL_LIST_FOR_LISTING: &str = r#"
SELECT
    item_id, listing_id, item_name, quantity, updated_at
FROM inventory
WHERE listing_id = ?1
ORDER BY item_name ASC
"#;

pub async fn list_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<InventoryItemRow>> {
    sqlx::query_as::<_, InventoryItemRow>(SQL_LIST_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}

pub struct NewInventoryItem<'a> {
    pub item_id: &'a str,
    pub listing_id: &'a str,
    pub item_name: &'a str,
    pub quantity: i64,
}

// One row per (listing, item name); restocking an item keeps its item_id.
const SQL_UPSERT_ITEM: &str = r#"
INSERT INTO inventory (
  item_id,
  listing_id,
  item_name,
  quantity
) VALUES (?1, ?2, ?3, ?4)
ON CONFLICT(listing_id, item_name)
DO UPDATE SET quantity = excluded.quantity, updated_at = CURRENT_TIMESTAMP
"#;

pub async fn upsert_item(pool: &SqlitePool, item: NewInventoryItem<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_ITEM)
        .bind(item.item_id)
        .bind(item.listing_id)
        .bind(item.item_name)
        .bind(item.quantity)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_DELETE_ITEM: &str = r#"
DELETE FROM inventory
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
