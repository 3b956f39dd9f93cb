use serde::Serialize;

// One stock row of a provider's pantry: item name plus units on hand.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventoryItemRow {
    pub item_id: String,
    pub listing_id: String,
    pub item_name: String,
    pub quantity: i64,
    pub updated_at: String,
}
