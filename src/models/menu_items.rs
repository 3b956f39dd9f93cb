use serde::Serialize;

// One cell of a provider's weekly menu: (day_of_week, meal_slot) -> items.
// day_of_week is 0..6 with 0 = Monday.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MenuItemRow {
    pub item_id: String,
    pub listing_id: String,
    pub day_of_week: i64,
    pub meal_slot: String,
    pub items: String,
    pub updated_at: String,
}
