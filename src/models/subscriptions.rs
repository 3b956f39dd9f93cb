use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SubscriptionRow {
    pub subscription_id: String,
    pub listing_id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

// Row for the "my subscriptions" page, joined with the listing it points at.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSubscriptionRow {
    pub subscription_id: String,
    pub listing_id: String,
    pub listing_name: String,
    pub price_monthly: f64,
    pub status: String,
    pub created_at: String,
}
