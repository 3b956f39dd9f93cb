use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: String,
    pub listing_id: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

// Minimal projection fed into the rating aggregator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRatingRow {
    pub listing_id: String,
    pub rating: i64,
}
