use serde::Serialize;

// View-model row for the Discovery grid (listings + computed distance/rating).
// latitude/longitude of exactly (0,0) means the listing was never geocoded.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ListingRow {
    pub listing_id: String,
    pub owner_user_id: String,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub price_monthly: f64,
    pub is_vegetarian: bool,
    pub is_non_vegetarian: bool,
    pub latitude: f64,
    pub longitude: f64,
    #[sqlx(skip)]
    pub distance_km: Option<f64>,
    #[sqlx(skip)]
    pub avg_rating: Option<f64>,
    #[sqlx(skip)]
    pub rating_count: i64,
}
