use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnnouncementRow {
    pub announcement_id: String,
    pub listing_id: String,
    pub body: String,
    pub created_at: String,
}
