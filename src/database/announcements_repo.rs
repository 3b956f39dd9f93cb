use sqlx::SqlitePool;

use crate::models::AnnouncementRow;

const SQL_LIST_FOR_LISTING: &str = r#"
SELECT
    announcement_id, listing_id, body, created_at
FROM announcements
WHERE listing_id = ?1
ORDER BY created_at DESC, announcement_id DESC
LIMIT 50
"#;

pub async fn list_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<AnnouncementRow>> {
    sqlx::query_as::<_, AnnouncementRow>(SQL_LIST_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}

pub struct NewAnnouncement<'a> {
    pub announcement_id: &'a str,
    pub listing_id: &'a str,
    pub body: &'a str,
}

const SQL_INSERT_ANNOUNCEMENT: &str = r#"
INSERT INTO announcements (
  announcement_id,
  listing_id,
  body
) VALUES (?1, ?2, ?3)
"#;

pub async fn insert_announcement(
    pool: &SqlitePool,
    announcement: NewAnnouncement<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_ANNOUNCEMENT)
        .bind(announcement.announcement_id)
        .bind(announcement.listing_id)
        .bind(announcement.body)
        .execute(pool)
        .await?;
    Ok(())
}
