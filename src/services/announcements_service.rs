use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{announcements_repo, listings_repo};
use crate::models::AnnouncementRow;

pub async fn list_announcements(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Option<Vec<AnnouncementRow>>> {
    if listings_repo::get_listing(pool, listing_id).await?.is_none() {
        return Ok(None);
    }
    let announcements = announcements_repo::list_for_listing(pool, listing_id).await?;
    Ok(Some(announcements))
}

pub async fn post_announcement(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
    body: &str,
) -> sqlx::Result<()> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let body = body.trim();
    if body.is_empty() {
        return Err(sqlx::Error::Protocol(
            "announcement body must not be empty".into(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    announcements_repo::insert_announcement(
        pool,
        announcements_repo::NewAnnouncement {
            announcement_id: &id,
            listing_id,
            body,
        },
    )
    .await
}
