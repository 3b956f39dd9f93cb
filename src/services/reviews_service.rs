use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{listings_repo, reviews_repo};
use crate::models::ReviewRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Created,
    Updated,
}

impl ReviewOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewOutcome::Created => "created",
            ReviewOutcome::Updated => "updated",
        }
    }
}

pub async fn list_reviews(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Option<Vec<ReviewRow>>> {
    if listings_repo::get_listing(pool, listing_id).await?.is_none() {
        return Ok(None);
    }
    let reviews = reviews_repo::list_for_listing(pool, listing_id).await?;
    Ok(Some(reviews))
}

// Submit-or-replace: a second review from the same user overwrites the first
// instead of stacking, so every (listing, user) pair counts once.
pub async fn submit_review(
    pool: &SqlitePool,
    listing_id: &str,
    user_id: &str,
    rating: i64,
    comment: Option<&str>,
) -> sqlx::Result<ReviewOutcome> {
    if !(1..=5).contains(&rating) {
        return Err(sqlx::Error::Protocol(
            "rating must be between 1 and 5".into(),
        ));
    }

    if listings_repo::get_listing(pool, listing_id).await?.is_none() {
        return Err(sqlx::Error::RowNotFound);
    }

    let comment = comment.map(str::trim).filter(|c| !c.is_empty());

    if let Some(existing) = reviews_repo::find_by_reviewer(pool, listing_id, user_id).await? {
        reviews_repo::update_review(pool, &existing.review_id, rating, comment).await?;
        return Ok(ReviewOutcome::Updated);
    }

    let id = Uuid::new_v4().to_string();
    reviews_repo::insert_review(
        pool,
        reviews_repo::NewReview {
            review_id: &id,
            listing_id,
            user_id,
            rating,
            comment,
        },
    )
    .await?;
    Ok(ReviewOutcome::Created)
}
