use sqlx::SqlitePool;

use crate::models::{ReviewRatingRow, ReviewRow};

// Everything the rating aggregator needs, across all listings.
const SQL_LIST_RATING_ROWS: &str = r#"
SELECT listing_id, rating
FROM reviews
"#;

pub async fn list_rating_rows(pool: &SqlitePool) -> sqlx::Result<Vec<ReviewRatingRow>> {
    sqlx::query_as::<_, ReviewRatingRow>(SQL_LIST_RATING_ROWS)
        .fetch_all(pool)
        .await
}

const SQL_LIST_RATING_ROWS_FOR_LISTING: &str = r#"
SELECT listing_id, rating
FROM reviews
WHERE listing_id = ?1
"#;

pub async fn list_rating_rows_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<ReviewRatingRow>> {
    sqlx::query_as::<_, ReviewRatingRow>(SQL_LIST_RATING_ROWS_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_FOR_LISTING: &str = r#"
SELECT
    review_id, listing_id, user_id, rating, comment, created_at, updated_at
FROM reviews
WHERE listing_id = ?1
ORDER BY updated_at DESC, review_id DESC
LIMIT 100
"#;

pub async fn list_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<ReviewRow>> {
    sqlx::query_as::<_, ReviewRow>(SQL_LIST_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}

const SQL_FIND_BY_REVIEWER: &str = r#"
SELECT
    review_id, listing_id, user_id, rating, comment, created_at, updated_at
FROM reviews
WHERE listing_id = ?1 AND user_id = ?2
"#;

pub async fn find_by_reviewer(
    pool: &SqlitePool,
    listing_id: &str,
    user_id: &str,
) -> sqlx::Result<Option<ReviewRow>> {
    sqlx::query_as::<_, ReviewRow>(SQL_FIND_BY_REVIEWER)
        .bind(listing_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub struct NewReview<'a> {
    pub review_id: &'a str,
    pub listing_id: &'a str,
    pub user_id: &'a str,
    pub rating: i64,
    pub comment: Option<&'a str>,
}

const SQL_INSERT_REVIEW: &str = r#"
INSERT INTO reviews (
  review_id,
  listing_id,
  user_id,
  rating,
  comment
) VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub async fn insert_review(pool: &SqlitePool, review: NewReview<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REVIEW)
        .bind(review.review_id)
        .bind(review.listing_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(review.comment)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_UPDATE_REVIEW: &str = r#"
UPDATE reviews
SET rating = ?1, comment = ?2, updated_at = CURRENT_TIMESTAMP
WHERE review_id = ?3
"#;

pub async fn update_review(
    pool: &SqlitePool,
    review_id: &str,
    rating: i64,
    comment: Option<&str>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_UPDATE_REVIEW)
        .bind(rating)
        .bind(comment)
        .bind(review_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
