use sqlx::SqlitePool;

use crate::models::{SubscriptionRow, UserSubscriptionRow};

const SQL_FIND_FOR_LISTING_AND_USER: &str = r#"
SELECT
    subscription_id, listing_id, user_id, status, created_at, updated_at
FROM subscriptions
WHERE listing_id = ?1 AND user_id = ?2
"#;

pub async fn find_for_listing_and_user(
    pool: &SqlitePool,
    listing_id: &str,
    user_id: &str,
) -> sqlx::Result<Option<SubscriptionRow>> {
    sqlx::query_as::<_, SubscriptionRow>(SQL_FIND_FOR_LISTING_AND_USER)
        .bind(listing_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub struct NewSubscription<'a> {
    pub subscription_id: &'a str,
    pub listing_id: &'a str,
    pub user_id: &'a str,
}

const SQL_INSERT_SUBSCRIPTION: &str = r#"
INSERT INTO subscriptions (
  subscription_id,
  listing_id,
  user_id,
  status
) VALUES (?1, ?2, ?3, 'active')
"#;

pub async fn insert_subscription(
    pool: &SqlitePool,
    subscription: NewSubscription<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_SUBSCRIPTION)
        .bind(subscription.subscription_id)
        .bind(subscription.listing_id)
        .bind(subscription.user_id)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_SET_STATUS: &str = r#"
UPDATE subscriptions
SET status = ?1, updated_at = CURRENT_TIMESTAMP
WHERE subscription_id = ?2
"#;

pub async fn set_status(
    pool: &SqlitePool,
    subscription_id: &str,
    status: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_STATUS)
        .bind(status)
        .bind(subscription_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LIST_FOR_USER: &str = r#"
SELECT
    s.subscription_id,
    s.listing_id,
    l.name AS listing_name,
    l.price_monthly,
    s.status,
    s.created_at
FROM subscriptions s
JOIN listings l ON l.listing_id = s.listing_id
WHERE s.user_id = ?1
ORDER BY s.created_at DESC, s.subscription_id DESC
"#;

pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<UserSubscriptionRow>> {
    sqlx::query_as::<_, UserSubscriptionRow>(SQL_LIST_FOR_USER)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_ACTIVE_FOR_LISTING: &str = r#"
SELECT
    subscription_id, listing_id, user_id, status, created_at, updated_at
FROM subscriptions
WHERE listing_id = ?1 AND status = 'active'
ORDER BY created_at ASC, subscription_id ASC
"#;

pub async fn list_active_for_listing(
    pool: &SqlitePool,
    listing_id: &str,
) -> sqlx::Result<Vec<SubscriptionRow>> {
    sqlx::query_as::<_, SubscriptionRow>(SQL_LIST_ACTIVE_FOR_LISTING)
        .bind(listing_id)
        .fetch_all(pool)
        .await
}
