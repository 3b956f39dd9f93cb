use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{listings_repo, subscriptions_repo};
use crate::models::{SubscriptionRow, UserSubscriptionRow};

// Subscribe/cancel command against one listing. The returned notice feeds the
// response body; repeated commands are harmless and just report their state.
pub async fn create_subscription_command(
    pool: &SqlitePool,
    user_id: &str,
    listing_id: &str,
    action: &str,
) -> sqlx::Result<&'static str> {
    let action = action.trim();
    if action != "subscribe" && action != "cancel" {
        return Err(sqlx::Error::Protocol("invalid action".into()));
    }

    let listing = listings_repo::get_listing(pool, listing_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    if action == "subscribe" && listing.owner_user_id == user_id {
        return Err(sqlx::Error::Protocol(
            "cannot subscribe to own listing".into(),
        ));
    }

    let existing = subscriptions_repo::find_for_listing_and_user(pool, listing_id, user_id).await?;

    let notice = if action == "subscribe" {
        match existing {
            None => {
                let id = Uuid::new_v4().to_string();
                subscriptions_repo::insert_subscription(
                    pool,
                    subscriptions_repo::NewSubscription {
                        subscription_id: &id,
                        listing_id,
                        user_id,
                    },
                )
                .await?;
                "subscribed"
            }
            Some(row) if row.status == "active" => "already_subscribed",
            Some(row) => {
                subscriptions_repo::set_status(pool, &row.subscription_id, "active").await?;
                "resubscribed"
            }
        }
    } else {
        match existing {
            Some(row) if row.status == "active" => {
                subscriptions_repo::set_status(pool, &row.subscription_id, "cancelled").await?;
                "cancelled"
            }
            _ => "not_subscribed",
        }
    };

    Ok(notice)
}

pub async fn list_user_subscriptions(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<UserSubscriptionRow>> {
    subscriptions_repo::list_for_user(pool, user_id).await
}

// Owner-only view of who is currently subscribed to a listing.
pub async fn list_listing_customers(
    pool: &SqlitePool,
    owner_user_id: &str,
    listing_id: &str,
) -> sqlx::Result<Vec<SubscriptionRow>> {
    listings_repo::get_listing_for_owner(pool, listing_id, owner_user_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    subscriptions_repo::list_active_for_listing(pool, listing_id).await
}
