// Database bootstrap. Every statement is idempotent so the server (and the
// tests) can run it on every startup against a fresh or existing file.
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

pub async fn init_database(db_url: &str) -> sqlx::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    create_listings_table(pool).await?;
    create_reviews_table(pool).await?;
    create_subscriptions_table(pool).await?;
    create_menu_items_table(pool).await?;
    create_inventory_table(pool).await?;
    create_announcements_table(pool).await?;

    info!("Database schema ready");
    Ok(())
}

async fn create_listings_table(pool: &SqlitePool) -> sqlx::Result<()> {
    // latitude/longitude default to the (0,0) "never geocoded" sentinel.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listings (
            listing_id TEXT PRIMARY KEY,
            owner_user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            description TEXT,
            price_monthly REAL NOT NULL CHECK (price_monthly > 0),
            is_vegetarian INTEGER NOT NULL DEFAULT 0,
            is_non_vegetarian INTEGER NOT NULL DEFAULT 0,
            latitude REAL NOT NULL DEFAULT 0,
            longitude REAL NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_listings_owner ON listings (owner_user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_reviews_table(pool: &SqlitePool) -> sqlx::Result<()> {
    // One review per (listing, user); a second submission updates the first.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id TEXT PRIMARY KEY,
            listing_id TEXT NOT NULL REFERENCES listings (listing_id),
            user_id TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
            comment TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (listing_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_listing ON reviews (listing_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_subscriptions_table(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            subscription_id TEXT PRIMARY KEY,
            listing_id TEXT NOT NULL REFERENCES listings (listing_id),
            user_id TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'cancelled')),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (listing_id, user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_subscriptions_user ON subscriptions (user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_menu_items_table(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS menu_items (
            item_id TEXT PRIMARY KEY,
            listing_id TEXT NOT NULL REFERENCES listings (listing_id),
            day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
            meal_slot TEXT NOT NULL
                CHECK (meal_slot IN ('breakfast', 'lunch', 'dinner')),
            items TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (listing_id, day_of_week, meal_slot)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_inventory_table(pool: &SqlitePool) -> sqlx::Result<()> {
    // One stock row per (listing, item name); restocking rewrites the row.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory (
            item_id TEXT PRIMARY KEY,
            listing_id TEXT NOT NULL REFERENCES listings (listing_id),
            item_name TEXT NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            UNIQUE (listing_id, item_name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_announcements_table(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS announcements (
            announcement_id TEXT PRIMARY KEY,
            listing_id TEXT NOT NULL REFERENCES listings (listing_id),
            body TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_announcements_listing ON announcements (listing_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
