use dotenvy::dotenv;
use std::env;

use messmate::database::schema;
use messmate::services::listing_geo_service;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in .env");
    let pool = schema::init_database(&db_url)
        .await
        .expect("Cannot connect to DB");

    let limit: i64 = env::var("BACKFILL_LIMIT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(500);

    match listing_geo_service::backfill_listing_geo(&pool, limit).await {
        Ok(report) => {
            println!(
                "geo backfill: candidates={}, updated={}, skipped={}, failed={}",
                report.candidates, report.updated, report.skipped, report.failed
            );
        }
        Err(e) => {
            eprintln!("geo backfill failed: {}", e);
            std::process::exit(1);
        }
    }
}
