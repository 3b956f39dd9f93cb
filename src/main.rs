use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;

use messmate::build_router;
use messmate::database::schema;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database and bootstrap the schema
    let db_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://messmate.db?mode=rwc".to_string());
    println!("Connecting to database: {}", db_url);

    let pool = schema::init_database(&db_url)
        .await
        .expect("Cannot connect to DB");

    // 3. Build the application
    let app = build_router(pool);

    // 4. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind on {}: {}. Trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Cannot parse fallback");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Cannot bind on fallback port")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 MessMate API running on http://{}", bound_addr);
    println!("📍 Try http://{}/health to check the build", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
