pub mod announcements_repo;
pub mod inventory_repo;
pub mod listings_repo;
pub mod menu_repo;
pub mod reviews_repo;
pub mod schema;
pub mod subscriptions_repo;
