pub mod announcements_service;
pub mod discovery_service;
pub mod inventory_service;
pub mod listing_geo_service;
pub mod listings_service;
pub mod location_service;
pub mod menu_service;
pub mod reviews_service;
pub mod subscriptions_service;
