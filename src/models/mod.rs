pub mod announcements;
pub mod inventory;
pub mod listings;
pub mod menu_items;
pub mod reviews;
pub mod subscriptions;

pub use announcements::AnnouncementRow;
pub use inventory::InventoryItemRow;
pub use listings::ListingRow;
pub use menu_items::MenuItemRow;
pub use reviews::{ReviewRatingRow, ReviewRow};
pub use subscriptions::{SubscriptionRow, UserSubscriptionRow};
