//! Data models for the storefront

pub mod category;
pub mod delivery_interval;
pub mod product;
pub mod promo_code;
pub mod store_settings;

pub use category::Category;
pub use delivery_interval::{DeliveryInterval, DeliveryIntervalSlot};
pub use product::{BadgeType, Product};
pub use promo_code::PromoCode;
pub use store_settings::StoreSettings;
