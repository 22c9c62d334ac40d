pub mod health;
pub mod messages;
pub mod moods;
pub mod wishlist;
pub mod ws;
