pub mod category;
pub mod config;
pub mod favorite;
pub mod menu;
pub mod place;
pub mod profile;
pub mod review;
