pub mod category;
pub mod favorite;
pub mod geo;
pub mod menu;
pub mod place;
pub mod profile;
pub mod review;
pub mod types;
