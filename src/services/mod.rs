pub mod admin;
pub mod catalog;
pub mod errors;
pub mod favorites;
pub mod location;
pub mod places;
pub mod profile;
pub mod reviews;
pub mod uploads;

pub use errors::{ServiceError, ServiceResult};
