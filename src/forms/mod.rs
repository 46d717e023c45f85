//! Deserialized request bodies and their validated payloads.

pub mod categories;
pub mod location;
pub mod menu;
pub mod places;
pub mod reviews;
pub mod uploads;
