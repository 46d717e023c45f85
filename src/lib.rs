//! Core library exports for the place directory service.
//!
//! The `data` feature exposes the catalog model, persistence and ranking
//! layers; `server` adds forms, services, the geolocation flow and the HTTP
//! routes used by the web application.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod proximity;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod geolocation;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod session;
#[cfg(feature = "server")]
pub mod storage;
