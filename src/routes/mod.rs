use actix_session::Session;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::domain::geo::Coordinate;
use crate::geolocation::GeoState;
use crate::services::ServiceError;
use crate::services::location::remember_location;

pub mod account;
pub mod admin;
pub mod catalog;
pub mod location;

/// Session key holding the serialized [`GeoState`].
pub const GEO_STATE_KEY: &str = "geo_state";
/// Session key holding the last successfully acquired [`Coordinate`].
pub const LAST_LOCATION_KEY: &str = "last_location";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Maps a service failure to its HTTP status with a JSON body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorBody { error: "unauthorized" })
        }
        ServiceError::Forbidden => HttpResponse::Forbidden().json(ErrorBody { error: "forbidden" }),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody { error: "not found" }),
        ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
            HttpResponse::BadRequest().json(ErrorBody { error: &message })
        }
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}

/// The acquisition state stored in the session, `Idle` when absent or unreadable.
pub fn load_geo_state(session: &Session) -> GeoState {
    match session.get::<GeoState>(GEO_STATE_KEY) {
        Ok(state) => state.unwrap_or_default(),
        Err(e) => {
            log::error!("Failed to read location state from session: {e}");
            GeoState::default()
        }
    }
}

pub fn load_last_location(session: &Session) -> Option<Coordinate> {
    session
        .get::<Coordinate>(LAST_LOCATION_KEY)
        .unwrap_or_else(|e| {
            log::error!("Failed to read last location from session: {e}");
            None
        })
}

/// Stores the acquisition state, updating the last location on success.
pub fn store_geo_state(session: &Session, state: GeoState) -> Result<(), HttpResponse> {
    let previous = load_last_location(session);

    session.insert(GEO_STATE_KEY, state).map_err(|e| {
        log::error!("Failed to store location state in session: {e}");
        HttpResponse::InternalServerError().finish()
    })?;

    match remember_location(previous, state) {
        Some(coordinate) if Some(coordinate) != previous => {
            session.insert(LAST_LOCATION_KEY, coordinate).map_err(|e| {
                log::error!("Failed to store last location in session: {e}");
                HttpResponse::InternalServerError().finish()
            })
        }
        _ => Ok(()),
    }
}
