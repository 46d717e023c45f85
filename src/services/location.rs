//! Server side of the position acquisition flow.
//!
//! The browser performs each attempt and reports its outcome; the state
//! machine lives in the user's session so the retry policy is decided here.

use serde::Serialize;

use crate::domain::geo::Coordinate;
use crate::forms::location::LocationReportFormPayload;
use crate::geolocation::{GeoEvent, GeoState, PositionOptions};

use super::{ServiceError, ServiceResult};

/// What the browser should do next.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationStep {
    #[serde(flatten)]
    pub state: GeoState,
    /// Options for the next attempt, when one is expected.
    pub options: Option<PositionOptions>,
    /// Translation key when the request failed.
    pub message_key: Option<&'static str>,
}

impl From<GeoState> for LocationStep {
    fn from(state: GeoState) -> Self {
        let message_key = match state {
            GeoState::Failed { reason } => Some(reason.message_key()),
            _ => None,
        };
        Self {
            state,
            options: state.pending_options(),
            message_key,
        }
    }
}

/// Starts a fresh high-accuracy request, discarding any earlier outcome.
///
/// An attempt still marked in flight is abandoned; its late report will no
/// longer match the session state.
pub fn request_location(current: GeoState) -> GeoState {
    let idle = match current {
        GeoState::Requesting { .. } | GeoState::Retrying => {
            log::debug!("Abandoning in-flight location attempt");
            GeoState::Idle
        }
        other => other,
    };

    idle.apply(GeoEvent::Request).unwrap_or(GeoState::Requesting {
        high_accuracy: true,
    })
}

/// Feeds one attempt outcome into the machine.
///
/// A transient high-accuracy failure moves straight on to the low-accuracy
/// attempt, so the returned state is either terminal or waiting on the
/// browser again.
pub fn report_location(
    current: GeoState,
    report: LocationReportFormPayload,
) -> ServiceResult<GeoState> {
    match current {
        GeoState::Requesting { high_accuracy } if high_accuracy == report.high_accuracy => {}
        other => {
            log::warn!("Location report does not match session state {other:?}");
            return Err(ServiceError::Form(
                "No matching location request is in progress".to_string(),
            ));
        }
    }

    current.advance(report.event()).map_err(|e| {
        log::error!("Location report rejected: {e}");
        ServiceError::Internal
    })
}

/// The last good coordinate after moving to `state`.
///
/// Only a success replaces it; new requests and failures leave the earlier
/// fix in place.
pub fn remember_location(previous: Option<Coordinate>, state: GeoState) -> Option<Coordinate> {
    state.coordinate().or(previous)
}

/// The origin used for ranking: explicit query coordinates win over the
/// remembered coordinate of the last successful acquisition.
pub fn effective_origin(
    explicit: Option<Coordinate>,
    remembered: Option<Coordinate>,
) -> Option<Coordinate> {
    explicit.or(remembered)
}
