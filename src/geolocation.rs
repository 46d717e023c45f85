//! Best-effort acquisition of the user's position.
//!
//! A request starts with a high-accuracy attempt. A timeout or an unavailable
//! fix downgrades once to a low-accuracy attempt; any other failure, or a
//! failure of the downgraded attempt, is terminal. The machine is driven
//! either in-process by [`acquire`] or across HTTP requests by the location
//! service, which stores [`GeoState`] in the session.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::geo::Coordinate;

/// Options handed to the device for one position attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    /// Always zero: a cached fix is never accepted.
    pub maximum_age_ms: u64,
}

impl PositionOptions {
    pub const HIGH_ACCURACY: Self = Self {
        enable_high_accuracy: true,
        timeout_ms: 10_000,
        maximum_age_ms: 0,
    };

    pub const LOW_ACCURACY: Self = Self {
        enable_high_accuracy: false,
        timeout_ms: 15_000,
        maximum_age_ms: 0,
    };

    pub const fn for_accuracy(high_accuracy: bool) -> Self {
        if high_accuracy {
            Self::HIGH_ACCURACY
        } else {
            Self::LOW_ACCURACY
        }
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Failure reported by the device for a single attempt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PositionError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// The device has no geolocation capability.
    Unsupported,
    /// Any other error code.
    Other,
}

impl PositionError {
    /// Maps a W3C `GeolocationPositionError.code`.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Other,
        }
    }

    const fn is_transient(self) -> bool {
        matches!(self, Self::Timeout | Self::PositionUnavailable)
    }
}

/// Terminal failure of a position request.
#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeoFailure {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location request timed out")]
    Timeout,
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("location unavailable")]
    Unknown,
}

impl GeoFailure {
    /// Translation key of the message shown to the user.
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::PermissionDenied => "nearby.error.denied",
            Self::Timeout => "nearby.error.timeout",
            Self::Unsupported => "error.geo.unsupported",
            Self::Unknown => "nearby.error",
        }
    }
}

impl From<PositionError> for GeoFailure {
    fn from(value: PositionError) -> Self {
        match value {
            PositionError::PermissionDenied => Self::PermissionDenied,
            PositionError::Timeout => Self::Timeout,
            PositionError::Unsupported => Self::Unsupported,
            PositionError::PositionUnavailable | PositionError::Other => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GeoState {
    #[default]
    Idle,
    /// One attempt is in flight.
    Requesting { high_accuracy: bool },
    /// The high-accuracy attempt failed transiently; a low-accuracy one follows.
    Retrying,
    Success { coordinate: Coordinate },
    Failed { reason: GeoFailure },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoEvent {
    /// Start over with a high-accuracy attempt.
    Request,
    Resolved(Coordinate),
    Rejected(PositionError),
    /// Issue the downgraded attempt.
    Proceed,
}

#[derive(Debug, Error, PartialEq)]
#[error("event {event:?} is not valid in state {state:?}")]
pub struct UnexpectedEvent {
    pub state: GeoState,
    pub event: GeoEvent,
}

impl GeoState {
    /// Applies one event. Never more than one attempt is in flight, so a new
    /// request is rejected while `Requesting` or `Retrying`.
    pub fn apply(self, event: GeoEvent) -> Result<GeoState, UnexpectedEvent> {
        let next = match (self, event) {
            (
                GeoState::Idle | GeoState::Success { .. } | GeoState::Failed { .. },
                GeoEvent::Request,
            ) => GeoState::Requesting {
                high_accuracy: true,
            },
            (GeoState::Requesting { .. }, GeoEvent::Resolved(coordinate)) => {
                GeoState::Success { coordinate }
            }
            (
                GeoState::Requesting {
                    high_accuracy: true,
                },
                GeoEvent::Rejected(error),
            ) if error.is_transient() => GeoState::Retrying,
            (GeoState::Requesting { .. }, GeoEvent::Rejected(error)) => GeoState::Failed {
                reason: error.into(),
            },
            (GeoState::Retrying, GeoEvent::Proceed) => GeoState::Requesting {
                high_accuracy: false,
            },
            (state, event) => return Err(UnexpectedEvent { state, event }),
        };
        Ok(next)
    }

    /// Applies `event` and moves straight on from `Retrying` to the
    /// low-accuracy attempt, so the result is terminal or awaits a position.
    pub fn advance(self, event: GeoEvent) -> Result<GeoState, UnexpectedEvent> {
        match self.apply(event)? {
            GeoState::Retrying => {
                log::warn!("High accuracy position failed, retrying with lower accuracy");
                GeoState::Retrying.apply(GeoEvent::Proceed)
            }
            next => Ok(next),
        }
    }

    /// Options for the attempt this state is waiting on.
    pub const fn pending_options(&self) -> Option<PositionOptions> {
        match self {
            GeoState::Requesting { high_accuracy } => {
                Some(PositionOptions::for_accuracy(*high_accuracy))
            }
            GeoState::Retrying => Some(PositionOptions::LOW_ACCURACY),
            _ => None,
        }
    }

    pub const fn coordinate(&self) -> Option<Coordinate> {
        match self {
            GeoState::Success { coordinate } => Some(*coordinate),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, GeoState::Success { .. } | GeoState::Failed { .. })
    }
}

/// Device capability answering one position attempt.
pub trait PositionSource {
    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<Coordinate, PositionError>>;
}

/// Runs the acquisition machine to a terminal state against `source`.
///
/// The HTTP flow lets the browser perform attempts instead; this entry point
/// serves embedders with an in-process [`PositionSource`], such as a native
/// client or a fixed-position source in a kiosk build.
///
/// Each attempt is bounded by its own timeout; an attempt that outlives it
/// counts as [`PositionError::Timeout`].
pub async fn acquire<S>(source: &S) -> Result<Coordinate, GeoFailure>
where
    S: PositionSource + ?Sized,
{
    let mut state = GeoState::Requesting {
        high_accuracy: true,
    };

    loop {
        let event = match state {
            GeoState::Requesting { high_accuracy } => {
                let options = PositionOptions::for_accuracy(high_accuracy);
                match tokio::time::timeout(options.timeout(), source.current_position(options))
                    .await
                {
                    Ok(Ok(coordinate)) => GeoEvent::Resolved(coordinate),
                    Ok(Err(error)) => GeoEvent::Rejected(error),
                    Err(_) => GeoEvent::Rejected(PositionError::Timeout),
                }
            }
            GeoState::Retrying => GeoEvent::Proceed,
            GeoState::Success { coordinate } => return Ok(coordinate),
            GeoState::Failed { reason } => {
                log::error!("Geolocation failed: {reason}");
                return Err(reason);
            }
            GeoState::Idle => GeoEvent::Request,
        };

        state = match state.advance(event) {
            Ok(next) => next,
            Err(e) => {
                log::error!("Geolocation state machine stalled: {e}");
                return Err(GeoFailure::Unknown);
            }
        };
    }
}
