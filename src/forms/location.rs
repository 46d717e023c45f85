use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::geo::Coordinate;
use crate::domain::types::TypeConstraintError;
use crate::geolocation::{GeoEvent, PositionError};

/// Outcome of one browser position attempt.
///
/// Either both coordinates, an `error_code` from the browser, or
/// `unsupported` when the browser has no geolocation API.
#[derive(Debug, Deserialize, Validate)]
pub struct LocationReportForm {
    /// Accuracy mode the attempt was made with.
    pub high_accuracy: bool,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    pub error_code: Option<u16>,
    #[serde(default)]
    pub unsupported: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationReportFormPayload {
    pub high_accuracy: bool,
    pub outcome: Result<Coordinate, PositionError>,
}

impl LocationReportFormPayload {
    pub fn event(&self) -> GeoEvent {
        match self.outcome {
            Ok(coordinate) => GeoEvent::Resolved(coordinate),
            Err(error) => GeoEvent::Rejected(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum LocationReportFormError {
    #[error("Location report validation failed: {0}")]
    Validation(String),
    #[error("Location report contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Location report needs a position or an error")]
    MissingOutcome,
}

impl From<ValidationErrors> for LocationReportFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for LocationReportFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<LocationReportForm> for LocationReportFormPayload {
    type Error = LocationReportFormError;

    fn try_from(value: LocationReportForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let outcome = if value.unsupported {
            Err(PositionError::Unsupported)
        } else if let Some(code) = value.error_code {
            Err(PositionError::from_code(code))
        } else {
            match Coordinate::from_parts(value.latitude, value.longitude)? {
                Some(coordinate) => Ok(coordinate),
                None => return Err(LocationReportFormError::MissingOutcome),
            }
        };

        Ok(Self {
            high_accuracy: value.high_accuracy,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> LocationReportForm {
        LocationReportForm {
            high_accuracy: true,
            latitude: None,
            longitude: None,
            error_code: None,
            unsupported: false,
        }
    }

    #[test]
    fn position_report() {
        let mut value = form();
        value.latitude = Some(36.19);
        value.longitude = Some(44.0);

        let payload = LocationReportFormPayload::try_from(value).unwrap();

        assert!(matches!(payload.event(), GeoEvent::Resolved(_)));
    }

    #[test]
    fn error_report() {
        let mut value = form();
        value.error_code = Some(3);

        let payload = LocationReportFormPayload::try_from(value).unwrap();

        assert_eq!(payload.event(), GeoEvent::Rejected(PositionError::Timeout));
    }

    #[test]
    fn unsupported_wins() {
        let mut value = form();
        value.unsupported = true;
        value.error_code = Some(1);

        let payload = LocationReportFormPayload::try_from(value).unwrap();

        assert_eq!(payload.outcome, Err(PositionError::Unsupported));
    }

    #[test]
    fn empty_report_is_rejected() {
        let mut value = form();
        value.latitude = Some(36.19);
        assert!(matches!(
            LocationReportFormPayload::try_from(value),
            Err(LocationReportFormError::MissingOutcome)
        ));
    }
}
