use serde::{Deserialize, Serialize};

use crate::domain::types::{Latitude, Longitude, TypeConstraintError};

/// A validated point on the earth's surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }

    /// Builds a coordinate only when both components are present.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Self>, TypeConstraintError> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Self::new(lat, lon).map(Some),
            _ => Ok(None),
        }
    }

    pub const fn lat(&self) -> f64 {
        self.latitude.get()
    }

    pub const fn lon(&self) -> f64 {
        self.longitude.get()
    }
}
