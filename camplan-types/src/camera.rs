//! Camera placement and optics descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for a [`CameraSpec`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraSpecError {
    #[error("field of view {0}° must be in (0, 360]")]
    FieldOfView(f64),
    #[error("range {0} m must be positive")]
    Range(f64),
    #[error("resolution height must be positive")]
    ResolutionHeight,
    #[error("lens focal length {0} mm must be positive")]
    Lens(f64),
}

/// A point on the floor-plan canvas, in canvas pixels.
///
/// The canvas origin is the top-left corner with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CanvasPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Placement and optics of a single camera on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraSpec {
    /// Display name, e.g. "Loading dock"
    #[serde(default)]
    pub name: String,
    /// Mount position in canvas pixels
    pub position: CanvasPoint,
    /// Heading in degrees, clockwise from the +x canvas axis
    pub rotation: f64,
    /// Horizontal field of view in degrees
    pub field_of_view: f64,
    /// Maximum modelled distance in meters
    pub range: f64,
    /// Vertical sensor resolution in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_height: Option<u32>,
    /// Lens focal length in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_millimeters: Option<f64>,
    /// Optical format designation such as `1/2.8"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_size: Option<String>,
}

impl CameraSpec {
    /// Create a camera with placement only; optics are left unset.
    pub fn new(position: CanvasPoint, rotation: f64, field_of_view: f64, range: f64) -> Self {
        Self {
            name: String::new(),
            position,
            rotation,
            field_of_view,
            range,
            resolution_height: None,
            lens_millimeters: None,
            sensor_size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach optics used for DORI distance estimation.
    pub fn with_optics(
        mut self,
        resolution_height: u32,
        lens_millimeters: f64,
        sensor_size: impl Into<String>,
    ) -> Self {
        self.resolution_height = Some(resolution_height);
        self.lens_millimeters = Some(lens_millimeters);
        self.sensor_size = Some(sensor_size.into());
        self
    }

    /// Check the placement and optics invariants.
    ///
    /// NaN values are rejected.
    pub fn validate(&self) -> Result<(), CameraSpecError> {
        if !(0.0..=360.0).contains(&self.field_of_view) || self.field_of_view == 0.0 {
            return Err(CameraSpecError::FieldOfView(self.field_of_view));
        }
        if self.range.is_nan() || self.range <= 0.0 {
            return Err(CameraSpecError::Range(self.range));
        }
        if self.resolution_height == Some(0) {
            return Err(CameraSpecError::ResolutionHeight);
        }
        if let Some(lens) = self.lens_millimeters {
            if lens.is_nan() || lens <= 0.0 {
                return Err(CameraSpecError::Lens(lens));
            }
        }
        Ok(())
    }
}
