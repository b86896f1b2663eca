//! Sampling configuration for coverage estimation.

use serde::{Deserialize, Serialize};

use super::sampling::{CoverageError, SampleGrid};

/// Default floor-plan scale in canvas pixels per meter
pub const DEFAULT_PIXELS_PER_METER: f64 = 10.0;

/// Default spacing between coverage samples in canvas pixels
pub const DEFAULT_SAMPLE_STEP_PX: f64 = 10.0;

/// Canvas scale and sampling density used for coverage estimates.
///
/// A smaller `sample_step_px` is more accurate but the sample count grows
/// with the inverse square of the step. Keep the product of cameras and
/// samples to a few million for interactive use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverageConfig {
    pub pixels_per_meter: f64,
    pub sample_step_px: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            sample_step_px: DEFAULT_SAMPLE_STEP_PX,
        }
    }
}

impl CoverageConfig {
    /// Sample grid for a canvas of the given size.
    pub fn grid(
        &self,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Result<SampleGrid, CoverageError> {
        SampleGrid::new(canvas_width, canvas_height, self.sample_step_px)
    }
}
