//! DORI (Detection, Observation, Recognition, Identification) distance bands.
//!
//! IEC/EN 62676-4 grades how useful a camera image is by the pixel density
//! it puts on a standing person. Each band requires a minimum number of
//! pixels per meter of target height; for fixed optics the density falls off
//! linearly with distance, so every band maps to a maximum distance.
//!
//! # Distance model
//!
//! A target of height `H` at distance `d` spans
//!
//! ```text
//! pixels = resolution_height_px * lens_mm / (sensor_height_mm * d) * H
//! ```
//!
//! Solving for the distance at which `pixels` equals the band requirement
//! `ppm * H` gives
//!
//! ```text
//! d = (resolution_height_px / (ppm * H)) * (lens_mm / sensor_height_mm) * H
//! ```
//!
//! # Examples
//!
//! ```rust
//! use camplan::optics::dori::{compute_distances, level_at_distance, DoriBand};
//!
//! let result = compute_distances(1080, 4.0, Some("1/3\""));
//! assert_eq!(result.identification, 4.8);
//! assert_eq!(level_at_distance(4.8, &result), Some(DoriBand::Identification));
//! ```

use camplan_types::CameraSpec;
use serde::Serialize;

use super::sensor::SensorFormat;

/// Reference height of a standing person in meters
pub const TARGET_HEIGHT_M: f64 = 1.75;

/// DORI classification levels, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DoriBand {
    Identification,
    Recognition,
    Observation,
    Detection,
}

impl DoriBand {
    /// Bands in order of decreasing pixel-density requirement
    pub const ALL: [DoriBand; 4] = [
        DoriBand::Identification,
        DoriBand::Recognition,
        DoriBand::Observation,
        DoriBand::Detection,
    ];

    /// Required pixels per meter of target height
    pub fn threshold_ppm(&self) -> f64 {
        match self {
            DoriBand::Identification => 250.0,
            DoriBand::Recognition => 125.0,
            DoriBand::Observation => 62.0,
            DoriBand::Detection => 25.0,
        }
    }

    /// Overlay colour used when drawing the band on a floor plan
    pub fn color(&self) -> &'static str {
        match self {
            DoriBand::Identification => "#22c55e",
            DoriBand::Recognition => "#3b82f6",
            DoriBand::Observation => "#f59e0b",
            DoriBand::Detection => "#ef4444",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoriBand::Identification => "Identification",
            DoriBand::Recognition => "Recognition",
            DoriBand::Observation => "Observation",
            DoriBand::Detection => "Detection",
        }
    }
}

impl std::fmt::Display for DoriBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maximum distance in meters at which each band is still achieved.
///
/// Distances grow from identification to detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoriResult {
    pub identification: f64,
    pub recognition: f64,
    pub observation: f64,
    pub detection: f64,
}

/// One ring of a camera's DORI overlay, in meters from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoriZone {
    pub band: DoriBand,
    pub inner_m: f64,
    pub outer_m: f64,
}

impl DoriResult {
    /// Distance threshold for a single band
    pub fn distance(&self, band: DoriBand) -> f64 {
        match band {
            DoriBand::Identification => self.identification,
            DoriBand::Recognition => self.recognition,
            DoriBand::Observation => self.observation,
            DoriBand::Detection => self.detection,
        }
    }

    /// Derive DORI distances from a camera's optics.
    ///
    /// Returns `None` when the camera has no resolution or lens recorded, or
    /// fails [`CameraSpec::validate`]. A missing or unknown sensor
    /// designation falls back to the default format.
    pub fn for_camera(camera: &CameraSpec) -> Option<Self> {
        if let Err(e) = camera.validate() {
            log::warn!("No DORI distances for camera {:?}: {e}", camera.name);
            return None;
        }
        let resolution = camera.resolution_height?;
        let lens = camera.lens_millimeters?;
        Some(compute_distances(
            resolution,
            lens,
            camera.sensor_size.as_deref(),
        ))
    }

    /// Concentric band rings clipped to the camera's modelled range.
    ///
    /// Rings that fall entirely beyond `range_m` are omitted.
    pub fn zones(&self, range_m: f64) -> Vec<DoriZone> {
        let mut zones = Vec::with_capacity(DoriBand::ALL.len());
        let mut inner = 0.0;
        for band in DoriBand::ALL {
            if inner >= range_m {
                break;
            }
            let outer = self.distance(band).min(range_m);
            if outer > inner {
                zones.push(DoriZone {
                    band,
                    inner_m: inner,
                    outer_m: outer,
                });
                inner = outer;
            }
        }
        zones
    }
}

/// Compute DORI distances for a known sensor format.
pub fn compute_distances_for_format(
    resolution_height_px: u32,
    lens_mm: f64,
    sensor: &SensorFormat,
) -> DoriResult {
    let band_distance = |band: DoriBand| {
        let required_pixels = band.threshold_ppm() * TARGET_HEIGHT_M;
        let distance = (resolution_height_px as f64 / required_pixels)
            * (lens_mm / sensor.height_mm)
            * TARGET_HEIGHT_M;
        round_to_tenth(distance)
    };

    DoriResult {
        identification: band_distance(DoriBand::Identification),
        recognition: band_distance(DoriBand::Recognition),
        observation: band_distance(DoriBand::Observation),
        detection: band_distance(DoriBand::Detection),
    }
}

/// Compute DORI distances for a camera's resolution, lens and sensor
/// designation.
///
/// The designation is resolved through [`SensorFormat::resolve`] first, so a
/// missing or unrecognised format is computed as `1/3"` instead of failing.
pub fn compute_distances(
    resolution_height_px: u32,
    lens_mm: f64,
    sensor_size: Option<&str>,
) -> DoriResult {
    let sensor = SensorFormat::resolve(sensor_size).format;
    let result = compute_distances_for_format(resolution_height_px, lens_mm, &sensor);
    log::debug!(
        "DORI for {resolution_height_px}px / {lens_mm}mm / {}: {result:?}",
        sensor.designation
    );
    result
}

/// The most specific band achieved at `distance_m`, if any.
///
/// A distance exactly on a threshold belongs to that band.
pub fn level_at_distance(distance_m: f64, result: &DoriResult) -> Option<DoriBand> {
    DoriBand::ALL
        .into_iter()
        .find(|band| distance_m <= result.distance(*band))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
