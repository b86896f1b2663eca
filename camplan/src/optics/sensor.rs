//! Optical sensor formats used by surveillance cameras.
//!
//! Camera datasheets quote sensors by their legacy "optical format" inch
//! designation (`1/2.8"`, `1/3"`, ...) rather than by physical dimensions.
//! This module maps those designations to the active-area width and height
//! needed by the DORI distance model.

use serde::Serialize;

/// Physical active area of an image sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorFormat {
    /// Datasheet designation, e.g. `1/3"`
    pub designation: &'static str,
    /// Active area width in millimeters
    pub width_mm: f64,
    /// Active area height in millimeters
    pub height_mm: f64,
}

/// Outcome of looking up a sensor designation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorResolution {
    /// Format that will be used for calculations
    pub format: SensorFormat,
    /// True when the requested designation was missing or unknown and the
    /// default format was substituted
    pub fell_back: bool,
}

impl SensorFormat {
    /// Diagonal of the active area in millimeters
    pub fn diagonal_mm(&self) -> f64 {
        self.width_mm.hypot(self.height_mm)
    }

    /// Find a known format by designation.
    ///
    /// Matching ignores surrounding whitespace and accepts the inch mark as
    /// `"`, `”`, `in` or omitted entirely.
    pub fn lookup(designation: &str) -> Option<&'static SensorFormat> {
        let wanted = normalize_designation(designation);
        models::ALL_FORMATS
            .iter()
            .find(|format| normalize_designation(format.designation) == wanted)
    }

    /// Resolve a designation, substituting [`models::DEFAULT_FORMAT`] when it
    /// is missing or unknown.
    ///
    /// Unknown formats are accepted rather than rejected so that a camera
    /// with a typo in its datasheet still gets an estimate. The substitution
    /// is logged and reported through [`SensorResolution::fell_back`].
    pub fn resolve(designation: Option<&str>) -> SensorResolution {
        match designation.and_then(Self::lookup) {
            Some(format) => SensorResolution {
                format: *format,
                fell_back: false,
            },
            None => {
                log::warn!(
                    "Unknown sensor format {:?}, assuming {}",
                    designation,
                    models::DEFAULT_FORMAT.designation
                );
                SensorResolution {
                    format: models::DEFAULT_FORMAT,
                    fell_back: true,
                }
            }
        }
    }
}

fn normalize_designation(designation: &str) -> String {
    designation
        .trim()
        .trim_end_matches("in")
        .trim_end_matches(['"', '”', '\''])
        .trim()
        .to_string()
}

/// Standard optical formats.
pub mod models {
    use super::SensorFormat;

    pub const FORMAT_1_4: SensorFormat = SensorFormat {
        designation: "1/4\"",
        width_mm: 3.2,
        height_mm: 2.4,
    };

    pub const FORMAT_1_3: SensorFormat = SensorFormat {
        designation: "1/3\"",
        width_mm: 4.8,
        height_mm: 3.6,
    };

    pub const FORMAT_1_2_9: SensorFormat = SensorFormat {
        designation: "1/2.9\"",
        width_mm: 4.96,
        height_mm: 3.72,
    };

    /// 16:9 format common on 4 MP bullet cameras
    pub const FORMAT_1_2_8: SensorFormat = SensorFormat {
        designation: "1/2.8\"",
        width_mm: 5.37,
        height_mm: 3.02,
    };

    pub const FORMAT_1_2_7: SensorFormat = SensorFormat {
        designation: "1/2.7\"",
        width_mm: 5.37,
        height_mm: 4.04,
    };

    pub const FORMAT_1_2_5: SensorFormat = SensorFormat {
        designation: "1/2.5\"",
        width_mm: 5.76,
        height_mm: 4.29,
    };

    pub const FORMAT_1_2: SensorFormat = SensorFormat {
        designation: "1/2\"",
        width_mm: 6.4,
        height_mm: 4.8,
    };

    pub const FORMAT_1_1_8: SensorFormat = SensorFormat {
        designation: "1/1.8\"",
        width_mm: 7.18,
        height_mm: 5.32,
    };

    /// Substituted for unknown designations
    pub const DEFAULT_FORMAT: SensorFormat = FORMAT_1_3;

    pub static ALL_FORMATS: [SensorFormat; 8] = [
        FORMAT_1_4,
        FORMAT_1_3,
        FORMAT_1_2_9,
        FORMAT_1_2_8,
        FORMAT_1_2_7,
        FORMAT_1_2_5,
        FORMAT_1_2,
        FORMAT_1_1_8,
    ];
}
