//! Streaming, recording and power descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Video compression standard of a camera stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Codec {
    #[default]
    #[serde(rename = "H.264", alias = "h264")]
    H264,
    #[serde(rename = "H.265", alias = "h265")]
    H265,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Codec::H264 => write!(f, "H.264"),
            Codec::H265 => write!(f, "H.265"),
        }
    }
}

/// Amount of motion and detail in the scene, which drives encoder output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneComplexity {
    Low,
    #[default]
    Medium,
    High,
}

/// When the recorder writes footage for a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingMode {
    #[default]
    Continuous,
    Scheduled,
    Motion,
    Event,
}

impl fmt::Display for RecordingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RecordingMode::Continuous => "continuous",
            RecordingMode::Scheduled => "scheduled",
            RecordingMode::Motion => "motion",
            RecordingMode::Event => "event",
        };
        f.write_str(name)
    }
}

/// Power over Ethernet class a camera draws from its switch port.
///
/// Variants are ordered by power budget so the highest class in a set can be
/// found with `max()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PoeStandard {
    /// IEEE 802.3af
    #[default]
    #[serde(rename = "PoE", alias = "poe")]
    Poe,
    /// IEEE 802.3at
    #[serde(rename = "PoE+", alias = "poe+")]
    PoePlus,
    /// IEEE 802.3bt
    #[serde(rename = "PoE++", alias = "poe++")]
    PoePlusPlus,
}

impl PoeStandard {
    /// Maximum power delivered at the switch port, in watts.
    pub fn port_budget_watts(&self) -> f64 {
        match self {
            PoeStandard::Poe => 15.4,
            PoeStandard::PoePlus => 30.0,
            PoeStandard::PoePlusPlus => 60.0,
        }
    }
}

impl fmt::Display for PoeStandard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PoeStandard::Poe => write!(f, "PoE"),
            PoeStandard::PoePlus => write!(f, "PoE+"),
            PoeStandard::PoePlusPlus => write!(f, "PoE++"),
        }
    }
}

/// Per-camera streaming parameters used for bandwidth estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamSpec {
    pub resolution_megapixels: f64,
    pub fps: f64,
    #[serde(default)]
    pub codec: Codec,
    #[serde(default)]
    pub scene_complexity: SceneComplexity,
    /// Datasheet bitrate; when present it is used as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate_kbps: Option<u32>,
}

impl StreamSpec {
    pub fn new(
        resolution_megapixels: f64,
        fps: f64,
        codec: Codec,
        scene_complexity: SceneComplexity,
    ) -> Self {
        Self {
            resolution_megapixels,
            fps,
            codec,
            scene_complexity,
            bitrate_kbps: None,
        }
    }

    /// Pin the stream to a known bitrate.
    pub fn with_bitrate_kbps(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = Some(bitrate_kbps);
        self
    }
}

impl Default for StreamSpec {
    /// 1080p at 15 fps, H.264, medium scene
    fn default() -> Self {
        Self::new(2.0, 15.0, Codec::H264, SceneComplexity::Medium)
    }
}
