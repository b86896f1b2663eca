//! Immutable sizing policy tables.
//!
//! Every constant the sizing formulas depend on lives here so that the
//! formulas stay pure functions of their inputs plus a policy reference.
//! [`SizingPolicy::default`] holds the standard planning values; a site plan
//! may override any subset of them.

use std::fmt;

use camplan_types::{Codec, RecordingMode, SceneComplexity};
use serde::{Deserialize, Serialize};

/// Ordered breakpoint table with a catch-all final bucket.
///
/// `limits` must be sorted by ascending bound. Lookups return the first
/// bucket whose bound admits the value, or `otherwise`, so every input maps
/// to some bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints<T> {
    pub limits: Vec<(f64, T)>,
    pub otherwise: T,
}

impl<T> Breakpoints<T> {
    pub fn new(limits: Vec<(f64, T)>, otherwise: T) -> Self {
        Self { limits, otherwise }
    }

    /// First bucket with `value < bound`
    pub fn below(&self, value: f64) -> &T {
        self.limits
            .iter()
            .find(|(bound, _)| value < *bound)
            .map(|(_, bucket)| bucket)
            .unwrap_or(&self.otherwise)
    }

    /// First bucket with `value <= bound`
    pub fn at_most(&self, value: f64) -> &T {
        self.limits
            .iter()
            .find(|(bound, _)| value <= *bound)
            .map(|(_, bucket)| bucket)
            .unwrap_or(&self.otherwise)
    }
}

/// Bitrate model coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BitratePolicy {
    /// H.264 bitrate of one megapixel at the baseline frame rate
    pub kbps_per_megapixel: f64,
    pub baseline_fps: f64,
    pub h264_factor: f64,
    pub h265_factor: f64,
    pub low_complexity_factor: f64,
    pub medium_complexity_factor: f64,
    pub high_complexity_factor: f64,
}

impl Default for BitratePolicy {
    fn default() -> Self {
        Self {
            kbps_per_megapixel: 1024.0,
            baseline_fps: 30.0,
            h264_factor: 1.0,
            h265_factor: 0.5,
            low_complexity_factor: 0.7,
            medium_complexity_factor: 1.0,
            high_complexity_factor: 1.3,
        }
    }
}

impl BitratePolicy {
    pub fn codec_factor(&self, codec: Codec) -> f64 {
        match codec {
            Codec::H264 => self.h264_factor,
            Codec::H265 => self.h265_factor,
        }
    }

    pub fn complexity_factor(&self, complexity: SceneComplexity) -> f64 {
        match complexity {
            SceneComplexity::Low => self.low_complexity_factor,
            SceneComplexity::Medium => self.medium_complexity_factor,
            SceneComplexity::High => self.high_complexity_factor,
        }
    }
}

/// Network load assumptions and switch tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkPolicy {
    pub kbps_per_mbps: f64,
    /// Extra load from RTP/TCP/IP headers and retransmits
    pub protocol_overhead: f64,
    /// Fraction of the summed bitrate expected on average
    pub average_load_factor: f64,
    /// Switch class keyed on peak Mbps
    pub switch_tiers: Breakpoints<String>,
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self {
            kbps_per_mbps: 1024.0,
            protocol_overhead: 0.10,
            average_load_factor: 0.80,
            switch_tiers: Breakpoints::new(
                vec![
                    (100.0, "Gigabit Switch".to_string()),
                    (500.0, "Gigabit Switch with 10G Uplink".to_string()),
                ],
                "10 Gigabit Core Switch".to_string(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidLevel {
    #[serde(rename = "RAID 1")]
    Raid1,
    #[serde(rename = "RAID 5")]
    Raid5,
    #[serde(rename = "RAID 6")]
    Raid6,
    #[serde(rename = "RAID 10")]
    Raid10,
}

impl fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RaidLevel::Raid1 => write!(f, "RAID 1"),
            RaidLevel::Raid5 => write!(f, "RAID 5"),
            RaidLevel::Raid6 => write!(f, "RAID 6"),
            RaidLevel::Raid10 => write!(f, "RAID 10"),
        }
    }
}

/// A redundancy scheme and its capacity characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidTier {
    pub level: RaidLevel,
    /// Fraction of raw capacity available for footage
    pub usable_fraction: f64,
    pub min_drives: u32,
    pub drive_guidance: String,
}

impl RaidTier {
    fn new(level: RaidLevel, usable_fraction: f64, min_drives: u32, guidance: &str) -> Self {
        Self {
            level,
            usable_fraction,
            min_drives,
            drive_guidance: guidance.to_string(),
        }
    }

    /// Fraction of raw capacity consumed by redundancy
    pub fn overhead_fraction(&self) -> f64 {
        1.0 - self.usable_fraction
    }
}

/// Per-mode fraction of the day a camera records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DutyCycles {
    pub continuous: f64,
    pub scheduled: f64,
    pub motion: f64,
    pub event: f64,
}

impl Default for DutyCycles {
    fn default() -> Self {
        Self {
            continuous: 1.0,
            scheduled: 0.5,
            motion: 0.3,
            event: 0.2,
        }
    }
}

impl DutyCycles {
    pub fn for_mode(&self, mode: RecordingMode) -> f64 {
        match mode {
            RecordingMode::Continuous => self.continuous,
            RecordingMode::Scheduled => self.scheduled,
            RecordingMode::Motion => self.motion,
            RecordingMode::Event => self.event,
        }
    }
}

/// Recording storage assumptions and RAID tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoragePolicy {
    pub duty_cycles: DutyCycles,
    /// Filesystem and index overhead on top of raw footage
    pub filesystem_overhead: f64,
    pub gb_per_tb: f64,
    /// Capacity of one recorder drive
    pub drive_size_tb: f64,
    /// RAID tier keyed on overhead-adjusted TB, lower bound exclusive
    pub raid_tiers: Breakpoints<RaidTier>,
}

impl Default for StoragePolicy {
    fn default() -> Self {
        Self {
            duty_cycles: DutyCycles::default(),
            filesystem_overhead: 0.15,
            gb_per_tb: 1024.0,
            drive_size_tb: 8.0,
            raid_tiers: Breakpoints::new(
                vec![
                    (4.0, RaidTier::new(RaidLevel::Raid1, 0.50, 2, "2 drives, mirrored")),
                    (12.0, RaidTier::new(RaidLevel::Raid5, 0.75, 3, "3-4 drives")),
                    (30.0, RaidTier::new(RaidLevel::Raid6, 0.67, 4, "6-8 drives")),
                ],
                RaidTier::new(RaidLevel::Raid10, 0.50, 4, "8+ drives in mirrored pairs"),
            ),
        }
    }
}

/// Power budgeting assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoePolicy {
    /// Headroom for cable loss and power-supply efficiency
    pub efficiency_overhead: f64,
    /// Watts to VA conversion for UPS sizing
    pub power_factor: f64,
    pub ups_step_va: f64,
    /// Available switch port counts, ascending; the last one is stacked
    /// when a single switch is not enough
    pub port_sizes: Vec<u32>,
}

impl Default for PoePolicy {
    fn default() -> Self {
        Self {
            efficiency_overhead: 0.20,
            power_factor: 1.4,
            ups_step_va: 500.0,
            port_sizes: vec![8, 16, 24],
        }
    }
}

/// NVR hardware and cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NvrPolicy {
    /// CPU cores keyed on camera count, upper bound inclusive
    pub cpu_cores: Breakpoints<u32>,
    pub base_ram_gb: f64,
    pub ram_gb_per_camera: f64,
    pub base_cost: f64,
    pub cost_per_core: f64,
    pub cost_per_gb_ram: f64,
    pub cost_per_tb: f64,
    pub raid_controller_cost: f64,
    /// Storage at or above which a hardware RAID controller is fitted
    pub raid_controller_min_tb: f64,
}

impl Default for NvrPolicy {
    fn default() -> Self {
        Self {
            cpu_cores: Breakpoints::new(vec![(16.0, 4), (32.0, 8), (64.0, 16)], 32),
            base_ram_gb: 4.0,
            ram_gb_per_camera: 0.5,
            base_cost: 500.0,
            cost_per_core: 150.0,
            cost_per_gb_ram: 10.0,
            cost_per_tb: 30.0,
            raid_controller_cost: 300.0,
            raid_controller_min_tb: 4.0,
        }
    }
}

/// Structured cabling assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CablingPolicy {
    /// Extra length for service loops and routing
    pub slack_fraction: f64,
    pub box_length_m: f64,
    /// Longest run a single Ethernet segment supports
    pub max_run_m: f64,
}

impl Default for CablingPolicy {
    fn default() -> Self {
        Self {
            slack_fraction: 0.10,
            box_length_m: 305.0,
            max_run_m: 100.0,
        }
    }
}

/// All sizing tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizingPolicy {
    pub bitrate: BitratePolicy,
    pub network: NetworkPolicy,
    pub storage: StoragePolicy,
    pub poe: PoePolicy,
    pub nvr: NvrPolicy,
    pub cabling: CablingPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_below_is_exclusive() {
        let table = Breakpoints::new(vec![(4.0, "small"), (12.0, "medium")], "large");
        assert_eq!(*table.below(3.99), "small");
        assert_eq!(*table.below(4.0), "medium");
        assert_eq!(*table.below(12.0), "large");
        assert_eq!(*table.below(f64::INFINITY), "large");
    }

    #[test]
    fn test_breakpoints_at_most_is_inclusive() {
        let table = Breakpoints::new(vec![(16.0, 4), (32.0, 8)], 16);
        assert_eq!(*table.at_most(16.0), 4);
        assert_eq!(*table.at_most(17.0), 8);
        assert_eq!(*table.at_most(1000.0), 16);
    }

    #[test]
    fn test_default_raid_tiers() {
        let tiers = &StoragePolicy::default().raid_tiers;
        assert_eq!(tiers.below(0.0).level, RaidLevel::Raid1);
        assert_eq!(tiers.below(11.9).level, RaidLevel::Raid5);
        assert_eq!(tiers.below(29.9).level, RaidLevel::Raid6);
        assert_eq!(tiers.below(30.0).level, RaidLevel::Raid10);
        assert!((tiers.below(20.0).overhead_fraction() - 0.33).abs() < 1e-9);
    }

    #[test]
    fn test_partial_policy_override() {
        let json = r#"{
            "storage": {"filesystemOverhead": 0.2, "dutyCycles": {"motion": 0.4}},
            "nvr": {"raidControllerMinTb": 8.0}
        }"#;
        let policy: SizingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.storage.filesystem_overhead, 0.2);
        assert_eq!(policy.storage.duty_cycles.motion, 0.4);
        assert_eq!(policy.storage.duty_cycles.event, 0.2);
        assert_eq!(policy.nvr.raid_controller_min_tb, 8.0);
        assert_eq!(policy.network, NetworkPolicy::default());
    }

    #[test]
    fn test_policy_keys_are_camel_case() {
        let value = serde_json::to_value(SizingPolicy::default()).unwrap();
        assert_eq!(value["network"]["kbpsPerMbps"], 1024.0);
        assert_eq!(value["storage"]["gbPerTb"], 1024.0);
        assert_eq!(value["storage"]["raidTiers"]["otherwise"]["minDrives"], 4);
        assert_eq!(value["poe"]["portSizes"][2], 24);
        assert!(value["storage"].get("filesystem_overhead").is_none());
    }
}
