//! Recording storage and RAID sizing.
//!
//! Daily footage per camera is
//!
//! ```text
//! daily_gb = bitrate_kbps * 86400 * duty_cycle / (8 * 1024 * 1024)
//! ```
//!
//! Totals over the retention period get a filesystem overhead added, then a
//! RAID tier is chosen on the overhead-adjusted size and the raw drive
//! capacity is back-solved from the tier's redundancy overhead.

use camplan_types::RecordingMode;
use serde::{Deserialize, Serialize};

use super::policy::{RaidLevel, RaidTier, StoragePolicy};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// kbit per GB: 8 bits per byte, 1024 * 1024 kB per GB
const KBIT_PER_GB: f64 = 8.0 * 1024.0 * 1024.0;

/// Recording parameters of one camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInput {
    pub bitrate_kbps: u32,
    pub recording_mode: RecordingMode,
}

impl StorageInput {
    pub fn new(bitrate_kbps: u32, recording_mode: RecordingMode) -> Self {
        Self {
            bitrate_kbps,
            recording_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStorage {
    pub bitrate_kbps: u32,
    pub recording_mode: RecordingMode,
    pub daily_gb: f64,
    /// Footage over the full retention period
    pub total_gb: f64,
}

/// Storage requirement of the whole recorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStorageAnalysis {
    pub per_camera: Vec<CameraStorage>,
    pub retention_days: u32,
    pub daily_gb: f64,
    pub total_storage_gb: f64,
    /// Total plus filesystem and index overhead
    pub overhead_adjusted_gb: f64,
    pub overhead_adjusted_tb: f64,
    pub raid: RaidTier,
    /// Drive capacity to purchase before RAID redundancy
    pub raw_capacity_needed_tb: f64,
    pub drive_count: u32,
}

/// Footage written per day by one camera, in GB.
pub fn daily_storage_gb(camera: &StorageInput, policy: &StoragePolicy) -> f64 {
    let duty_cycle = policy.duty_cycles.for_mode(camera.recording_mode);
    camera.bitrate_kbps as f64 * SECONDS_PER_DAY * duty_cycle / KBIT_PER_GB
}

/// RAID tier for an overhead-adjusted capacity in TB.
///
/// Each tier's lower bound is exclusive: exactly 4 TB is past the first tier.
pub fn select_raid_tier(overhead_adjusted_tb: f64, policy: &StoragePolicy) -> &RaidTier {
    policy.raid_tiers.below(overhead_adjusted_tb)
}

/// Drives needed to provide `raw_tb` under a RAID tier.
fn drive_count(raid: &RaidTier, raw_tb: f64, drive_size_tb: f64) -> u32 {
    let by_capacity = if drive_size_tb > 0.0 {
        (raw_tb / drive_size_tb).ceil() as u32
    } else {
        0
    };
    let count = by_capacity.max(raid.min_drives);
    match raid.level {
        // Mirrored pairs
        RaidLevel::Raid10 => count + count % 2,
        _ => count,
    }
}

/// Size recorder storage for a set of cameras and a retention period.
pub fn analyze_storage(
    cameras: &[StorageInput],
    retention_days: u32,
    policy: &StoragePolicy,
) -> SystemStorageAnalysis {
    let days = retention_days as f64;
    let per_camera: Vec<CameraStorage> = cameras
        .iter()
        .map(|camera| {
            let daily_gb = daily_storage_gb(camera, policy);
            CameraStorage {
                bitrate_kbps: camera.bitrate_kbps,
                recording_mode: camera.recording_mode,
                daily_gb,
                total_gb: daily_gb * days,
            }
        })
        .collect();

    let daily_gb: f64 = per_camera.iter().map(|camera| camera.daily_gb).sum();
    let total_storage_gb: f64 = per_camera.iter().map(|camera| camera.total_gb).sum();
    let overhead_adjusted_gb = total_storage_gb * (1.0 + policy.filesystem_overhead);
    let overhead_adjusted_tb = overhead_adjusted_gb / policy.gb_per_tb;

    let raid = select_raid_tier(overhead_adjusted_tb, policy).clone();
    let raw_capacity_needed_tb = overhead_adjusted_tb / (1.0 - raid.overhead_fraction());
    let drive_count = drive_count(&raid, raw_capacity_needed_tb, policy.drive_size_tb);

    log::debug!(
        "Storage: {} cameras x {retention_days} days = {overhead_adjusted_tb:.2} TB -> {} ({raw_capacity_needed_tb:.2} TB raw, {drive_count} drives)",
        cameras.len(),
        raid.level
    );

    SystemStorageAnalysis {
        per_camera,
        retention_days,
        daily_gb,
        total_storage_gb,
        overhead_adjusted_gb,
        overhead_adjusted_tb,
        raid,
        raw_capacity_needed_tb,
        drive_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_motion_camera_thirty_days() {
        let policy = StoragePolicy::default();
        let camera = StorageInput::new(2048, RecordingMode::Motion);

        // 2048 * 86400 * 0.3 / 8388608
        assert_relative_eq!(daily_storage_gb(&camera, &policy), 6.328125, epsilon = 1e-12);

        let analysis = analyze_storage(&[camera], 30, &policy);
        assert_relative_eq!(analysis.per_camera[0].daily_gb, 6.328125, epsilon = 1e-12);
        assert_relative_eq!(analysis.total_storage_gb, 189.84375, epsilon = 1e-9);
        assert_relative_eq!(analysis.overhead_adjusted_gb, 189.84375 * 1.15, epsilon = 1e-9);
        assert_eq!(analysis.raid.level, RaidLevel::Raid1);
        assert_eq!(analysis.drive_count, 2);
    }

    #[test]
    fn test_duty_cycles_scale_daily_footage() {
        let policy = StoragePolicy::default();
        let daily = |mode| daily_storage_gb(&StorageInput::new(4096, mode), &policy);
        let continuous = daily(RecordingMode::Continuous);
        let scheduled = daily(RecordingMode::Scheduled);
        let event = daily(RecordingMode::Event);
        assert_relative_eq!(scheduled, continuous * 0.5);
        assert_relative_eq!(event, continuous * 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_four_terabytes_selects_raid5() {
        let policy = StoragePolicy::default();
        assert_eq!(select_raid_tier(3.999, &policy).level, RaidLevel::Raid1);
        assert_eq!(select_raid_tier(4.0, &policy).level, RaidLevel::Raid5);
        assert_eq!(select_raid_tier(12.0, &policy).level, RaidLevel::Raid6);
        assert_eq!(select_raid_tier(30.0, &policy).level, RaidLevel::Raid10);
    }

    #[test]
    fn test_raw_capacity_back_solved_from_raid_overhead() {
        let policy = StoragePolicy::default();
        // 16 continuous 4 Mbps cameras for 30 days
        let cameras = vec![StorageInput::new(4096, RecordingMode::Continuous); 16];
        let analysis = analyze_storage(&cameras, 30, &policy);

        assert_eq!(analysis.raid.level, RaidLevel::Raid6);
        assert_relative_eq!(
            analysis.raw_capacity_needed_tb,
            analysis.overhead_adjusted_tb / 0.67,
            epsilon = 1e-9
        );
        assert!(analysis.drive_count >= 4);
    }

    #[test]
    fn test_raid10_uses_even_drive_count() {
        let policy = StoragePolicy::default();
        let cameras = vec![StorageInput::new(8192, RecordingMode::Continuous); 40];
        let analysis = analyze_storage(&cameras, 30, &policy);

        assert_eq!(analysis.raid.level, RaidLevel::Raid10);
        assert_eq!(analysis.drive_count % 2, 0);
        let purchased_tb = analysis.drive_count as f64 * policy.drive_size_tb;
        assert!(purchased_tb >= analysis.raw_capacity_needed_tb);
    }

    #[test]
    fn test_no_cameras() {
        let analysis = analyze_storage(&[], 30, &StoragePolicy::default());
        assert_eq!(analysis.total_storage_gb, 0.0);
        assert_eq!(analysis.raid.level, RaidLevel::Raid1);
        assert_eq!(analysis.raw_capacity_needed_tb, 0.0);
        assert_eq!(analysis.drive_count, 2);
    }
}
