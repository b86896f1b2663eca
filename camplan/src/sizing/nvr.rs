//! Network video recorder hardware recommendation.

use serde::Serialize;

use super::policy::SizingPolicy;

/// Recorder specification and budget estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NvrRecommendation {
    pub camera_count: usize,
    pub cpu_cores: u32,
    pub ram_gb: f64,
    pub storage_tb: f64,
    pub drive_guidance: String,
    pub raid_controller: bool,
    pub estimated_cost: f64,
}

/// Recommend recorder hardware for a camera count and storage requirement.
///
/// Cost is a linear model over the base unit, cores, RAM and storage, plus a
/// hardware RAID controller once storage reaches the controller threshold.
pub fn recommend_nvr(
    camera_count: usize,
    total_storage_tb: f64,
    policy: &SizingPolicy,
) -> NvrRecommendation {
    let nvr = &policy.nvr;
    let cpu_cores = *nvr.cpu_cores.at_most(camera_count as f64);
    let ram_gb = nvr.base_ram_gb + nvr.ram_gb_per_camera * camera_count as f64;
    let drive_guidance = policy
        .storage
        .raid_tiers
        .below(total_storage_tb)
        .drive_guidance
        .clone();
    let raid_controller = total_storage_tb >= nvr.raid_controller_min_tb;

    let mut estimated_cost = nvr.base_cost
        + nvr.cost_per_core * cpu_cores as f64
        + nvr.cost_per_gb_ram * ram_gb
        + nvr.cost_per_tb * total_storage_tb;
    if raid_controller {
        estimated_cost += nvr.raid_controller_cost;
    }

    NvrRecommendation {
        camera_count,
        cpu_cores,
        ram_gb,
        storage_tb: total_storage_tb,
        drive_guidance,
        raid_controller,
        estimated_cost,
    }
}
