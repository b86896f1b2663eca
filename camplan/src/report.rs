//! Whole-site report combining every engine.
//!
//! [`SiteReport::build`] evaluates a [`SitePlan`]: per-camera DORI distances
//! and coverage area, grid-sampled coverage statistics over the canvas, and
//! the network, storage, power, recorder and cabling budgets. The report is
//! `Serialize` for machine consumers and implements `Display` as an aligned
//! text summary.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::coverage::{compute_coverage_stats, CoverageError, CoverageSector, CoverageStats};
use crate::optics::{DoriResult, DoriZone};
use crate::plan::{PlannedCamera, SitePlan};
use crate::sizing::{
    analyze_network, analyze_poe, analyze_storage, compute_bitrate, estimate_cabling,
    recommend_nvr, CablingEstimate, NetworkAnalysis, NvrRecommendation, PoeAnalysis,
    PoeInput, SizingPolicy, StorageInput, SystemStorageAnalysis,
};

/// Per-camera results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraReport {
    pub name: String,
    /// `None` when the camera has no optics recorded
    pub dori: Option<DoriResult>,
    pub dori_zones: Vec<DoriZone>,
    pub coverage_area_m2: f64,
    pub bitrate_kbps: u32,
}

impl CameraReport {
    fn build(planned: &PlannedCamera, pixels_per_meter: f64, policy: &SizingPolicy) -> Self {
        let camera = &planned.camera;
        let dori = DoriResult::for_camera(camera);
        let dori_zones = dori
            .map(|result| result.zones(camera.range))
            .unwrap_or_default();
        let coverage_area_m2 = match camera.validate() {
            Ok(()) => CoverageSector::from_camera(camera, pixels_per_meter).area_m2(),
            Err(_) => 0.0,
        };

        Self {
            name: camera.name.clone(),
            dori,
            dori_zones,
            coverage_area_m2,
            bitrate_kbps: compute_bitrate(&planned.stream, &policy.bitrate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteReport {
    pub name: String,
    pub cameras: Vec<CameraReport>,
    pub coverage: CoverageStats,
    pub network: NetworkAnalysis,
    pub storage: SystemStorageAnalysis,
    pub poe: PoeAnalysis,
    pub nvr: NvrRecommendation,
    pub cabling: CablingEstimate,
}

impl SiteReport {
    /// Run every engine over a plan.
    ///
    /// Fails only when the canvas or sampling step is unusable. Cameras with
    /// invalid placement still contribute to sizing but not to coverage.
    /// Cameras without a recorded cable run count as zero-length runs.
    pub fn build(plan: &SitePlan) -> Result<Self, CoverageError> {
        let grid = plan.grid()?;
        let policy = &plan.policy;
        let pixels_per_meter = plan.coverage.pixels_per_meter;

        let cameras: Vec<CameraReport> = plan
            .cameras
            .par_iter()
            .map(|planned| CameraReport::build(planned, pixels_per_meter, policy))
            .collect();

        let coverage = compute_coverage_stats(&plan.camera_specs(), &grid, pixels_per_meter);
        let network = analyze_network(&plan.streams(), policy);

        let storage_inputs: Vec<StorageInput> = plan
            .cameras
            .iter()
            .zip(&cameras)
            .map(|(planned, camera)| {
                StorageInput::new(camera.bitrate_kbps, planned.recording_mode)
            })
            .collect();
        let storage = analyze_storage(&storage_inputs, plan.retention_days, &policy.storage);

        let poe_inputs: Vec<PoeInput> = plan.cameras.iter().map(|c| c.poe).collect();
        let poe = analyze_poe(&poe_inputs, &policy.poe);

        let nvr = recommend_nvr(plan.cameras.len(), storage.overhead_adjusted_tb, policy);

        let runs: Vec<f64> = plan
            .cameras
            .iter()
            .map(|c| c.cable_run_m.unwrap_or(0.0))
            .collect();
        let cabling = estimate_cabling(&runs, &policy.cabling);

        log::info!(
            "Built report for {:?}: {} cameras, {:.1}% coverage, {:.2} TB storage",
            plan.name,
            cameras.len(),
            coverage.total_coverage_percent,
            storage.overhead_adjusted_tb
        );

        Ok(Self {
            name: plan.name.clone(),
            cameras,
            coverage,
            network,
            storage,
            poe,
            nvr,
            cabling,
        })
    }
}

fn distance_cell(dori: Option<&DoriResult>, pick: fn(&DoriResult) -> f64) -> String {
    match dori {
        Some(result) => format!("{:.1}", pick(result)),
        None => "-".to_string(),
    }
}

impl fmt::Display for SiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            writeln!(f, "Site: {}", self.name)?;
            writeln!(f)?;
        }

        writeln!(
            f,
            "{:<20} {:>8} {:>8} {:>8} {:>8} {:>10} {:>8}",
            "Camera", "Ident m", "Recog m", "Obs m", "Detect m", "Area m2", "kbps"
        )?;
        writeln!(f, "{}", "-".repeat(76))?;
        for (index, camera) in self.cameras.iter().enumerate() {
            let name = if camera.name.is_empty() {
                format!("#{}", index + 1)
            } else {
                camera.name.clone()
            };
            let dori = camera.dori.as_ref();
            writeln!(
                f,
                "{:<20} {:>8} {:>8} {:>8} {:>8} {:>10.1} {:>8}",
                name,
                distance_cell(dori, |d| d.identification),
                distance_cell(dori, |d| d.recognition),
                distance_cell(dori, |d| d.observation),
                distance_cell(dori, |d| d.detection),
                camera.coverage_area_m2,
                camera.bitrate_kbps
            )?;
        }
        writeln!(f)?;

        let c = &self.coverage;
        writeln!(f, "Coverage ({} samples)", c.sample_count)?;
        writeln!(f, "  {:<24} {:>10.1}%", "Covered", c.total_coverage_percent)?;
        writeln!(f, "  {:<24} {:>10.1}%", "Redundant", c.redundant_coverage_percent)?;
        writeln!(f, "  {:<24} {:>11}", "Blind spots", c.blind_spot_count)?;
        writeln!(f, "  {:<24} {:>11.2}", "Average overlap", c.average_overlap)?;
        writeln!(f)?;

        let n = &self.network;
        writeln!(f, "Network")?;
        writeln!(f, "  {:<24} {:>8.1} Mbps", "Total", n.total_mbps)?;
        writeln!(f, "  {:<24} {:>8.1} Mbps", "Peak", n.peak_mbps)?;
        writeln!(f, "  {:<24} {:>8.1} Mbps", "Average", n.average_mbps)?;
        writeln!(f, "  {:<24} {}", "Switch", n.switch_recommendation)?;
        writeln!(f)?;

        let s = &self.storage;
        writeln!(f, "Storage ({} days)", s.retention_days)?;
        writeln!(f, "  {:<24} {:>10.2} GB", "Daily", s.daily_gb)?;
        writeln!(f, "  {:<24} {:>10.2} TB", "With overhead", s.overhead_adjusted_tb)?;
        writeln!(f, "  {:<24} {}", "RAID", s.raid.level)?;
        writeln!(f, "  {:<24} {:>10.2} TB", "Raw capacity", s.raw_capacity_needed_tb)?;
        writeln!(f, "  {:<24} {:>10}", "Drives", s.drive_count)?;
        writeln!(f)?;

        let p = &self.poe;
        writeln!(f, "Power")?;
        writeln!(f, "  {:<24} {:>10.1} W", "Budget", p.budget_watts)?;
        writeln!(f, "  {:<24} {}", "Switch", p.switch_recommendation)?;
        writeln!(f, "  {:<24} {:>10.0} VA", "UPS", p.ups_va)?;
        writeln!(f)?;

        let r = &self.nvr;
        writeln!(f, "Recorder")?;
        writeln!(f, "  {:<24} {:>10}", "CPU cores", r.cpu_cores)?;
        writeln!(f, "  {:<24} {:>10.1} GB", "RAM", r.ram_gb)?;
        writeln!(f, "  {:<24} {}", "Drives", r.drive_guidance)?;
        writeln!(f, "  {:<24} {:>10.0}", "Estimated cost", r.estimated_cost)?;
        writeln!(f)?;

        let cab = &self.cabling;
        writeln!(f, "Cabling")?;
        writeln!(f, "  {:<24} {:>10.1} m", "With slack", cab.total_with_slack_m)?;
        writeln!(f, "  {:<24} {:>10}", "Boxes", cab.boxes_needed)?;
        if !cab.over_length_runs.is_empty() {
            let names: Vec<&str> = cab
                .over_length_runs
                .iter()
                .filter_map(|&i| self.cameras.get(i).map(|c| c.name.as_str()))
                .collect();
            writeln!(f, "  {:<24} {}", "Needs extender", names.join(", "))?;
        }
        Ok(())
    }
}
