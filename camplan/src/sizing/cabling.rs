//! Structured cabling estimate for camera runs.

use serde::Serialize;

use super::policy::CablingPolicy;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CablingEstimate {
    pub run_count: usize,
    pub total_run_m: f64,
    /// Total including service-loop slack
    pub total_with_slack_m: f64,
    pub boxes_needed: u32,
    /// Indices of runs longer than one Ethernet segment allows
    pub over_length_runs: Vec<usize>,
}

/// Estimate cable purchase for a list of run lengths in meters.
pub fn estimate_cabling(runs_m: &[f64], policy: &CablingPolicy) -> CablingEstimate {
    let total_run_m: f64 = runs_m.iter().sum();
    let total_with_slack_m = total_run_m * (1.0 + policy.slack_fraction);
    let boxes_needed = if policy.box_length_m > 0.0 {
        (total_with_slack_m / policy.box_length_m).ceil() as u32
    } else {
        0
    };

    let over_length_runs: Vec<usize> = runs_m
        .iter()
        .enumerate()
        .filter(|(_, &run)| run > policy.max_run_m)
        .map(|(index, _)| index)
        .collect();
    for &index in &over_length_runs {
        log::warn!(
            "Cable run {index} is {:.0} m, over the {:.0} m segment limit; plan an extender",
            runs_m[index],
            policy.max_run_m
        );
    }

    CablingEstimate {
        run_count: runs_m.len(),
        total_run_m,
        total_with_slack_m,
        boxes_needed,
        over_length_runs,
    }
}
