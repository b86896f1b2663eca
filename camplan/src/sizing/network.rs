//! Network bandwidth budgeting.

use camplan_types::StreamSpec;
use serde::Serialize;

use super::bitrate::compute_bitrate;
use super::policy::SizingPolicy;

/// Bandwidth contribution of a single camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraBandwidth {
    pub bitrate_kbps: u32,
    pub mbps: f64,
}

/// Aggregate network load of a camera system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAnalysis {
    pub per_camera: Vec<CameraBandwidth>,
    /// Sum of all camera streams
    pub total_mbps: f64,
    /// Total plus protocol overhead
    pub peak_mbps: f64,
    /// Expected sustained load when not every camera peaks at once
    pub average_mbps: f64,
    pub switch_recommendation: String,
}

/// Estimate network load for a set of camera streams.
pub fn analyze_network(streams: &[StreamSpec], policy: &SizingPolicy) -> NetworkAnalysis {
    let network = &policy.network;
    let per_camera: Vec<CameraBandwidth> = streams
        .iter()
        .map(|stream| {
            let bitrate_kbps = compute_bitrate(stream, &policy.bitrate);
            CameraBandwidth {
                bitrate_kbps,
                mbps: bitrate_kbps as f64 / network.kbps_per_mbps,
            }
        })
        .collect();

    let total_mbps: f64 = per_camera.iter().map(|camera| camera.mbps).sum();
    let peak_mbps = total_mbps * (1.0 + network.protocol_overhead);
    let average_mbps = total_mbps * network.average_load_factor;
    let switch_recommendation = network.switch_tiers.below(peak_mbps).clone();

    log::debug!(
        "Network: {} streams, {total_mbps:.1} Mbps total, {peak_mbps:.1} Mbps peak -> {switch_recommendation}",
        streams.len()
    );

    NetworkAnalysis {
        per_camera,
        total_mbps,
        peak_mbps,
        average_mbps,
        switch_recommendation,
    }
}
