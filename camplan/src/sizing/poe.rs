//! Power over Ethernet budgeting, switch ports and UPS sizing.

use camplan_types::PoeStandard;
use serde::{Deserialize, Serialize};

use super::policy::PoePolicy;

/// Power draw of one camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoeInput {
    #[serde(default)]
    pub poe_standard: PoeStandard,
    /// Datasheet maximum draw; defaults to the class port budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_watts: Option<f64>,
}

impl PoeInput {
    pub fn new(poe_standard: PoeStandard, power_watts: Option<f64>) -> Self {
        Self {
            poe_standard,
            power_watts,
        }
    }

    pub fn watts(&self) -> f64 {
        self.power_watts
            .unwrap_or_else(|| self.poe_standard.port_budget_watts())
    }
}

/// Power budget of a camera system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoeAnalysis {
    pub camera_count: usize,
    /// Sum of camera draws
    pub total_watts: f64,
    /// Total with efficiency overhead; what the switch budget must cover
    pub budget_watts: f64,
    /// Highest PoE class any camera needs
    pub switch_class: Option<PoeStandard>,
    pub switch_count: u32,
    pub ports_per_switch: u32,
    pub switch_recommendation: String,
    pub ups_va: f64,
}

/// Pick a switch size: the smallest single switch that fits, otherwise
/// enough of the largest size.
fn switch_layout(camera_count: usize, port_sizes: &[u32]) -> (u32, u32) {
    let count = camera_count as u32;
    if let Some(&ports) = port_sizes.iter().find(|&&ports| count <= ports) {
        return (1, ports);
    }
    match port_sizes.last() {
        Some(&largest) if largest > 0 => (count.div_ceil(largest), largest),
        _ => (count, 1),
    }
}

/// Budget PoE power, switch ports and UPS capacity for a set of cameras.
pub fn analyze_poe(cameras: &[PoeInput], policy: &PoePolicy) -> PoeAnalysis {
    let total_watts: f64 = cameras.iter().map(PoeInput::watts).sum();
    let budget_watts = total_watts * (1.0 + policy.efficiency_overhead);
    let switch_class = cameras.iter().map(|camera| camera.poe_standard).max();

    let (switch_count, ports_per_switch) = switch_layout(cameras.len(), &policy.port_sizes);
    let class = switch_class.unwrap_or_default();
    let switch_recommendation = if switch_count == 1 {
        format!("{ports_per_switch}-port {class} switch")
    } else {
        format!("{switch_count} x {ports_per_switch}-port {class} switches")
    };

    let ups_va = if policy.ups_step_va > 0.0 {
        (budget_watts * policy.power_factor / policy.ups_step_va).ceil() * policy.ups_step_va
    } else {
        budget_watts * policy.power_factor
    };

    log::debug!(
        "PoE: {} cameras, {budget_watts:.1} W budget -> {switch_recommendation}, {ups_va} VA UPS",
        cameras.len()
    );

    PoeAnalysis {
        camera_count: cameras.len(),
        total_watts,
        budget_watts,
        switch_class,
        switch_count,
        ports_per_switch,
        switch_recommendation,
        ups_va,
    }
}
