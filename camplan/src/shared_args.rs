//! Command line helpers shared by the planning binaries.

use std::path::PathBuf;

use clap::Args;

use crate::plan::{PlanError, SitePlan};

/// Parse a strictly positive, finite number
pub fn parse_positive_f64(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid numeric value: {s}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("Value must be positive, got {value}"));
    }
    Ok(value)
}

/// Plan file selection plus overrides applied after loading.
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Site plan JSON file
    #[arg(long)]
    pub plan: PathBuf,

    /// Coverage sample spacing in canvas pixels (overrides the plan)
    #[arg(long, value_parser = parse_positive_f64)]
    pub step: Option<f64>,

    /// Footage retention in days (overrides the plan)
    #[arg(long)]
    pub retention_days: Option<u32>,
}

impl PlanArgs {
    /// Load the plan and apply command line overrides.
    pub fn load(&self) -> Result<SitePlan, PlanError> {
        let mut plan = SitePlan::load_from_file(&self.plan)?;
        if let Some(step) = self.step {
            plan.coverage.sample_step_px = step;
        }
        if let Some(days) = self.retention_days {
            plan.retention_days = days;
        }
        Ok(plan)
    }
}
