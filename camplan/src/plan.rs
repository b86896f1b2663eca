//! Site plan files.
//!
//! A site plan is the JSON document a floor-plan editor saves: canvas size,
//! sampling configuration, cameras with their stream and power settings,
//! retention and optional overrides of the sizing policy. Omitted sections
//! fall back to their defaults so a minimal plan only needs a canvas and
//! camera positions.

use std::path::Path;

use camplan_types::{CameraSpec, RecordingMode, StreamSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coverage::{CoverageConfig, CoverageError, SampleGrid};
use crate::sizing::{PoeInput, SizingPolicy};

/// Retention used when a plan does not specify one
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to access plan file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A camera placed on the plan together with its recording settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCamera {
    #[serde(flatten)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub stream: StreamSpec,
    #[serde(default)]
    pub recording_mode: RecordingMode,
    #[serde(default)]
    pub poe: PoeInput,
    /// Cable length back to the switch in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cable_run_m: Option<f64>,
}

impl PlannedCamera {
    pub fn new(camera: CameraSpec) -> Self {
        Self {
            camera,
            stream: StreamSpec::default(),
            recording_mode: RecordingMode::default(),
            poe: PoeInput::default(),
            cable_run_m: None,
        }
    }

    pub fn with_stream(mut self, stream: StreamSpec, recording_mode: RecordingMode) -> Self {
        self.stream = stream;
        self.recording_mode = recording_mode;
        self
    }

    pub fn with_poe(mut self, poe: PoeInput) -> Self {
        self.poe = poe;
        self
    }

    pub fn with_cable_run(mut self, meters: f64) -> Self {
        self.cable_run_m = Some(meters);
        self
    }
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePlan {
    #[serde(default)]
    pub name: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub cameras: Vec<PlannedCamera>,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default)]
    pub policy: SizingPolicy,
}

impl SitePlan {
    /// An empty plan for a canvas, with default sampling and policy.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            name: String::new(),
            canvas_width,
            canvas_height,
            coverage: CoverageConfig::default(),
            cameras: Vec::new(),
            retention_days: DEFAULT_RETENTION_DAYS,
            policy: SizingPolicy::default(),
        }
    }

    pub fn with_camera(mut self, camera: PlannedCamera) -> Self {
        self.cameras.push(camera);
        self
    }

    /// Camera geometry without the recording settings
    pub fn camera_specs(&self) -> Vec<CameraSpec> {
        self.cameras.iter().map(|c| c.camera.clone()).collect()
    }

    pub fn streams(&self) -> Vec<StreamSpec> {
        self.cameras.iter().map(|c| c.stream.clone()).collect()
    }

    /// Sample grid over the plan canvas
    pub fn grid(&self) -> Result<SampleGrid, CoverageError> {
        self.coverage.grid(self.canvas_width, self.canvas_height)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), PlanError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PlanError> {
        let json = std::fs::read_to_string(path)?;
        let plan: SitePlan = serde_json::from_str(&json)?;
        log::debug!(
            "Loaded plan {:?} with {} cameras from {}",
            plan.name,
            plan.cameras.len(),
            path.display()
        );
        Ok(plan)
    }
}
