//! Camera coverage geometry over a floor plan.
//!
//! Cameras are modelled as circular sectors on the planning canvas and their
//! combined coverage is estimated by deterministic grid sampling.
//!
//! # Examples
//!
//! ```rust
//! use camplan::coverage::{compute_coverage_stats, CoverageConfig};
//! use camplan_types::{CameraSpec, CanvasPoint};
//!
//! let config = CoverageConfig::default();
//! let grid = config.grid(400.0, 300.0).unwrap();
//! let cameras = vec![CameraSpec::new(CanvasPoint::new(0.0, 0.0), 45.0, 90.0, 30.0)];
//!
//! let stats = compute_coverage_stats(&cameras, &grid, config.pixels_per_meter);
//! assert!(stats.total_coverage_percent > 0.0);
//! ```

pub mod config;
pub mod sampling;
pub mod sector;

pub use config::CoverageConfig;
pub use sampling::{
    compute_coverage_stats, coverage_map, CoverageError, CoverageStats, SampleGrid, MAX_SAMPLES,
};
pub use sector::CoverageSector;
