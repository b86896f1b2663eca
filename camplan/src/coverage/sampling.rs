//! Grid-sampled coverage statistics.
//!
//! Exact unions of many circular sectors are not needed for planning output,
//! so coverage is estimated on a regular grid of sample points. Every point
//! records how many camera sectors contain it and the aggregate statistics
//! are derived from those counts.
//!
//! Runtime is `O(cameras × samples)` with
//! `samples = ceil(width / step) × ceil(height / step)`. Rows of the grid are
//! filled in parallel; counts are integers so the result does not depend on
//! scheduling.

use camplan_types::CameraSpec;
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sector::CoverageSector;

/// Errors building a sample grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    #[error("Canvas dimensions must be positive, got {0}x{1}")]
    InvalidCanvas(f64, f64),
    #[error("Sample step must be positive, got {0}")]
    InvalidSampleStep(f64),
    #[error("Sample grid of {rows}x{cols} exceeds the limit of {limit} samples")]
    TooManySamples {
        rows: usize,
        cols: usize,
        limit: usize,
    },
}

/// Largest number of sample points a grid may hold.
///
/// Sampling cost is `cameras × samples`; beyond a few million samples an
/// interactive planner should use a coarser step instead.
pub const MAX_SAMPLES: usize = 4_000_000;

/// Regular grid of sample points covering the canvas.
///
/// Points sit at `(col * step, row * step)` for every column and row whose
/// coordinate is still inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    width: f64,
    height: f64,
    step: f64,
    cols: usize,
    rows: usize,
}

impl SampleGrid {
    /// Lay a grid over a `width` × `height` canvas with `step` pixel spacing.
    ///
    /// Dimensions and step must be finite and positive, and the grid may hold
    /// at most [`MAX_SAMPLES`] points.
    pub fn new(width: f64, height: f64, step: f64) -> Result<Self, CoverageError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) {
            return Err(CoverageError::InvalidCanvas(width, height));
        }
        if !positive(step) {
            return Err(CoverageError::InvalidSampleStep(step));
        }

        // Float to int casts saturate, so an oversized axis still fails below
        let cols = (width / step).ceil() as usize;
        let rows = (height / step).ceil() as usize;
        match rows.checked_mul(cols) {
            Some(samples) if samples <= MAX_SAMPLES => Ok(Self {
                width,
                height,
                step,
                cols,
                rows,
            }),
            _ => Err(CoverageError::TooManySamples {
                rows,
                cols,
                limit: MAX_SAMPLES,
            }),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Grid shape as `(rows, cols)`, matching the coverage map layout
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn sample_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Canvas coordinates of a grid point
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        (col as f64 * self.step, row as f64 * self.step)
    }
}

/// Aggregate coverage over all sample points.
///
/// Percentages are on a 0–100 scale and are fractions of all sample points,
/// including `redundant_coverage_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStats {
    pub sample_count: usize,
    /// Share of samples seen by at least one camera
    pub total_coverage_percent: f64,
    /// Share of samples seen by two or more cameras
    pub redundant_coverage_percent: f64,
    /// Samples seen by no camera
    pub blind_spot_count: usize,
    /// Mean camera count over samples seen by at least one camera
    pub average_overlap: f64,
}

impl CoverageStats {
    /// Statistics for a canvas with nothing on it.
    pub fn empty(sample_count: usize) -> Self {
        Self {
            sample_count,
            total_coverage_percent: 0.0,
            redundant_coverage_percent: 0.0,
            blind_spot_count: sample_count,
            average_overlap: 0.0,
        }
    }

    /// Summarise a per-sample camera count grid.
    pub fn from_counts(counts: &Array2<u16>) -> Self {
        let sample_count = counts.len();
        if sample_count == 0 {
            return Self::empty(0);
        }

        let mut covered = 0usize;
        let mut redundant = 0usize;
        let mut overlap_sum = 0u64;
        for &count in counts.iter() {
            if count >= 1 {
                covered += 1;
                overlap_sum += count as u64;
            }
            if count >= 2 {
                redundant += 1;
            }
        }

        let average_overlap = if covered == 0 {
            0.0
        } else {
            overlap_sum as f64 / covered as f64
        };

        Self {
            sample_count,
            total_coverage_percent: covered as f64 / sample_count as f64 * 100.0,
            redundant_coverage_percent: redundant as f64 / sample_count as f64 * 100.0,
            blind_spot_count: sample_count - covered,
            average_overlap,
        }
    }
}

/// Sectors for every camera that passes validation.
fn valid_sectors(cameras: &[CameraSpec], pixels_per_meter: f64) -> Vec<CoverageSector> {
    cameras
        .iter()
        .filter_map(|camera| match camera.validate() {
            Ok(()) => Some(CoverageSector::from_camera(camera, pixels_per_meter)),
            Err(e) => {
                log::warn!("Skipping camera {:?} in coverage: {e}", camera.name);
                None
            }
        })
        .collect()
}

/// Count, for every grid point, how many cameras see it.
///
/// The returned array is indexed `[row, col]`. Cameras that fail
/// [`CameraSpec::validate`] are left out.
pub fn coverage_map(
    cameras: &[CameraSpec],
    grid: &SampleGrid,
    pixels_per_meter: f64,
) -> Array2<u16> {
    let sectors = valid_sectors(cameras, pixels_per_meter);
    let mut counts = Array2::<u16>::zeros(grid.shape());
    if sectors.is_empty() {
        return counts;
    }

    Zip::indexed(&mut counts).par_for_each(|(row, col), count| {
        let (x, y) = grid.point(row, col);
        let seen = sectors.iter().filter(|sector| sector.contains(x, y)).count();
        *count = seen.min(u16::MAX as usize) as u16;
    });
    counts
}

/// Estimate coverage statistics for a set of cameras over the grid.
///
/// With no cameras every sample is a blind spot and all other statistics are
/// zero.
pub fn compute_coverage_stats(
    cameras: &[CameraSpec],
    grid: &SampleGrid,
    pixels_per_meter: f64,
) -> CoverageStats {
    if cameras.is_empty() {
        return CoverageStats::empty(grid.sample_count());
    }

    let stats = CoverageStats::from_counts(&coverage_map(cameras, grid, pixels_per_meter));
    log::debug!(
        "Coverage of {} cameras over {} samples: {:.1}% covered, {:.1}% redundant",
        cameras.len(),
        stats.sample_count,
        stats.total_coverage_percent,
        stats.redundant_coverage_percent
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use camplan_types::CanvasPoint;

    fn omni(x: f64, y: f64, range: f64) -> CameraSpec {
        CameraSpec::new(CanvasPoint::new(x, y), 0.0, 360.0, range)
    }

    #[test]
    fn test_grid_rejects_bad_geometry() {
        assert_eq!(
            SampleGrid::new(0.0, 10.0, 1.0),
            Err(CoverageError::InvalidCanvas(0.0, 10.0))
        );
        assert_eq!(
            SampleGrid::new(10.0, 10.0, 0.0),
            Err(CoverageError::InvalidSampleStep(0.0))
        );
        assert!(SampleGrid::new(10.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_grid_rejects_unbounded_sizes() {
        assert_eq!(
            SampleGrid::new(f64::INFINITY, 10.0, 1.0),
            Err(CoverageError::InvalidCanvas(f64::INFINITY, 10.0))
        );
        assert_eq!(
            SampleGrid::new(10.0, 10.0, f64::INFINITY),
            Err(CoverageError::InvalidSampleStep(f64::INFINITY))
        );
        assert_eq!(
            SampleGrid::new(1e12, 1e12, 1.0),
            Err(CoverageError::TooManySamples {
                rows: 1_000_000_000_000,
                cols: 1_000_000_000_000,
                limit: MAX_SAMPLES,
            })
        );
        // Axis count saturates instead of wrapping
        assert!(matches!(
            SampleGrid::new(1e300, 10.0, 1e-300),
            Err(CoverageError::TooManySamples { .. })
        ));
    }

    #[test]
    fn test_grid_at_sample_limit() {
        // 2000 x 2000 = MAX_SAMPLES
        let grid = SampleGrid::new(2000.0, 2000.0, 1.0).unwrap();
        assert_eq!(grid.sample_count(), MAX_SAMPLES);
        assert!(SampleGrid::new(2001.0, 2000.0, 1.0).is_err());

        let stats = compute_coverage_stats(&[], &grid, 10.0);
        assert_eq!(stats.blind_spot_count, MAX_SAMPLES);
    }

    #[test]
    fn test_grid_shape_rounds_up() {
        let grid = SampleGrid::new(100.0, 45.0, 10.0).unwrap();
        assert_eq!(grid.shape(), (5, 10));
        assert_eq!(grid.sample_count(), 50);
        assert_eq!(grid.point(4, 9), (90.0, 40.0));
    }

    #[test]
    fn test_no_cameras() {
        let grid = SampleGrid::new(100.0, 50.0, 10.0).unwrap();
        let stats = compute_coverage_stats(&[], &grid, 10.0);
        assert_eq!(stats, CoverageStats::empty(50));
        assert_eq!(stats.blind_spot_count, 50);
        assert_eq!(stats.average_overlap, 0.0);
    }

    #[test]
    fn test_literal_overlap_arithmetic() {
        // Four samples along y = 0 at x = 0, 10, 20, 30
        let grid = SampleGrid::new(40.0, 10.0, 10.0).unwrap();
        let cameras = [omni(0.0, 0.0, 1.5), omni(10.0, 0.0, 1.5)];

        let counts = coverage_map(&cameras, &grid, 10.0);
        assert_eq!(counts.as_slice().unwrap(), &[2, 2, 1, 0]);

        let stats = compute_coverage_stats(&cameras, &grid, 10.0);
        assert_relative_eq!(stats.total_coverage_percent, 75.0);
        assert_relative_eq!(stats.redundant_coverage_percent, 50.0);
        assert_eq!(stats.blind_spot_count, 1);
        assert_relative_eq!(stats.average_overlap, 5.0 / 3.0);
    }

    #[test]
    fn test_full_and_doubled_coverage() {
        let grid = SampleGrid::new(100.0, 100.0, 5.0).unwrap();
        let single = [omni(50.0, 50.0, 100.0)];
        let stats = compute_coverage_stats(&single, &grid, 10.0);
        assert_relative_eq!(stats.total_coverage_percent, 100.0);
        assert_relative_eq!(stats.redundant_coverage_percent, 0.0);
        assert_relative_eq!(stats.average_overlap, 1.0);

        let doubled = [omni(50.0, 50.0, 100.0), omni(0.0, 0.0, 100.0)];
        let stats = compute_coverage_stats(&doubled, &grid, 10.0);
        assert_relative_eq!(stats.redundant_coverage_percent, 100.0);
        assert_relative_eq!(stats.average_overlap, 2.0);
        assert_eq!(stats.blind_spot_count, 0);
    }

    #[test]
    fn test_cameras_off_canvas_leave_everything_blind() {
        let grid = SampleGrid::new(50.0, 50.0, 10.0).unwrap();
        let stats = compute_coverage_stats(&[omni(1000.0, 1000.0, 1.0)], &grid, 10.0);
        assert_eq!(stats.blind_spot_count, 25);
        assert_eq!(stats.average_overlap, 0.0);
    }

    #[test]
    fn test_invalid_camera_is_skipped() {
        let grid = SampleGrid::new(50.0, 50.0, 10.0).unwrap();
        let mut broken = omni(25.0, 25.0, 100.0);
        broken.range = -1.0;
        let stats = compute_coverage_stats(&[broken], &grid, 10.0);
        assert_eq!(stats.blind_spot_count, 25);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let grid = SampleGrid::new(640.0, 480.0, 4.0).unwrap();
        let cameras = [
            CameraSpec::new(CanvasPoint::new(10.0, 10.0), 45.0, 90.0, 40.0),
            CameraSpec::new(CanvasPoint::new(600.0, 20.0), 135.0, 70.0, 35.0),
            CameraSpec::new(CanvasPoint::new(320.0, 470.0), 270.0, 110.0, 25.0),
        ];
        let first = compute_coverage_stats(&cameras, &grid, 10.0);
        let second = compute_coverage_stats(&cameras, &grid, 10.0);
        assert_eq!(first, second);
        assert_eq!(
            first.average_overlap.to_bits(),
            second.average_overlap.to_bits()
        );
    }
}
