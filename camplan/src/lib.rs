//! Security camera site planning.
//!
//! Three engines turn a floor plan into planning numbers:
//!
//! - [`optics`]: DORI distance bands from resolution, lens and sensor format
//! - [`coverage`]: field-of-view sectors and grid-sampled coverage statistics
//! - [`sizing`]: bitrate, network, storage, power, recorder and cabling budgets
//!
//! [`plan`] reads and writes site plan files and [`report`] runs all engines
//! over a plan.

pub mod coverage;
pub mod optics;
pub mod plan;
pub mod report;
pub mod shared_args;
pub mod sizing;

pub use plan::{PlanError, PlannedCamera, SitePlan};
pub use report::SiteReport;
