//! Camera optics: sensor formats and DORI distance estimation

pub mod dori;
pub mod sensor;

pub use dori::{compute_distances, level_at_distance, DoriBand, DoriResult, DoriZone};
pub use sensor::{SensorFormat, SensorResolution};
