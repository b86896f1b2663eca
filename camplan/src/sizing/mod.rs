//! Recording infrastructure sizing.
//!
//! Converts per-camera stream and recording parameters into network,
//! storage and power budgets plus categorical hardware recommendations.
//! Every operation is a pure function of its inputs and a [`SizingPolicy`].

pub mod bitrate;
pub mod cabling;
pub mod network;
pub mod nvr;
pub mod poe;
pub mod policy;
pub mod storage;

pub use bitrate::{compute_bitrate, estimate_bitrate_kbps};
pub use cabling::{estimate_cabling, CablingEstimate};
pub use network::{analyze_network, CameraBandwidth, NetworkAnalysis};
pub use nvr::{recommend_nvr, NvrRecommendation};
pub use poe::{analyze_poe, PoeAnalysis, PoeInput};
pub use policy::{Breakpoints, RaidLevel, RaidTier, SizingPolicy};
pub use storage::{analyze_storage, CameraStorage, StorageInput, SystemStorageAnalysis};
