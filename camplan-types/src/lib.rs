//! Shared WASM-compatible types for camera site planning.
//!
//! Contains the descriptors exchanged between the planning UI and the
//! `camplan` engines. All types must be WASM-compatible.

mod camera;
mod stream;

pub use camera::{CameraSpec, CameraSpecError, CanvasPoint};
pub use stream::{Codec, PoeStandard, RecordingMode, SceneComplexity, StreamSpec};
