// THEORY:
// This file is the main entry point for the `chroma_trail` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (like the `live_tracker` runner).
//
// The primary goal is to export the `TrackerPipeline` and its associated data
// structures (`PipelineConfig`, `FrameOutput`, etc.) as the clean, high-level
// interface for the tracker. The internal modules (`core_modules`) stay
// encapsulated behind it, providing a clean separation of concerns.

pub mod core_modules;
pub mod error;
pub mod pipeline;

// Re-export key data structures for the public API.
pub use crate::core_modules::color_range::ColorRange;
pub use crate::core_modules::detector::Detection;
pub use crate::core_modules::trail::{PointTrail, TrailSegment};
pub use crate::core_modules::utils::snapshot;
pub use crate::error::PipelineError;
pub use crate::pipeline::{FrameOutput, PipelineConfig, TrackerPipeline};
