//! On-disk datasets and artifacts.
//!
//! Everything is plain JSON on the local filesystem: raw inputs (game
//! logs, opening lines, ratings) are read-only, derived artifacts
//! (feature table, model, calibrator, priced odds) are written atomically
//! so a crashed run never leaves a half-written file behind.

pub mod artifacts;
pub mod ingest;

pub use artifacts::{load_json, save_json};
pub use ingest::Datasets;
