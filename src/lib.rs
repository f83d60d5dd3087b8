//! Accessor for the nuScenes-SR scene recognition labels.
//!
//! Loads the JSON annotation file once into an immutable [`LabelStore`] and
//! answers label queries, statistics, seeded sampling, reproducible
//! train/val/test splits and label-only exports.
//!
//! ```no_run
//! use nuscenes_sr::{MatchMode, SceneLoader, SplitRatios};
//!
//! let loader = SceneLoader::open("dataset/merged_final_labels_reviewed.json")?;
//! let crossings = loader.get_scenes_by_label("PED_CROSSING")?;
//! let lit = loader.get_scenes_by_labels(&["INTERSECTION", "TRAFFIC_LIGHT"], MatchMode::All)?;
//! let split = loader.split_dataset(SplitRatios::new(0.7, 0.15, 0.15), 42)?;
//! # Ok::<(), nuscenes_sr::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;

pub use crate::core::{
    DatasetSplit, LabelStatistics, LabelStore, LoaderState, MatchMode, SceneCategory, SceneLabel,
    SceneLoader, SceneRecord, SplitRatios, SplitResult,
};
pub use error::{Error, Result};
