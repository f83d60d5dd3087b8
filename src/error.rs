//! Error types for the scene label accessor

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Annotation file missing, unreadable, malformed, or failing validation
    #[error("Failed to load annotations from {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// Label outside the fixed ten-value vocabulary
    #[error("Invalid label: {0}. Must be one of PED_CROSSING, LEFT_TURN, RIGHT_TURN, CONSTRUCTION_VEHICLE, AVOID_STATIONARY, INTERSECTION, PARKING_LOT, TRAFFIC_LIGHT, RAINY_WEATHER, CONSTRUCTION_ZONE")]
    UnknownLabel(String),

    /// Multi-label query called with no labels
    #[error("Label query needs at least one label")]
    EmptyLabelQuery,

    #[error("Invalid match mode: {0:?}. Expected \"all\" or \"any\"")]
    InvalidMatchMode(String),

    #[error("Cannot sample {requested} scenes from a store of {available}")]
    SampleSize { requested: usize, available: usize },

    /// Split ratios negative, non-finite, or not summing to 1.0
    #[error("Invalid split ratios: {0}")]
    Ratio(String),

    #[error("Annotations have not been loaded")]
    NotLoaded,

    #[error("Failed to export labels to {path:?}: {reason}")]
    Export { path: PathBuf, reason: String },
}
