pub mod analysis;
pub mod dataset;
pub mod filter;
mod operations;
pub mod split;
pub mod vocabulary;

pub use analysis::*;
pub use dataset::*;
pub use filter::{parse_labels, MatchMode};
pub use split::{DatasetSplit, SplitRatios, SplitResult, RATIO_TOLERANCE};
pub use vocabulary::{SceneCategory, SceneLabel};
