use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::core::dataset::{LabelStore, SceneRecord};
use crate::core::vocabulary::{SceneCategory, SceneLabel};
use crate::error::{Error, Result};

/// How a multi-label query combines its labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Scene carries every requested label (AND)
    All,
    /// Scene carries at least one requested label (OR)
    #[default]
    Any,
}

impl MatchMode {
    pub fn as_str(&self) -> &str {
        match self {
            MatchMode::All => "all",
            MatchMode::Any => "any",
        }
    }

    fn matches(&self, record: &SceneRecord, labels: &BTreeSet<SceneLabel>) -> bool {
        match self {
            MatchMode::All => labels.iter().all(|label| record.has_label(*label)),
            MatchMode::Any => labels.iter().any(|label| record.has_label(*label)),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            other => Err(Error::InvalidMatchMode(other.to_string())),
        }
    }
}

/// Parse label names, failing on the first one outside the vocabulary
pub fn parse_labels<S: AsRef<str>>(names: &[S]) -> Result<Vec<SceneLabel>> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

impl LabelStore {
    /// Tokens of every scene carrying `label`
    pub fn get_scenes_by_label(&self, label: SceneLabel) -> BTreeSet<String> {
        let scenes: BTreeSet<String> = self
            .iter()
            .filter(|(_, record)| record.has_label(label))
            .map(|(token, _)| token.to_string())
            .collect();
        debug!("{} scenes carry {}", scenes.len(), label);
        scenes
    }

    /// String form of [`LabelStore::get_scenes_by_label`]
    pub fn get_scenes_by_label_name(&self, label: &str) -> Result<BTreeSet<String>> {
        Ok(self.get_scenes_by_label(label.parse()?))
    }

    /// Tokens of scenes matching `labels` under `mode`.
    ///
    /// An empty label list is rejected rather than read as a vacuous AND/OR.
    pub fn get_scenes_by_labels(
        &self,
        labels: &[SceneLabel],
        mode: MatchMode,
    ) -> Result<BTreeSet<String>> {
        if labels.is_empty() {
            return Err(Error::EmptyLabelQuery);
        }
        let wanted: BTreeSet<SceneLabel> = labels.iter().copied().collect();

        let scenes: BTreeSet<String> = self
            .iter()
            .filter(|(_, record)| mode.matches(record, &wanted))
            .map(|(token, _)| token.to_string())
            .collect();
        debug!(
            "{} scenes match {:?} (mode {})",
            scenes.len(),
            wanted,
            mode
        );
        Ok(scenes)
    }

    /// String form of [`LabelStore::get_scenes_by_labels`]
    pub fn get_scenes_by_label_names<S: AsRef<str>>(
        &self,
        labels: &[S],
        mode: MatchMode,
    ) -> Result<BTreeSet<String>> {
        self.get_scenes_by_labels(&parse_labels(labels)?, mode)
    }

    /// Scenes with at least one label of `category`
    pub fn get_scenes_by_category(&self, category: SceneCategory) -> BTreeSet<String> {
        self.iter()
            .filter(|(_, record)| record.labels.iter().any(|l| l.category() == category))
            .map(|(token, _)| token.to_string())
            .collect()
    }

    pub fn get_dynamic_scenes(&self) -> BTreeSet<String> {
        self.get_scenes_by_category(SceneCategory::Dynamic)
    }

    pub fn get_static_scenes(&self) -> BTreeSet<String> {
        self.get_scenes_by_category(SceneCategory::Static)
    }
}
