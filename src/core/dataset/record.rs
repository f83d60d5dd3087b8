use serde::Deserialize;
use tracing::warn;

use crate::core::vocabulary::SceneLabel;

/// One annotated driving scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRecord {
    /// Labels in first-seen order, no duplicates, never empty
    pub labels: Vec<SceneLabel>,
    /// Free text context; `None` when the file had no `description` key
    pub description: Option<String>,
}

impl SceneRecord {
    pub fn has_label(&self, label: SceneLabel) -> bool {
        self.labels.contains(&label)
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Description text, empty when absent
    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// First `max_chars` characters of the description, with `...` appended when cut
    pub fn description_preview(&self, max_chars: usize) -> String {
        let text = self.description_str();
        if text.chars().count() > max_chars {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            text.to_string()
        }
    }
}

/// Record as it appears in the annotation file, before vocabulary checks.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSceneRecord {
    labels: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

impl RawSceneRecord {
    /// Validate labels against the vocabulary.
    ///
    /// Returns the reason string used in the load error on failure.
    pub(crate) fn validate(self, token: &str) -> Result<SceneRecord, String> {
        if self.labels.is_empty() {
            return Err(format!("scene {:?} has an empty `labels` list", token));
        }

        let mut labels = Vec::with_capacity(self.labels.len());
        for name in &self.labels {
            let label: SceneLabel = name
                .parse()
                .map_err(|_| format!("scene {:?} has unknown label {:?}", token, name))?;
            if labels.contains(&label) {
                warn!("Scene {} lists {} more than once, keeping one", token, label);
                continue;
            }
            labels.push(label);
        }

        Ok(SceneRecord {
            labels,
            description: self.description,
        })
    }
}
