use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{error, info};

use crate::core::dataset::LabelStore;
use crate::core::vocabulary::SceneLabel;
use crate::error::{Error, Result};

/// Entry written by [`LabelStore::export_labels_only`]
#[derive(Debug, Serialize)]
struct LabelsOnly<'a> {
    labels: &'a [SceneLabel],
}

impl LabelStore {
    /// Write `{token: {"labels": [...]}}` for the given tokens (all when `None`).
    ///
    /// Every requested token must exist; nothing is written otherwise.
    ///
    /// # Returns
    /// * `Ok(count)` with the number of scenes written
    /// * `Err(Error::Export)` for an unknown token or a failed write
    pub fn export_labels_only<S: AsRef<str>>(
        &self,
        output_path: impl AsRef<Path>,
        tokens: Option<&[S]>,
    ) -> Result<usize> {
        let output_path = output_path.as_ref();
        let export_error = |reason: String| Error::Export {
            path: output_path.to_path_buf(),
            reason,
        };

        let mut subset: BTreeMap<&str, LabelsOnly<'_>> = BTreeMap::new();
        match tokens {
            Some(tokens) => {
                for token in tokens {
                    let token = token.as_ref();
                    let (token, record) = self
                        .get_entry(token)
                        .ok_or_else(|| export_error(format!("unknown scene token {:?}", token)))?;
                    subset.insert(token, LabelsOnly { labels: &record.labels });
                }
            }
            None => {
                for (token, record) in self.iter() {
                    subset.insert(token, LabelsOnly { labels: &record.labels });
                }
            }
        }

        let file = File::create(output_path).map_err(|e| {
            error!("Failed to create export file {:?}: {}", output_path, e);
            export_error(e.to_string())
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &subset)
            .map_err(|e| export_error(e.to_string()))?;
        writer
            .write_all(b"\n")
            .map_err(|e| export_error(e.to_string()))?;
        writer.flush().map_err(|e| export_error(e.to_string()))?;

        info!(
            "Exported labels for {} scenes to {:?}",
            subset.len(),
            output_path
        );
        Ok(subset.len())
    }
}
