use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::error::Category;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::record::{RawSceneRecord, SceneRecord};
use crate::error::{Error, Result};

/// Immutable, validated mapping from scene token to its record.
///
/// Tokens are kept sorted so every derived view (iteration, sampling,
/// splitting) is a pure function of the file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStore {
    source: PathBuf,
    scenes: BTreeMap<String, SceneRecord>,
}

impl LabelStore {
    /// Read and validate an annotation file.
    ///
    /// A token repeated in the file keeps its last record and logs a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading annotations from: {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: if e.kind() == std::io::ErrorKind::NotFound {
                "data file not found".to_string()
            } else {
                e.to_string()
            },
        })?;

        let store = Self::parse(&content, path)?;
        info!("Loaded {} scenes from {:?}", store.len(), path);
        Ok(store)
    }

    /// Build a store from annotation JSON already in memory.
    ///
    /// Repeated tokens behave as in [`LabelStore::open`].
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<memory>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let load_error = |reason: String| Error::Load {
            path: path.to_path_buf(),
            reason,
        };

        let SceneEntries(entries) =
            serde_json::from_str::<SceneEntries>(content).map_err(|e| match e.classify() {
                Category::Data => load_error(format!(
                    "top level must be an object keyed by scene token: {}",
                    e
                )),
                _ => load_error(format!("invalid JSON: {}", e)),
            })?;

        let mut scenes = BTreeMap::new();
        for (token, value) in entries {
            if !value.is_object() {
                return Err(load_error(format!("scene {:?} is not an object", token)));
            }
            let raw: RawSceneRecord = serde_json::from_value(value)
                .map_err(|e| load_error(format!("scene {:?}: {}", token, e)))?;
            let record = raw.validate(&token).map_err(load_error)?;
            if scenes.contains_key(&token) {
                warn!("Scene {} appears more than once, keeping the last record", token);
            }
            scenes.insert(token, record);
        }

        debug!("Validated {} scene records", scenes.len());
        Ok(Self {
            source: path.to_path_buf(),
            scenes,
        })
    }

    /// Path the store was read from (`<memory>` for in-memory stores)
    pub fn source_path(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.scenes.contains_key(token)
    }

    pub fn get_scene_data(&self, token: &str) -> Option<&SceneRecord> {
        self.scenes.get(token)
    }

    pub(crate) fn get_entry(&self, token: &str) -> Option<(&str, &SceneRecord)> {
        self.scenes
            .get_key_value(token)
            .map(|(token, record)| (token.as_str(), record))
    }

    /// All tokens in sorted order
    pub fn scene_tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.scenes.keys().map(String::as_str)
    }

    /// `(token, record)` pairs in sorted token order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SceneRecord)> + '_ {
        self.scenes.iter().map(|(token, record)| (token.as_str(), record))
    }
}

/// Top-level entries in file order, repeated tokens included
struct SceneEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for SceneEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SceneEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by scene token")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(SceneEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'a> IntoIterator for &'a LabelStore {
    type Item = (&'a String, &'a SceneRecord);
    type IntoIter = std::collections::btree_map::Iter<'a, String, SceneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vocabulary::SceneLabel;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "tok2": {"labels": ["LEFT_TURN"], "description": "y"},
        "tok1": {"labels": ["PED_CROSSING", "INTERSECTION"], "description": "x"}
    }"#;

    #[test]
    fn test_keys_match_source_object() {
        let store = LabelStore::from_json_str(SAMPLE).unwrap();
        let tokens: Vec<&str> = store.scene_tokens().collect();
        assert_eq!(tokens, vec!["tok1", "tok2"]);
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get_scene_data("tok1").unwrap().labels,
            vec![SceneLabel::PedCrossing, SceneLabel::Intersection]
        );
        assert!(store.get_scene_data("tok3").is_none());
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = LabelStore::open(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.source_path(), file.path());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LabelStore::open(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Load { ref reason, .. } if reason.contains("not found")));
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        let err = LabelStore::from_json_str("{\"tok\": ").unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_non_object_root_is_load_error() {
        let err = LabelStore::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::Load { ref reason, .. } if reason.contains("top level")));
    }

    #[test]
    fn test_non_object_record_is_load_error() {
        let err = LabelStore::from_json_str(r#"{"t": 5}"#).unwrap_err();
        assert!(matches!(err, Error::Load { ref reason, .. } if reason.contains("not an object")));
    }

    #[test]
    fn test_repeated_token_keeps_last_record() {
        let store = LabelStore::from_json_str(
            r#"{
                "t": {"labels": ["LEFT_TURN"], "description": "first"},
                "t": {"labels": ["RIGHT_TURN"], "description": "second"}
            }"#,
        )
        .unwrap();
        assert_eq!(store.len(), 1);
        let record = store.get_scene_data("t").unwrap();
        assert_eq!(record.labels, vec![SceneLabel::RightTurn]);
        assert_eq!(record.description.as_deref(), Some("second"));
    }

    #[test]
    fn test_record_without_labels_is_load_error() {
        let err = LabelStore::from_json_str(r#"{"tok": {"description": "x"}}"#).unwrap_err();
        assert!(matches!(err, Error::Load { ref reason, .. } if reason.contains("labels")));
    }

    #[test]
    fn test_unknown_label_fails_load() {
        let err =
            LabelStore::from_json_str(r#"{"tok": {"labels": ["FOGGY"], "description": ""}}"#)
                .unwrap_err();
        assert!(matches!(err, Error::Load { ref reason, .. } if reason.contains("FOGGY")));
    }

    #[test]
    fn test_empty_object_loads_empty_store() {
        let store = LabelStore::from_json_str("{}").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }
}
