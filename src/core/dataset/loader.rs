use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{LabelStore, SceneRecord};
use crate::core::analysis::LabelStatistics;
use crate::core::filter::MatchMode;
use crate::core::split::{SplitRatios, SplitResult};
use crate::core::vocabulary::SceneLabel;
use crate::error::{Error, Result};

/// Lifecycle of a [`SceneLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Unloaded,
    Ready,
}

/// Accessor bound to one annotation file.
///
/// Starts `Unloaded`; every query fails with [`Error::NotLoaded`] until
/// [`SceneLoader::load`] succeeds. Loading again once ready is a no-op.
#[derive(Debug)]
pub struct SceneLoader {
    data_path: PathBuf,
    store: Option<LabelStore>,
}

impl SceneLoader {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            store: None,
        }
    }

    /// Construct and load in one step
    pub fn open(data_path: impl Into<PathBuf>) -> Result<Self> {
        let mut loader = Self::new(data_path);
        loader.load()?;
        Ok(loader)
    }

    pub fn load(&mut self) -> Result<()> {
        if self.store.is_some() {
            debug!("Annotations from {:?} already loaded", self.data_path);
            return Ok(());
        }

        match LabelStore::open(&self.data_path) {
            Ok(store) => {
                self.store = Some(store);
                Ok(())
            }
            Err(e) => {
                warn!("Load failed, loader stays unloaded: {}", e);
                Err(e)
            }
        }
    }

    pub fn state(&self) -> LoaderState {
        if self.store.is_some() {
            LoaderState::Ready
        } else {
            LoaderState::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoaderState::Ready
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// The loaded store, or [`Error::NotLoaded`]
    pub fn store(&self) -> Result<&LabelStore> {
        self.store.as_ref().ok_or(Error::NotLoaded)
    }

    pub fn into_store(self) -> Result<LabelStore> {
        self.store.ok_or(Error::NotLoaded)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store()?.is_empty())
    }

    pub fn get_scene_data(&self, token: &str) -> Result<Option<&SceneRecord>> {
        Ok(self.store()?.get_scene_data(token))
    }

    pub fn get_scenes_by_label(&self, label: &str) -> Result<BTreeSet<String>> {
        self.store()?.get_scenes_by_label_name(label)
    }

    pub fn get_scenes_by_labels<S: AsRef<str>>(
        &self,
        labels: &[S],
        mode: MatchMode,
    ) -> Result<BTreeSet<String>> {
        self.store()?.get_scenes_by_label_names(labels, mode)
    }

    pub fn get_dynamic_scenes(&self) -> Result<BTreeSet<String>> {
        Ok(self.store()?.get_dynamic_scenes())
    }

    pub fn get_static_scenes(&self) -> Result<BTreeSet<String>> {
        Ok(self.store()?.get_static_scenes())
    }

    pub fn statistics(&self) -> Result<LabelStatistics> {
        Ok(self.store()?.statistics())
    }

    pub fn get_label_statistics(&self) -> Result<BTreeMap<SceneLabel, usize>> {
        Ok(self.store()?.get_label_statistics())
    }

    pub fn get_multi_label_statistics(&self) -> Result<BTreeMap<usize, usize>> {
        Ok(self.store()?.get_multi_label_statistics())
    }

    pub fn print_statistics(&self) -> Result<()> {
        self.store()?.print_statistics();
        Ok(())
    }

    pub fn sample_scenes(&self, n: usize, seed: u64) -> Result<Vec<String>> {
        self.store()?.sample_scenes(n, seed)
    }

    pub fn split_dataset(&self, ratios: SplitRatios, seed: u64) -> Result<SplitResult> {
        self.store()?.split_dataset(ratios, seed)
    }

    pub fn export_labels_only<S: AsRef<str>>(
        &self,
        output_path: impl AsRef<Path>,
        tokens: Option<&[S]>,
    ) -> Result<usize> {
        self.store()?.export_labels_only(output_path, tokens)
    }
}
