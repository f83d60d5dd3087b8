use std::collections::BTreeMap;
use std::fmt;
use tracing::info;

use crate::core::dataset::LabelStore;
use crate::core::vocabulary::{SceneCategory, SceneLabel};

/// Descriptive statistics over a label store
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStatistics {
    pub total_scenes: usize,
    /// Occurrences of every vocabulary label, zero counts included
    pub label_counts: BTreeMap<SceneLabel, usize>,
    /// Number of labels on a scene -> number of scenes
    pub multi_label_counts: BTreeMap<usize, usize>,
}

impl LabelStatistics {
    pub fn new() -> Self {
        Self {
            total_scenes: 0,
            label_counts: SceneLabel::ALL.iter().map(|label| (*label, 0)).collect(),
            multi_label_counts: BTreeMap::new(),
        }
    }

    /// Get count for a specific label
    pub fn get_count(&self, label: SceneLabel) -> usize {
        self.label_counts.get(&label).copied().unwrap_or(0)
    }

    /// Share of scenes carrying `label`, in percent
    pub fn get_percentage(&self, label: SceneLabel) -> f64 {
        self.percentage_of(self.get_count(label))
    }

    fn percentage_of(&self, count: usize) -> f64 {
        if self.total_scenes == 0 {
            return 0.0;
        }
        (count as f64 / self.total_scenes as f64) * 100.0
    }

    pub fn total_labels(&self) -> usize {
        self.multi_label_counts
            .iter()
            .map(|(labels, scenes)| labels * scenes)
            .sum()
    }

    pub fn average_labels_per_scene(&self) -> f64 {
        if self.total_scenes == 0 {
            return 0.0;
        }
        self.total_labels() as f64 / self.total_scenes as f64
    }

    pub fn zero_label_scenes(&self) -> usize {
        self.multi_label_counts.get(&0).copied().unwrap_or(0)
    }

    pub fn single_label_scenes(&self) -> usize {
        self.multi_label_counts.get(&1).copied().unwrap_or(0)
    }

    pub fn multiple_label_scenes(&self) -> usize {
        self.multi_label_counts.range(2..).map(|(_, count)| count).sum()
    }

    /// The `k` most frequent labels, ties broken by vocabulary order
    pub fn top_labels(&self, k: usize) -> Vec<(SceneLabel, usize)> {
        let mut ranked: Vec<(SceneLabel, usize)> =
            self.label_counts.iter().map(|(l, c)| (*l, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }
}

impl Default for LabelStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LabelStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "nuScenes-SR Dataset Statistics")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Total scenes: {}", self.total_scenes)?;

        writeln!(f, "\nLabel occurrences:")?;
        for category in [SceneCategory::Dynamic, SceneCategory::Static] {
            writeln!(f, "\n{} Scenes:", category.as_str())?;
            for label in category.labels() {
                writeln!(
                    f,
                    "  {}: {} ({:.1}%)  {}",
                    label,
                    self.get_count(*label),
                    self.get_percentage(*label),
                    label.description()
                )?;
            }
        }

        writeln!(
            f,
            "\nAverage labels per scene: {:.2}",
            self.average_labels_per_scene()
        )?;
        writeln!(f, "Scenes with zero labels: {}", self.zero_label_scenes())?;
        writeln!(f, "Scenes with one label: {}", self.single_label_scenes())?;
        writeln!(
            f,
            "Scenes with multiple labels: {}",
            self.multiple_label_scenes()
        )?;

        writeln!(f, "\nMulti-label distribution:")?;
        for (labels, scenes) in &self.multi_label_counts {
            writeln!(
                f,
                "  {} labels: {} scenes ({:.1}%)",
                labels,
                scenes,
                self.percentage_of(*scenes)
            )?;
        }
        writeln!(f, "{}", rule)
    }
}

impl LabelStore {
    pub fn statistics(&self) -> LabelStatistics {
        let mut stats = LabelStatistics::new();
        for (_, record) in self.iter() {
            stats.total_scenes += 1;
            for label in &record.labels {
                *stats.label_counts.entry(*label).or_insert(0) += 1;
            }
            *stats
                .multi_label_counts
                .entry(record.label_count())
                .or_insert(0) += 1;
        }
        stats
    }

    /// Per-label occurrence counts
    pub fn get_label_statistics(&self) -> BTreeMap<SceneLabel, usize> {
        self.statistics().label_counts
    }

    /// `{label count: scene count}`
    pub fn get_multi_label_statistics(&self) -> BTreeMap<usize, usize> {
        self.statistics().multi_label_counts
    }

    /// Write the statistics report to stdout
    pub fn print_statistics(&self) {
        let stats = self.statistics();
        info!(
            "Statistics for {} scenes, {:.2} labels per scene",
            stats.total_scenes,
            stats.average_labels_per_scene()
        );
        print!("{}", stats);
    }
}
