//! End-to-end tests over an annotation file on disk

use std::collections::BTreeSet;
use std::io::Write;

use nuscenes_sr::{Error, MatchMode, SceneLabel, SceneLoader, SplitRatios};

const EXAMPLE: &str = r#"{
    "tok1": {"labels": ["PED_CROSSING", "INTERSECTION"], "description": "x"},
    "tok2": {"labels": ["LEFT_TURN"], "description": "y"}
}"#;

fn write_annotations(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn tokens(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_two_scene_example() {
    let file = write_annotations(EXAMPLE);
    let loader = SceneLoader::open(file.path()).unwrap();

    assert_eq!(
        loader.get_scenes_by_label("PED_CROSSING").unwrap(),
        tokens(&["tok1"])
    );
    assert_eq!(
        loader
            .get_scenes_by_labels(&["PED_CROSSING", "LEFT_TURN"], MatchMode::Any)
            .unwrap(),
        tokens(&["tok1", "tok2"])
    );
    assert!(loader
        .get_scenes_by_labels(&["PED_CROSSING", "LEFT_TURN"], MatchMode::All)
        .unwrap()
        .is_empty());
}

#[test]
fn test_mode_parsed_at_boundary() {
    let file = write_annotations(EXAMPLE);
    let loader = SceneLoader::open(file.path()).unwrap();

    let mode: MatchMode = "any".parse().unwrap();
    assert_eq!(
        loader.get_scenes_by_labels(&["LEFT_TURN"], mode).unwrap(),
        tokens(&["tok2"])
    );
    assert!(matches!(
        "either".parse::<MatchMode>(),
        Err(Error::InvalidMatchMode(_))
    ));
}

#[test]
fn test_export_then_reload() {
    let file = write_annotations(EXAMPLE);
    let loader = SceneLoader::open(file.path()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("train_labels.json");

    let split = loader.split_dataset(SplitRatios::new(0.5, 0.0, 0.5), 1).unwrap();
    loader.export_labels_only(&out, Some(split.train.as_slice())).unwrap();

    let reloaded = SceneLoader::open(&out).unwrap();
    assert_eq!(reloaded.len().unwrap(), split.train.len());
    let original = loader.store().unwrap();
    for (token, record) in reloaded.store().unwrap().iter() {
        assert_eq!(record.labels, original.get_scene_data(token).unwrap().labels);
        assert!(record.description.is_none());
    }
}

#[test]
fn test_statistics_through_loader() {
    let file = write_annotations(EXAMPLE);
    let loader = SceneLoader::open(file.path()).unwrap();

    let counts = loader.get_label_statistics().unwrap();
    assert_eq!(counts[&SceneLabel::PedCrossing], 1);
    assert_eq!(counts[&SceneLabel::RainyWeather], 0);

    let stats = loader.statistics().unwrap();
    assert_eq!(stats.average_labels_per_scene(), 1.5);
    assert_eq!(stats.single_label_scenes(), 1);
    assert_eq!(stats.multiple_label_scenes(), 1);
}

#[test]
fn test_sampling_errors_and_full_draw() {
    let file = write_annotations(EXAMPLE);
    let loader = SceneLoader::open(file.path()).unwrap();

    assert!(matches!(
        loader.sample_scenes(3, 42),
        Err(Error::SampleSize { .. })
    ));
    let all: BTreeSet<String> = loader.sample_scenes(2, 42).unwrap().into_iter().collect();
    assert_eq!(all, tokens(&["tok1", "tok2"]));
}
