use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use nuscenes_sr::config::AppConfig;
use nuscenes_sr::logging::setup_logging;
use nuscenes_sr::{Error, MatchMode, Result, SceneLabel, SceneLoader};

fn main() -> ExitCode {
    // Reported after the subscriber is installed
    let (mut config, config_source) = AppConfig::resolve();

    if let Err(e) = setup_logging(&config.log) {
        eprintln!("Failed to set up file logging: {}", e);
        return ExitCode::FAILURE;
    }
    info!("Starting nuScenes-SR walkthrough");
    config_source.report();

    if let Some(path) = std::env::args().nth(1) {
        config.annotation_path = PathBuf::from(path);
    }

    match run(&config) {
        Ok(()) => {
            info!("All examples completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if matches!(e, Error::Load { .. }) {
                error!(
                    "Please make sure the dataset file {:?} exists.",
                    config.annotation_path
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn run(config: &AppConfig) -> Result<()> {
    let loader = SceneLoader::open(&config.annotation_path)?;
    let store = loader.store()?;

    section("Basic Usage");
    println!("Total scenes: {}", store.len());
    println!("Available scene types: {}", SceneLabel::ALL.len());
    if let Some((token, record)) = store.iter().next() {
        let labels: Vec<&str> = record.labels.iter().map(|l| l.as_str()).collect();
        println!("\nFirst scene: {}", token);
        println!("Labels: [{}]", labels.join(", "));
        println!("Description: {}", record.description_str());
    }

    section("Scene Filtering");
    let ped = store.get_scenes_by_label(SceneLabel::PedCrossing);
    println!("Pedestrian crossing scenes: {}", ped.len());
    let intersection_light = store.get_scenes_by_labels(
        &[SceneLabel::Intersection, SceneLabel::TrafficLight],
        MatchMode::All,
    )?;
    println!(
        "Intersection + Traffic light scenes: {}",
        intersection_light.len()
    );
    println!("Dynamic scenes: {}", store.get_dynamic_scenes().len());
    println!("Static scenes: {}", store.get_static_scenes().len());

    section("Dataset Statistics");
    store.print_statistics();
    let stats = store.statistics();
    println!("Top 5 most common labels:");
    for (label, count) in stats.top_labels(5) {
        println!("  {}: {}", label, count);
    }

    section("Dataset Splitting");
    let split = store.split_dataset(config.split_ratios(), config.random_seed)?;
    let total = store.len().max(1) as f64;
    for (name, part) in [
        ("Training", &split.train),
        ("Validation", &split.val),
        ("Test", &split.test),
    ] {
        println!(
            "  {}: {} scenes ({:.1}%)",
            name,
            part.len(),
            part.len() as f64 / total * 100.0
        );
    }
    let head = &split.train[..split.train.len().min(config.export_limit)];
    let count = store.export_labels_only(&config.export_path, Some(head))?;
    println!(
        "Exported {} training labels to {:?}",
        count, config.export_path
    );

    section("Random Sampling");
    let sample_size = config.sample_size.min(store.len());
    let sample = store.sample_scenes(sample_size, config.random_seed)?;
    println!("Random sample of {} scenes:", sample.len());
    for (i, token) in sample.iter().enumerate() {
        if let Some(record) = store.get_scene_data(token) {
            let labels: Vec<&str> = record.labels.iter().map(|l| l.as_str()).collect();
            println!("  {}. Labels: [{}]", i + 1, labels.join(", "));
            println!("     Description: {}", record.description_preview(50));
        }
    }

    section("Dataset Iteration");
    println!("First 3 scenes in dataset:");
    for (token, record) in store.iter().take(3) {
        let labels: Vec<&str> = record.labels.iter().map(|l| l.as_str()).collect();
        println!("  {}: [{}]", token, labels.join(", "));
    }

    Ok(())
}
