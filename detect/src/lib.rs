mod common;
pub mod config;
pub mod output;
pub mod replay;

use crate::{common::*, config::Config, output::DetectionRecord, replay::ReplayDetector};

pub async fn start(config: Arc<Config>) -> Result<()> {
    // load the shared vocabulary
    let vocabulary = Vocabulary::open(&config.vocabulary.classes_file).with_context(|| {
        format!(
            "failed to load classes file '{}'",
            config.vocabulary.classes_file.display()
        )
    })?;

    // load recorded detectors in list order
    let mut detectors: Vec<Box<dyn Detector<Frame = String>>> = vec![];
    let mut frame_keys = BTreeSet::new();

    for detector_config in &config.detectors {
        let detector = ReplayDetector::load(
            &detector_config.classes_file,
            &detector_config.predictions_file,
        )
        .await
        .with_context(|| format!("failed to load detector '{}'", detector_config.name))?;

        frame_keys.extend(detector.frame_keys().map(ToOwned::to_owned));
        detectors.push(Box::new(detector));
    }

    let ensemble = config.ensemble.clone().build(detectors, vocabulary)?;
    info!(
        "loaded {} detectors, {} classes, {} frames",
        ensemble.num_detectors(),
        ensemble.vocabulary().len(),
        frame_keys.len()
    );

    // run the merge frame by frame; frame keys are sorted so the output is
    // reproducible across runs
    let mut results = BTreeMap::new();

    for frame in frame_keys {
        let started = Instant::now();
        let detections = ensemble.infer(&frame)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
        info!(
            "frame '{}': {} detections, {:.1}ms",
            frame,
            detections.len(),
            elapsed_ms
        );

        let records: Vec<_> = detections
            .iter()
            .map(|detection| DetectionRecord::new(detection, ensemble.vocabulary()))
            .try_collect()?;
        results.insert(frame, records);
    }

    // save merged detections into a timestamped directory
    let output_dir = config
        .output
        .output_dir
        .join(Local::now().format("%Y-%m-%d-%H-%M-%S").to_string());
    tokio::fs::create_dir_all(&output_dir).await?;

    let output_file = output_dir.join("detections.json");
    let text = serde_json::to_string_pretty(&results)?;
    tokio::fs::write(&output_file, text).await?;
    info!("saved results to '{}'", output_file.display());

    Ok(())
}
