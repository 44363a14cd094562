use crate::common::*;
use bbox::{prelude::*, TLBR};

/// One recorded candidate box, as stored in a predictions file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Box corners in pixels, `[top, left, bottom, right]`.
    pub tlbr: [f64; 4],
    pub confidence: f64,
    /// Detector-local class index.
    pub class: usize,
}

/// A detector replaying recorded per-frame predictions in place of a live
/// forward pass, so the merge pipeline runs without the external ML
/// framework. Frames are identified by string keys.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    classes: IndexSet<String>,
    frames: HashMap<String, Vec<Prediction>>,
}

impl ReplayDetector {
    pub fn new(
        classes: IndexSet<String>,
        records: HashMap<String, Vec<PredictionRecord>>,
    ) -> Result<Self> {
        ensure!(!classes.is_empty(), "the class list must not be empty");

        let frames: HashMap<_, _> = records
            .into_iter()
            .map(|(frame, records)| {
                let predictions: Vec<_> = records
                    .into_iter()
                    .map(|record| {
                        let PredictionRecord {
                            tlbr: [t, l, b, r],
                            confidence,
                            class,
                        } = record;

                        let rect = TLBR::try_from_tlbr([
                            try_r64(t)?,
                            try_r64(l)?,
                            try_r64(b)?,
                            try_r64(r)?,
                        ])?;
                        let confidence = try_r64(confidence)?;
                        ensure!(
                            confidence >= 0.0 && confidence <= 1.0,
                            "confidence {} is not in [0, 1]",
                            confidence
                        );
                        ensure!(
                            class < classes.len(),
                            "local class index {} is out of range, the detector has {} classes",
                            class,
                            classes.len()
                        );

                        Ok(Prediction {
                            rect,
                            confidence,
                            class,
                        })
                    })
                    .try_collect()
                    .with_context(|| format!("invalid prediction in frame '{}'", frame))?;
                anyhow::Ok((frame, predictions))
            })
            .try_collect()?;

        Ok(Self { classes, frames })
    }

    /// Loads a detector from its classes file and recorded predictions file.
    pub async fn load(
        classes_file: impl AsRef<Path>,
        predictions_file: impl AsRef<Path>,
    ) -> Result<Self> {
        let classes = load_classes_file(classes_file).await?;

        let predictions_file = predictions_file.as_ref();
        let text = tokio::fs::read_to_string(predictions_file).await?;
        let records: HashMap<String, Vec<PredictionRecord>> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse '{}'", predictions_file.display()))?;

        Self::new(classes, records)
    }

    /// Keys of every frame this detector has predictions for.
    pub fn frame_keys(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }
}

impl Detector for ReplayDetector {
    type Frame = String;

    fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }

    fn detect(&self, frame: &String, conf_threshold: R64) -> Result<Vec<Prediction>> {
        let predictions = self
            .frames
            .get(frame)
            .map(|predictions| {
                predictions
                    .iter()
                    .filter(|prediction| prediction.confidence >= conf_threshold)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(predictions)
    }
}

fn try_r64(value: f64) -> Result<R64> {
    R64::try_new(value).ok_or_else(|| format_err!("{} is not a finite number", value))
}

pub async fn load_classes_file(path: impl AsRef<Path>) -> Result<IndexSet<String>> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let lines: Vec<_> = content.lines().collect();
    let classes: IndexSet<_> = lines.iter().cloned().map(ToOwned::to_owned).collect();
    ensure!(
        lines.len() == classes.len(),
        "duplicated class names found in '{}'",
        path.display()
    );
    ensure!(
        !classes.is_empty(),
        "no classes found in '{}'",
        path.display()
    );
    Ok(classes)
}
