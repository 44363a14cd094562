use crate::{
    common::*, ClassMap, Detection, Detector, NonMaxSuppression, NonMaxSuppressionInit,
    Prediction, Vocabulary,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleInit {
    pub confidence_threshold: R64,
    pub iou_threshold: R64,
}

impl Default for EnsembleInit {
    fn default() -> Self {
        Self {
            confidence_threshold: r64(0.25),
            iou_threshold: r64(0.7),
        }
    }
}

impl EnsembleInit {
    /// Builds the ensemble, resolving every detector's class list against the
    /// shared vocabulary. A detector class absent from the vocabulary is a
    /// configuration error and fails the build.
    pub fn build<F>(
        self,
        detectors: Vec<Box<dyn Detector<Frame = F>>>,
        vocabulary: Vocabulary,
    ) -> Result<Ensemble<F>> {
        let Self {
            confidence_threshold,
            iou_threshold,
        } = self;

        ensure!(
            confidence_threshold >= 0.0 && confidence_threshold <= 1.0,
            "confidence_threshold must be in [0, 1]"
        );
        ensure!(
            !detectors.is_empty(),
            "the ensemble requires at least one detector"
        );

        let class_maps: Vec<_> = detectors
            .iter()
            .map(|detector| ClassMap::new(detector.classes(), &vocabulary))
            .try_collect()?;
        let suppression = NonMaxSuppressionInit { iou_threshold }.build()?;

        Ok(Ensemble {
            detectors,
            class_maps,
            vocabulary,
            confidence_threshold,
            suppression,
        })
    }
}

/// A fixed ordered collection of detectors sharing one class vocabulary.
///
/// Stateless across calls; the detectors' internal weights are their own
/// concern.
pub struct Ensemble<F> {
    detectors: Vec<Box<dyn Detector<Frame = F>>>,
    class_maps: Vec<ClassMap>,
    vocabulary: Vocabulary,
    confidence_threshold: R64,
    suppression: NonMaxSuppression,
}

impl<F> Ensemble<F> {
    /// Runs every detector on the frame and merges their candidates into one
    /// deduplicated detection set.
    ///
    /// Detectors are queried sequentially in list order and their candidates
    /// are concatenated in that order, then within-detector return order, so
    /// suppression tie-breaks are reproducible. Any detector failure aborts
    /// the whole frame.
    pub fn infer(&self, frame: &F) -> Result<Vec<Detection>> {
        let mut candidates = vec![];

        for (detector, class_map) in izip!(&self.detectors, &self.class_maps) {
            let predictions = detector.detect(frame, self.confidence_threshold)?;
            for prediction in predictions {
                let Prediction {
                    rect,
                    confidence,
                    class,
                } = prediction;
                let class = class_map.translate(class)?;
                candidates.push(Detection {
                    rect,
                    confidence,
                    class,
                });
            }
        }

        if candidates.is_empty() {
            return Ok(vec![]);
        }

        Ok(self.suppression.forward(candidates))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn num_detectors(&self) -> usize {
        self.detectors.len()
    }

    pub fn confidence_threshold(&self) -> R64 {
        self.confidence_threshold
    }
}
