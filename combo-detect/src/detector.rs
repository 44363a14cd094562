use crate::{common::*, Prediction};

/// The capability boundary to one trained detector.
///
/// Model loading, checkpoints and the forward pass live entirely behind this
/// trait; the ensemble consumes nothing else from a detector. Detectors are
/// queried read-only and independently per frame.
pub trait Detector {
    /// The input frame type. Opaque to the ensemble.
    type Frame;

    /// The detector's private class list, fixed per instance. Local class
    /// indexes in [`Prediction`] index into this list.
    fn classes(&self) -> &IndexSet<String>;

    /// Runs inference on one frame, returning candidates with confidence of
    /// at least `conf_threshold`.
    fn detect(&self, frame: &Self::Frame, conf_threshold: R64) -> Result<Vec<Prediction>>;
}
