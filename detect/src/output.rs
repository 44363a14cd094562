use crate::common::*;
use bbox::prelude::*;

/// One merged detection as written to the result file, with the class name
/// resolved from the shared vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Box corners in pixels, `[top, left, bottom, right]`.
    pub tlbr: [f64; 4],
    pub confidence: f64,
    /// Global class id in the shared vocabulary.
    pub class: usize,
    pub name: String,
}

impl DetectionRecord {
    pub fn new(detection: &Detection, vocabulary: &Vocabulary) -> Result<Self> {
        let name = vocabulary.name(detection.class).ok_or_else(|| {
            format_err!("class id {} is not in the shared vocabulary", detection.class)
        })?;
        let [t, l, b, r] = detection.rect.tlbr();

        Ok(Self {
            tlbr: [t.raw(), l.raw(), b.raw(), r.raw()],
            confidence: detection.confidence.raw(),
            class: detection.class,
            name: name.to_owned(),
        })
    }
}
