use crate::common::*;
use bbox::TLBR;

/// A candidate box returned by one detector.
///
/// `class` is an index into that detector's private class list, not the
/// shared vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prediction {
    pub rect: TLBR<R64>,
    pub confidence: R64,
    pub class: usize,
}

/// A detection in pixel coordinates of the input frame.
///
/// `class` is a global id in the shared vocabulary. The merge step only ever
/// emits this type, so detector-local indexes cannot leak to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Detection {
    pub rect: TLBR<R64>,
    pub confidence: R64,
    pub class: usize,
}
