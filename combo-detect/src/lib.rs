//! Multi-model ensemble inference over a shared class vocabulary.
//!
//! Independently trained detectors are queried behind the [`Detector`] trait;
//! their candidates are remapped from detector-local class indexes to the
//! shared [`Vocabulary`], concatenated in a fixed order, and deduplicated by
//! greedy non-maximum suppression.

mod common;

pub use class_map::*;
pub mod class_map;

pub use detection::*;
pub mod detection;

pub use detector::*;
pub mod detector;

pub use ensemble::*;
pub mod ensemble;

pub use nms::*;
pub mod nms;

pub use vocab::*;
pub mod vocab;
