pub use anyhow::{ensure, format_err, Context, Result};
pub use chrono::Local;
pub use combo_detect::{Detection, Detector, EnsembleInit, Prediction, Vocabulary};
pub use indexmap::IndexSet;
pub use itertools::Itertools;
pub use noisy_float::prelude::*;
pub use once_cell::sync::Lazy;
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};
pub use tracing::info;
