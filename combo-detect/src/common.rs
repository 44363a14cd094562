pub use anyhow::{bail, ensure, format_err, Result};
pub use indexmap::IndexSet;
pub use itertools::{izip, Itertools};
pub use noisy_float::prelude::*;
pub use serde::{Deserialize, Serialize};
pub use std::{fs, path::Path};
