use crate::common::*;

pub static CONFIG_VERSION: Lazy<VersionReq> = Lazy::new(|| VersionReq::parse("0.1.0").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_version")]
    pub version: Version,
    pub vocabulary: VocabularyConfig,
    /// Ensemble thresholds; defaults to conf 0.25 and IoU 0.7.
    #[serde(default)]
    pub ensemble: EnsembleInit,
    /// Recorded detectors, queried in list order.
    pub detectors: Vec<DetectorConfig>,
    pub output: OutputConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config = json5::from_str(&text)?;
        Ok(config)
    }
}

/// Shared vocabulary options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Newline-separated class names; line number is the global class id.
    pub classes_file: PathBuf,
}

/// One recorded detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub name: String,
    /// The detector's private class list.
    pub classes_file: PathBuf,
    /// Recorded per-frame predictions in JSON.
    pub predictions_file: PathBuf,
}

/// Result output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Merged detections are written into a timestamped subdirectory.
    pub output_dir: PathBuf,
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;

    if !CONFIG_VERSION.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, &*CONFIG_VERSION,
        )));
    }

    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
{
    version: "0.1.0",
    vocabulary: { classes_file: "classes.txt" },
    ensemble: { confidence_threshold: 0.7, iou_threshold: 0.5 },
    detectors: [
        { name: "detector1", classes_file: "detector1/classes.txt", predictions_file: "detector1/predictions.json" },
        { name: "detector2", classes_file: "detector2/classes.txt", predictions_file: "detector2/predictions.json" },
    ],
    output: { output_dir: "logs/detection" },
}
"#;

    #[test]
    fn config_parses_json5() {
        let config: Config = json5::from_str(EXAMPLE).unwrap();
        assert_eq!(config.detectors.len(), 2);
        assert_eq!(config.ensemble.confidence_threshold, 0.7);
        assert_eq!(config.ensemble.iou_threshold, 0.5);
    }

    #[test]
    fn config_ensemble_section_is_optional() {
        let text = r#"
{
    version: "0.1.0",
    vocabulary: { classes_file: "classes.txt" },
    detectors: [],
    output: { output_dir: "logs/detection" },
}
"#;
        let config: Config = json5::from_str(text).unwrap();
        assert_eq!(config.ensemble.confidence_threshold, 0.25);
        assert_eq!(config.ensemble.iou_threshold, 0.7);
    }

    #[test]
    fn config_rejects_incompatible_version() {
        let text = EXAMPLE.replace("0.1.0", "9.0.0");
        assert!(json5::from_str::<Config>(&text).is_err());
    }
}
