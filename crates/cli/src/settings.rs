use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use anchorbox_core::clustering::infrastructure::aggregator_factory::AggregatorKind;
use anchorbox_core::shared::constants::{DEFAULT_CLUSTERS, DEFAULT_HISTOGRAM_BINS};

/// Clustering defaults, read from a JSON file and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clusters: usize,
    pub normalize: bool,
    pub aggregator: AggregatorKind,
    pub seed: Option<u64>,
    pub max_iterations: Option<usize>,
    pub histogram_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            normalize: true,
            aggregator: AggregatorKind::Median,
            seed: None,
            max_iterations: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("AnchorBox").join("settings.json"))
    }

    /// Loads the user config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Loads an explicitly requested config file; errors are surfaced.
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.clusters, 9);
        assert!(s.normalize);
        assert_eq!(s.aggregator, AggregatorKind::Median);
        assert_eq!(s.seed, None);
        assert_eq!(s.max_iterations, None);
        assert_eq!(s.histogram_bins, 50);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{ "clusters": 5, "aggregator": "mean", "seed": 7 }"#).unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.clusters, 5);
        assert_eq!(s.aggregator, AggregatorKind::Mean);
        assert_eq!(s.seed, Some(7));
        assert!(s.normalize);
        assert_eq!(s.histogram_bins, 50);
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        let s = Settings {
            clusters: 6,
            normalize: false,
            aggregator: AggregatorKind::Mean,
            seed: Some(1),
            max_iterations: Some(300),
            histogram_bins: 20,
        };
        fs::write(&path, serde_json::to_string_pretty(&s).unwrap()).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), s);
    }

    #[test]
    fn test_unknown_aggregator_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, r#"{ "aggregator": "mode" }"#).unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(Settings::load_from(&tmp.path().join("absent.json")).is_err());
    }
}
