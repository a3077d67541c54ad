// config.rs - Configuration file support

use crate::error::{CoevolError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Output
    pub prefix: Option<String>,
    pub number_format: Option<String>,

    // Matrix variants
    pub normalization: Option<Vec<String>>,
    pub correction: Option<Vec<String>>,

    // Calculation settings
    pub no_ambiguity: Option<bool>,
    pub gaps: Option<bool>,

    // Figures
    pub save_plot: Option<bool>,
    pub figure_width: Option<f64>,
    pub figure_height: Option<f64>,
    pub figure_dpi: Option<u32>,
    pub figure_format: Option<String>,
    pub figure_args: Option<Vec<String>>,
    pub cmin: Option<f64>,
    pub cmax: Option<f64>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CoevolError::input(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            CoevolError::input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| CoevolError::input(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|source| CoevolError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# coevol.toml - Configuration file for coevol
# Command line arguments will override these settings

# =============================================================================
# OUTPUT
# =============================================================================

# Output filename prefix (default: input name without extension plus _mutinfo)
# prefix = "piwi_refined_mutinfo"

# printf-style number format for text matrices
number_format = "%12g"

# =============================================================================
# MATRIX VARIANTS
# =============================================================================

# Normalizations: sument, minent, maxent, mincon, maxcon, joint
normalization = ["joint", "minent"]

# Corrections: apc, asc
correction = ["apc"]

# =============================================================================
# CALCULATION
# =============================================================================

# Treat amino acids B, Z, J and X as non-ambiguous
no_ambiguity = false

# Do not omit gap characters
gaps = false

# =============================================================================
# FIGURES
# =============================================================================

# Save a heatmap for every matrix
save_plot = false

# Figure size in inches and resolution
figure_width = 8.0
figure_height = 6.0
figure_dpi = 300

# Figure file format: svg, png
figure_format = "svg"

# Extra render arguments: colormap (heat, gray, blues), colorbar, grid
figure_args = ["colormap=heat", "colorbar=true"]

# Colour scale limits (accepted, currently not applied)
# cmin = 0.0
# cmax = 1.0
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: Config = toml::from_str(&Config::generate_sample()).unwrap();
        assert_eq!(config.number_format.as_deref(), Some("%12g"));
        assert_eq!(
            config.normalization,
            Some(vec!["joint".to_string(), "minent".to_string()])
        );
        assert_eq!(config.figure_dpi, Some(300));
        assert_eq!(config.cmin, None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coevol.toml");
        let config = Config {
            prefix: Some("out/piwi".to_string()),
            correction: Some(vec!["asc".to_string()]),
            save_plot: Some(true),
            ..Config::new()
        };

        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "normalization = 3\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(CoevolError::Input(_))
        ));
        assert!(Config::from_file(dir.path().join("missing.toml")).is_err());
    }
}
