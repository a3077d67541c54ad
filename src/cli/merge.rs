// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Output
        if self.prefix.is_none() {
            self.prefix = config.prefix;
        }
        if self.number_format == "%12g" {
            if let Some(number_format) = config.number_format {
                self.number_format = number_format;
            }
        }

        // Matrix variants (repeatable options only filled when none were given)
        if self.normalization.is_empty() {
            self.normalization = config.normalization.unwrap_or_default();
        }
        if self.correction.is_empty() {
            self.correction = config.correction.unwrap_or_default();
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_ambiguity && config.no_ambiguity.unwrap_or(false) {
            self.no_ambiguity = true;
        }
        if !self.gaps && config.gaps.unwrap_or(false) {
            self.gaps = true;
        }
        if !self.save_plot && config.save_plot.unwrap_or(false) {
            self.save_plot = true;
        }

        // Figures (only override defaults)
        if self.figure_width == 8.0 {
            if let Some(width) = config.figure_width {
                self.figure_width = width;
            }
        }
        if self.figure_height == 6.0 {
            if let Some(height) = config.figure_height {
                self.figure_height = height;
            }
        }
        if self.dpi == 300 {
            if let Some(dpi) = config.figure_dpi {
                self.dpi = dpi;
            }
        }
        if self.figure_format == "pdf" {
            if let Some(format) = config.figure_format {
                self.figure_format = format;
            }
        }
        if self.figure_arg.is_empty() {
            self.figure_arg = config.figure_args.unwrap_or_default();
        }
        if self.cmin.is_none() {
            self.cmin = config.cmin;
        }
        if self.cmax.is_none() {
            self.cmax = config.cmax;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
