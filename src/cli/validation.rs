// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::core::{CalcConfig, Correction, Normalization};
use crate::error::{CoevolError, Result};
use crate::output::{FigureConfig, NumberFormat, RenderArgs};
use crate::pipeline::{default_prefix, OutputConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub msa_path: PathBuf,
    pub calc: CalcConfig,
    pub output: OutputConfig,
    /// Requested normalization names, `None` when none were given
    pub normalization: Option<Vec<String>>,
    /// Requested correction names, `None` when none were given
    pub correction: Option<Vec<String>>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult> {
    let msa = args
        .msa
        .as_ref()
        .ok_or_else(|| CoevolError::input("An MSA file is required"))?;
    let msa_path = PathBuf::from(msa);
    if !msa_path.is_file() {
        return Err(CoevolError::input(format!(
            "Alignment file does not exist: {}",
            msa
        )));
    }

    // Variant names are checked against their own kind only
    check_names("normalization", &args.normalization, &Normalization::names())?;
    check_names("correction", &args.correction, &Correction::names())?;

    let number_format = NumberFormat::parse(&args.number_format)?;

    let figure = if args.save_plot {
        Some(validate_figure(args)?)
    } else {
        None
    };

    let prefix = match &args.prefix {
        Some(prefix) if prefix.is_empty() => {
            return Err(CoevolError::input("Output prefix must not be empty"))
        }
        Some(prefix) => prefix.clone(),
        None => default_prefix(msa),
    };

    Ok(ValidationResult {
        msa_path,
        calc: CalcConfig {
            ambiguity: !args.no_ambiguity,
            omit_gaps: !args.gaps,
        },
        output: OutputConfig {
            prefix,
            number_format,
            figure,
        },
        normalization: non_empty(&args.normalization),
        correction: non_empty(&args.correction),
    })
}

fn check_names(kind: &str, requested: &[String], allowed: &[&str]) -> Result<()> {
    for name in requested {
        if !allowed.contains(&name.as_str()) {
            return Err(CoevolError::input(format!(
                "Invalid {} '{}'. Available: {}",
                kind,
                name,
                allowed.join(", ")
            )));
        }
    }
    Ok(())
}

fn validate_figure(args: &Args) -> Result<FigureConfig> {
    let positive = |value: f64| value > 0.0;
    if !positive(args.figure_width) || !positive(args.figure_height) {
        return Err(CoevolError::input(format!(
            "Figure size must be positive, got {} x {}",
            args.figure_width, args.figure_height
        )));
    }
    if args.dpi == 0 {
        return Err(CoevolError::input("Figure dpi must be positive"));
    }
    let format = args.figure_format.trim().trim_start_matches('.').to_lowercase();
    if format.is_empty() {
        return Err(CoevolError::input("Figure format must not be empty"));
    }

    Ok(FigureConfig {
        width: args.figure_width,
        height: args.figure_height,
        dpi: args.dpi,
        format,
        args: RenderArgs::parse(&args.figure_arg)?,
        cmin: args.cmin,
        cmax: args.cmax,
    })
}

fn non_empty(names: &[String]) -> Option<Vec<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Colormap;

    fn args_for(dir: &tempfile::TempDir) -> Args {
        let path = dir.path().join("piwi_refined.slx");
        std::fs::write(&path, "seq1 ACDE\nseq2 ACDF\n").unwrap();
        Args {
            msa: Some(path.to_string_lossy().into_owned()),
            ..Args::empty()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_args(&args_for(&dir)).unwrap();

        assert_eq!(result.calc, CalcConfig::default());
        assert!(result
            .output
            .prefix
            .ends_with("piwi_refined_mutinfo"));
        assert_eq!(result.output.number_format, NumberFormat::default());
        assert_eq!(result.output.figure, None);
        assert_eq!(result.normalization, None);
        assert_eq!(result.correction, None);
    }

    #[test]
    fn test_missing_msa_rejected() {
        assert!(matches!(
            validate_args(&Args::empty()),
            Err(CoevolError::Input(_))
        ));
        let args = Args {
            msa: Some("/nonexistent/piwi.slx".to_string()),
            ..Args::empty()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_correction_name_as_normalization_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            normalization: strings(&["apc"]),
            ..args_for(&dir)
        };
        let err = validate_args(&args).unwrap_err();
        assert!(err.to_string().contains("normalization 'apc'"));

        let args = Args {
            correction: strings(&["minent"]),
            ..args_for(&dir)
        };
        assert!(validate_args(&args).is_err());

        let args = Args {
            normalization: strings(&["join"]),
            ..args_for(&dir)
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_switches_map_to_calc_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            no_ambiguity: true,
            gaps: true,
            normalization: strings(&["joint", "minent"]),
            correction: strings(&["apc"]),
            prefix: Some("out/run1".to_string()),
            ..args_for(&dir)
        };
        let result = validate_args(&args).unwrap();

        assert!(!result.calc.ambiguity);
        assert!(!result.calc.omit_gaps);
        assert_eq!(result.output.prefix, "out/run1");
        assert_eq!(result.normalization, Some(strings(&["joint", "minent"])));
        assert_eq!(result.correction, Some(strings(&["apc"])));
    }

    #[test]
    fn test_invalid_number_format_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            number_format: "%s".to_string(),
            ..args_for(&dir)
        };
        assert!(matches!(validate_args(&args), Err(CoevolError::Input(_))));
    }

    #[test]
    fn test_figure_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            save_plot: true,
            figure_format: ".SVG".to_string(),
            figure_arg: strings(&["colormap=blues", "grid=true"]),
            cmin: Some(0.0),
            cmax: Some(0.5),
            ..args_for(&dir)
        };
        let figure = validate_args(&args).unwrap().output.figure.unwrap();

        assert_eq!(figure.format, "svg");
        assert_eq!(figure.args.colormap, Colormap::Blues);
        assert!(figure.args.grid);
        assert_eq!(figure.cmax, Some(0.5));
    }

    #[test]
    fn test_invalid_figure_options_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for args in [
            Args {
                save_plot: true,
                figure_width: 0.0,
                ..args_for(&dir)
            },
            Args {
                save_plot: true,
                dpi: 0,
                ..args_for(&dir)
            },
            Args {
                save_plot: true,
                figure_arg: strings(&["colormap"]),
                ..args_for(&dir)
            },
        ] {
            assert!(matches!(validate_args(&args), Err(CoevolError::Input(_))));
        }
    }

    #[test]
    fn test_colour_limits_accepted_in_any_order() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            save_plot: true,
            cmin: Some(1.0),
            cmax: Some(0.0),
            ..args_for(&dir)
        };
        let figure = validate_args(&args).unwrap().output.figure.unwrap();
        assert_eq!(figure.cmin, Some(1.0));
        assert_eq!(figure.cmax, Some(0.0));

        // Without figures the limits are still accepted
        let args = Args {
            cmin: Some(5.0),
            cmax: Some(-5.0),
            ..args_for(&dir)
        };
        assert!(validate_args(&args).is_ok());
    }
}
