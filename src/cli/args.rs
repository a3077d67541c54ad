// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// coevol - Mutual information based coevolution analysis of refined MSAs
pub struct Args {
    /// refined MSA file (FASTA, SELEX or Stockholm, optionally gzipped)
    #[argh(positional)]
    pub msa: Option<String>,

    /// treat amino acids B, Z, J and X as non-ambiguous
    #[argh(switch, short = 'n')]
    pub no_ambiguity: bool,

    /// do not omit gap characters
    #[argh(switch, short = 'g')]
    pub gaps: bool,

    /// apply a correction to the MI matrix (repeatable): apc, asc
    #[argh(option, short = 'c')]
    pub correction: Vec<String>,

    /// apply a normalization to the MI matrix (repeatable): sument, minent, maxent, mincon, maxcon, joint
    #[argh(option, short = 'm')]
    pub normalization: Vec<String>,

    /// output filename prefix (default: input name without extension plus _mutinfo)
    #[argh(option, short = 'p')]
    pub prefix: Option<String>,

    /// printf-style number format for text output (default: %12g)
    #[argh(option, short = 'f', default = "String::from(\"%12g\")")]
    pub number_format: String,

    /// save a heatmap figure for every matrix
    #[argh(switch, short = 'S')]
    pub save_plot: bool,

    /// colour scale minimum (accepted, currently not applied)
    #[argh(option, short = 'L')]
    pub cmin: Option<f64>,

    /// colour scale maximum (accepted, currently not applied)
    #[argh(option, short = 'U')]
    pub cmax: Option<f64>,

    /// figure width in inches (default: 8)
    #[argh(option, short = 'W', default = "8.0")]
    pub figure_width: f64,

    /// figure height in inches (default: 6)
    #[argh(option, short = 'H', default = "6.0")]
    pub figure_height: f64,

    /// figure resolution in dots per inch (default: 300)
    #[argh(option, short = 'D', default = "300")]
    pub dpi: u32,

    /// figure file format: svg, png, pdf (default: pdf)
    #[argh(option, short = 'F', default = "String::from(\"pdf\")")]
    pub figure_format: String,

    /// extra figure argument as key=value (repeatable): colormap, colorbar, grid
    #[argh(option, short = 'A')]
    pub figure_arg: Vec<String>,

    /// load configuration from TOML file (CLI args override config file)
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// validate inputs and list planned artifacts without writing anything
    #[argh(switch)]
    pub dry_run: bool,
}

impl Args {
    /// Arguments with every option at its default and no input file
    pub fn empty() -> Self {
        Self {
            msa: None,
            no_ambiguity: false,
            gaps: false,
            correction: Vec::new(),
            normalization: Vec::new(),
            prefix: None,
            number_format: "%12g".to_string(),
            save_plot: false,
            cmin: None,
            cmax: None,
            figure_width: 8.0,
            figure_height: 6.0,
            dpi: 300,
            figure_format: "pdf".to_string(),
            figure_arg: Vec::new(),
            config: None,
            generate_config: false,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["coevol"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["piwi_refined.slx"]);
        assert_eq!(args.msa.as_deref(), Some("piwi_refined.slx"));
        assert_eq!(
            args,
            Args {
                msa: Some("piwi_refined.slx".to_string()),
                ..Args::empty()
            }
        );
    }

    #[test]
    fn test_repeatable_options_keep_order() {
        let args = parse(&[
            "-m", "joint", "--normalization", "minent", "-c", "apc", "-c", "asc", "piwi.slx",
        ]);
        assert_eq!(args.normalization, vec!["joint", "minent"]);
        assert_eq!(args.correction, vec!["apc", "asc"]);
    }

    #[test]
    fn test_figure_options() {
        let args = parse(&[
            "-S", "-F", "svg", "-W", "4", "-H", "3.5", "-D", "72", "-A", "colormap=gray", "-L",
            "0.1", "piwi.slx",
        ]);
        assert!(args.save_plot);
        assert_eq!(args.figure_format, "svg");
        assert_eq!(args.figure_width, 4.0);
        assert_eq!(args.figure_height, 3.5);
        assert_eq!(args.dpi, 72);
        assert_eq!(args.figure_arg, vec!["colormap=gray"]);
        assert_eq!(args.cmin, Some(0.1));
        assert_eq!(args.cmax, None);
    }

    #[test]
    fn test_switches() {
        let args = parse(&["-n", "-g", "--dry-run", "piwi.slx"]);
        assert!(args.no_ambiguity);
        assert!(args.gaps);
        assert!(args.dry_run);
    }
}
