// plot.rs - Heat map figures of coevolution matrices

use crate::core::Matrix;
use crate::error::{CoevolError, Result};
use crate::pipeline::FigureBackend;
use std::path::Path;
use std::str::FromStr;

/// Figure formats the plotters backend can write
pub const SUPPORTED_FORMATS: [&str; 3] = ["svg", "png", "pdf"];

/// Colour scales for the heat map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// White through yellow and orange to red
    Heat,
    Gray,
    Blues,
}

impl FromStr for Colormap {
    type Err = CoevolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "heat" => Ok(Colormap::Heat),
            "gray" | "grey" => Ok(Colormap::Gray),
            "blues" => Ok(Colormap::Blues),
            _ => Err(CoevolError::input(format!(
                "Invalid colormap: {}. Use: heat, gray, blues",
                s
            ))),
        }
    }
}

impl Colormap {
    /// RGB colour for a value scaled to 0..=1
    pub fn rgb(&self, t: f64) -> (u8, u8, u8) {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Colormap::Heat => {
                if t < 0.33 {
                    let s = t / 0.33;
                    (255, 255, ((1.0 - s) * 255.0) as u8)
                } else if t < 0.67 {
                    let s = (t - 0.33) / 0.34;
                    (255, (255.0 - s * 90.0) as u8, 0)
                } else {
                    let s = (t - 0.67) / 0.33;
                    (255, (165.0 * (1.0 - s)) as u8, 0)
                }
            }
            Colormap::Gray => {
                let v = ((1.0 - t) * 255.0) as u8;
                (v, v, v)
            }
            Colormap::Blues => (
                (247.0 - t * 239.0) as u8,
                (251.0 - t * 203.0) as u8,
                (255.0 - t * 148.0) as u8,
            ),
        }
    }
}

/// Extra render arguments given as `key=value` pairs
#[derive(Debug, Clone, PartialEq)]
pub struct RenderArgs {
    pub colormap: Colormap,
    pub colorbar: bool,
    pub grid: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            colormap: Colormap::Heat,
            colorbar: true,
            grid: false,
        }
    }
}

impl RenderArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                CoevolError::input(format!(
                    "Invalid figure argument '{}': expected key=value",
                    arg
                ))
            })?;
            match key.trim() {
                "colormap" | "cmap" => parsed.colormap = value.trim().parse()?,
                "colorbar" => parsed.colorbar = parse_bool(key, value)?,
                "grid" => parsed.grid = parse_bool(key, value)?,
                other => {
                    return Err(CoevolError::input(format!(
                        "Unknown figure argument '{}'. Available: colormap, colorbar, grid",
                        other
                    )))
                }
            }
        }
        Ok(parsed)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CoevolError::input(format!(
            "Invalid value '{}' for figure argument '{}': expected true or false",
            value, key
        ))),
    }
}

/// Size, format and styling of figure output
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    /// Inches
    pub width: f64,
    /// Inches
    pub height: f64,
    pub dpi: u32,
    pub format: String,
    pub args: RenderArgs,
    /// Accepted for compatibility, not applied to the colour scale
    pub cmin: Option<f64>,
    /// Accepted for compatibility, not applied to the colour scale
    pub cmax: Option<f64>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 6.0,
            dpi: 300,
            format: "pdf".to_string(),
            args: RenderArgs::default(),
            cmin: None,
            cmax: None,
        }
    }
}

impl FigureConfig {
    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| ((inches * self.dpi as f64).round() as u32).max(1);
        (px(self.width), px(self.height))
    }

    /// Canvas size of the vector page drawn for PDF output, in CSS pixels (96 per inch)
    pub fn page_size(&self) -> (u32, u32) {
        let px = |inches: f64| ((inches * 96.0).round() as u32).max(1);
        (px(self.width), px(self.height))
    }
}

/// Figure backend built on plotters (SVG and PNG, PDF through svg2pdf)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersBackend;

impl FigureBackend for PlottersBackend {
    fn check_format(&self, format: &str) -> Result<()> {
        if !cfg!(feature = "plot") {
            return Err(CoevolError::PlottingUnavailable(
                "coevol was built without the 'plot' feature".to_string(),
            ));
        }
        if SUPPORTED_FORMATS.contains(&format.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(CoevolError::PlottingUnavailable(format!(
                "no plotting backend for figure format '{}' (supported: {})",
                format,
                SUPPORTED_FORMATS.join(", ")
            )))
        }
    }

    fn render(&self, matrix: &Matrix, path: &Path, config: &FigureConfig) -> Result<()> {
        self.check_format(&config.format)?;
        render_heatmap(matrix, path, config)
    }

    fn name(&self) -> &'static str {
        "plotters"
    }
}

#[cfg(feature = "plot")]
fn render_heatmap(matrix: &Matrix, path: &Path, config: &FigureConfig) -> Result<()> {
    use plotters::prelude::*;

    let render_err = |e: String| CoevolError::Render {
        path: path.to_path_buf(),
        message: e,
    };

    match config.format.to_lowercase().as_str() {
        "png" => {
            let root = BitMapBackend::new(path, config.pixel_size()).into_drawing_area();
            heatmap::draw(&root, matrix, config).map_err(|e| render_err(e.to_string()))?;
            root.present().map_err(|e| render_err(e.to_string()))
        }
        "pdf" => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, config.page_size()).into_drawing_area();
                heatmap::draw(&root, matrix, config).map_err(|e| render_err(e.to_string()))?;
                root.present().map_err(|e| render_err(e.to_string()))?;
            }
            let pdf = svg_to_pdf(&svg).map_err(render_err)?;
            super::ensure_parent_dir(path)?;
            std::fs::write(path, pdf).map_err(|source| CoevolError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let root = SVGBackend::new(path, config.pixel_size()).into_drawing_area();
            heatmap::draw(&root, matrix, config).map_err(|e| render_err(e.to_string()))?;
            root.present().map_err(|e| render_err(e.to_string()))
        }
    }
}

/// Convert a rendered SVG document into a single-page PDF
#[cfg(feature = "plot")]
fn svg_to_pdf(svg: &str) -> std::result::Result<Vec<u8>, String> {
    use svg2pdf::{usvg, ConversionOptions, PageOptions};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| e.to_string())
}

#[cfg(not(feature = "plot"))]
fn render_heatmap(_matrix: &Matrix, _path: &Path, _config: &FigureConfig) -> Result<()> {
    Err(CoevolError::PlottingUnavailable(
        "coevol was built without the 'plot' feature".to_string(),
    ))
}

#[cfg(feature = "plot")]
mod heatmap {
    use super::FigureConfig;
    use crate::core::Matrix;
    use plotters::coord::Shift;
    use plotters::prelude::*;

    type DrawResult<DB> = std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

    /// Matrix cells against residue indices (row 0 at the bottom), with a labelled
    /// colour bar on the right when enabled
    pub(super) fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        matrix: &Matrix,
        config: &FigureConfig,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;

        let n = matrix.size();
        if n == 0 {
            return Ok(());
        }

        let (width, height) = root.dim_in_pixel();
        let font_size = (height as f64 * 0.03).max(10.0);
        let label_area = (font_size * 4.0) as u32;
        let margin = (font_size * 0.8) as u32;

        let (lo, hi) = matrix.min_max().unwrap_or((0.0, 0.0));
        let hi = if hi > lo { hi } else { lo + 1.0 };
        let span = hi - lo;
        let colormap = config.args.colormap;

        let (plot_area, bar_area) = if config.args.colorbar {
            let split = (width as f64 * 0.84) as u32;
            let (left, right) = root.split_horizontally(split);
            (left, Some(right))
        } else {
            (root.clone(), None)
        };

        let n_axis = n as f64;
        let mut chart = ChartBuilder::on(&plot_area)
            .margin(margin)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .build_cartesian_2d(0.0..n_axis, 0.0..n_axis)?;

        let index_label = |v: &f64| format!("{:.0}", v);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc("Residue index")
            .y_desc("Residue index")
            .x_label_formatter(&index_label)
            .y_label_formatter(&index_label)
            .label_style(("sans-serif", font_size))
            .axis_desc_style(("sans-serif", font_size));
        if !config.args.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        chart.draw_series((0..n).flat_map(|row| {
            (0..n).map(move |col| {
                let t = (matrix.get(row, col) - lo) / span;
                let (r, g, b) = colormap.rgb(t);
                Rectangle::new(
                    [(col as f64, row as f64), (col as f64 + 1.0, row as f64 + 1.0)],
                    RGBColor(r, g, b).filled(),
                )
            })
        }))?;

        if let Some(bar_area) = bar_area {
            let mut bar = ChartBuilder::on(&bar_area)
                .margin(margin)
                .x_label_area_size(label_area)
                .y_label_area_size(label_area)
                .build_cartesian_2d(0.0..1.0, lo..hi)?;

            let value_label = |v: &f64| format!("{:.3}", v);
            bar.configure_mesh()
                .disable_mesh()
                .disable_x_axis()
                .y_labels(6)
                .y_label_formatter(&value_label)
                .label_style(("sans-serif", font_size))
                .draw()?;

            let steps = 100;
            let step = span / steps as f64;
            bar.draw_series((0..steps).map(|i| {
                let y0 = lo + i as f64 * step;
                let (r, g, b) = colormap.rgb((i as f64 + 0.5) / steps as f64);
                Rectangle::new([(0.0, y0), (1.0, y0 + step)], RGBColor(r, g, b).filled())
            }))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args_parse() {
        let args = RenderArgs::parse(&[
            "colormap=gray".to_string(),
            "colorbar=false".to_string(),
            "grid=yes".to_string(),
        ])
        .unwrap();
        assert_eq!(args.colormap, Colormap::Gray);
        assert!(!args.colorbar);
        assert!(args.grid);

        assert_eq!(RenderArgs::parse(&[]).unwrap(), RenderArgs::default());
    }

    #[test]
    fn test_render_args_rejects_bad_input() {
        assert!(RenderArgs::parse(&["colormap".to_string()]).is_err());
        assert!(RenderArgs::parse(&["cmap=rainbow".to_string()]).is_err());
        assert!(RenderArgs::parse(&["grid=maybe".to_string()]).is_err());
        assert!(RenderArgs::parse(&["dpi=300".to_string()]).is_err());
    }

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(Colormap::Heat.rgb(0.0), (255, 255, 255));
        assert_eq!(Colormap::Heat.rgb(1.0), (255, 0, 0));
        assert_eq!(Colormap::Gray.rgb(1.0), (0, 0, 0));
        assert_eq!(Colormap::Gray.rgb(f64::NAN), (255, 255, 255));
    }

    #[test]
    fn test_pixel_size() {
        let config = FigureConfig::default();
        assert_eq!(config.pixel_size(), (2400, 1800));
        assert_eq!(config.format, "pdf");
    }

    #[test]
    fn test_check_format_rejects_unknown() {
        let backend = PlottersBackend;
        assert!(matches!(
            backend.check_format("eps"),
            Err(CoevolError::PlottingUnavailable(_))
        ));
    }

    #[cfg(feature = "plot")]
    #[test]
    fn test_default_figure_config_renders_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = Matrix::from_rows(vec![vec![0.0, 0.4], vec![0.4, 0.0]]).unwrap();
        let config = FigureConfig::default();
        let path = dir.path().join("piwi_refined_mutinfo.pdf");

        PlottersBackend.check_format(&config.format).unwrap();
        PlottersBackend.render(&matrix, &path, &config).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[cfg(feature = "plot")]
    #[test]
    fn test_render_svg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = Matrix::from_rows(vec![
            vec![0.0, 0.8, 0.1],
            vec![0.8, 0.0, 0.3],
            vec![0.1, 0.3, 0.0],
        ])
        .unwrap();
        let backend = PlottersBackend;

        for format in SUPPORTED_FORMATS {
            let config = FigureConfig {
                width: 2.0,
                height: 1.5,
                dpi: 50,
                format: format.to_string(),
                ..FigureConfig::default()
            };
            let path = dir.path().join(format!("heatmap.{}", format));
            backend.check_format(format).unwrap();
            backend.render(&matrix, &path, &config).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }

    #[cfg(feature = "plot")]
    #[test]
    fn test_svg_has_axis_and_colorbar_labels() {
        let dir = tempfile::tempdir().unwrap();
        let matrix = Matrix::from_rows(vec![vec![0.0, 0.25], vec![0.25, 0.0]]).unwrap();
        let config = FigureConfig {
            format: "svg".to_string(),
            ..FigureConfig::default()
        };
        let path = dir.path().join("heatmap.svg");
        PlottersBackend.render(&matrix, &path, &config).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Residue index"));
        assert!(svg.contains("0.000"));
    }
}
