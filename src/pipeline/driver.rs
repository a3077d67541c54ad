// driver.rs - Computes each planned matrix variant and emits its artifacts

use crate::core::{CalcConfig, Matrix, Normalization};
use crate::data::Alignment;
use crate::error::{CoevolError, Result};
use crate::output::{FigureConfig, NumberFormat};
use crate::pipeline::prefix::artifact_path;
use crate::pipeline::tasks::Task;
use crate::pipeline::traits::{FigureBackend, MatrixWriter, MutinfoKernels};
use std::borrow::Cow;
use std::path::PathBuf;

/// Where and how artifacts are written
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub prefix: String,
    pub number_format: NumberFormat,
    /// `None` disables figure output
    pub figure: Option<FigureConfig>,
}

impl OutputConfig {
    pub fn text_path(&self, task: &Task) -> PathBuf {
        PathBuf::from(artifact_path(&self.prefix, &task.suffix(), ".txt"))
    }

    pub fn figure_path(&self, task: &Task) -> Option<PathBuf> {
        self.figure.as_ref().map(|figure| {
            PathBuf::from(artifact_path(
                &self.prefix,
                &task.suffix(),
                &format!(".{}", figure.format),
            ))
        })
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Text artifacts in write order; repeated tasks repeat their path
    pub text_artifacts: Vec<PathBuf>,
    pub figures: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Result of checking the figure backend, kept for the rest of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotState {
    Unchecked,
    Ready,
    Unavailable,
}

/// Drives one run over a planned task list.
///
/// Owns the lazily computed entropy and the plotting availability check; both live as
/// long as the driver and are never shared with another run.
#[derive(Debug)]
pub struct OutputDriver<'a> {
    kernels: &'a dyn MutinfoKernels,
    writer: &'a dyn MatrixWriter,
    plotter: &'a dyn FigureBackend,
    config: &'a OutputConfig,
    entropy: Option<Vec<f64>>,
    plot_state: PlotState,
    report: RunReport,
}

impl<'a> OutputDriver<'a> {
    pub fn new(
        kernels: &'a dyn MutinfoKernels,
        writer: &'a dyn MatrixWriter,
        plotter: &'a dyn FigureBackend,
        config: &'a OutputConfig,
    ) -> Self {
        Self {
            kernels,
            writer,
            plotter,
            config,
            entropy: None,
            plot_state: PlotState::Unchecked,
            report: RunReport::default(),
        }
    }

    /// Process every task in order. Stops at the first fatal error; figure
    /// problems and non-fatal writer errors are recorded as warnings in the
    /// returned report.
    pub fn run(
        mut self,
        tasks: &[Task],
        msa: &Alignment,
        calc: &CalcConfig,
        mutinfo: &Matrix,
    ) -> Result<RunReport> {
        let config = self.config;
        if let Some(figure) = &config.figure {
            if figure.cmin.is_some() || figure.cmax.is_some() {
                tracing::debug!(
                    cmin = ?figure.cmin,
                    cmax = ?figure.cmax,
                    "figure colour limits are accepted but not applied"
                );
            }
        }

        for task in tasks {
            let matrix = self.compute(task, msa, calc, mutinfo)?;

            let text_path = config.text_path(task);
            match self
                .writer
                .write_matrix(&text_path, &matrix, &config.number_format)
            {
                Ok(()) => {
                    tracing::info!("{} written to {}", task, text_path.display());
                    self.report.text_artifacts.push(text_path);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => self.warn(e.to_string()),
            }

            self.emit_figure(task, &matrix);
        }

        Ok(self.report)
    }

    fn compute<'m>(
        &mut self,
        task: &Task,
        msa: &Alignment,
        calc: &CalcConfig,
        mutinfo: &'m Matrix,
    ) -> Result<Cow<'m, Matrix>> {
        match task {
            Task::Base => Ok(Cow::Borrowed(mutinfo)),
            Task::Norm(Normalization::Joint) => {
                tracing::info!("Applying {}.", task);
                Ok(Cow::Owned(self.kernels.build_mutinfo(msa, calc, true)?))
            }
            Task::Norm(norm) => {
                tracing::info!("Applying {}.", task);
                if self.entropy.is_none() {
                    tracing::debug!("computing Shannon entropy for normalization");
                    self.entropy = Some(self.kernels.shannon_entropy(msa, calc)?);
                }
                let entropy = self.entropy.as_deref().unwrap_or(&[]);
                Ok(Cow::Owned(self.kernels.normalize(mutinfo, entropy, *norm)?))
            }
            Task::Corr(corr) => {
                tracing::info!("Applying {}.", task);
                Ok(Cow::Owned(self.kernels.correct(mutinfo, *corr)?))
            }
        }
    }

    fn emit_figure(&mut self, task: &Task, matrix: &Matrix) {
        let config = self.config;
        let (Some(figure), Some(path)) = (&config.figure, config.figure_path(task)) else {
            return;
        };

        match self.plot_state {
            PlotState::Unavailable => return,
            PlotState::Ready => {}
            PlotState::Unchecked => match self.plotter.check_format(&figure.format) {
                Ok(()) => self.plot_state = PlotState::Ready,
                Err(e) => {
                    self.plot_state = PlotState::Unavailable;
                    self.warn(format!("{}, figures are not saved.", e));
                    return;
                }
            },
        }

        match self.plotter.render(matrix, &path, figure) {
            Ok(()) => {
                tracing::info!("figure saved to {}", path.display());
                self.report.figures.push(path);
            }
            Err(CoevolError::PlottingUnavailable(message)) => {
                self.plot_state = PlotState::Unavailable;
                self.warn(format!(
                    "plotting unavailable: {}, figures are not saved.",
                    message
                ));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.report.warnings.push(message);
    }
}
