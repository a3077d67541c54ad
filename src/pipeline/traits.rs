// traits.rs - Collaborator interfaces consumed by the output pipeline

use crate::core::{self, CalcConfig, Correction, Matrix, Normalization};
use crate::data::Alignment;
use crate::error::Result;
use crate::output::FigureConfig;
use crate::output::NumberFormat;
use std::fmt::Debug;
use std::path::Path;

/// Numerical routines that produce every matrix variant
pub trait MutinfoKernels: Debug {
    /// Mutual information matrix; `joint_norm` divides by the pair joint entropy
    fn build_mutinfo(&self, msa: &Alignment, config: &CalcConfig, joint_norm: bool) -> Result<Matrix>;

    /// Per-column Shannon entropy
    fn shannon_entropy(&self, msa: &Alignment, config: &CalcConfig) -> Result<Vec<f64>>;

    fn normalize(&self, mutinfo: &Matrix, entropy: &[f64], norm: Normalization) -> Result<Matrix>;

    fn correct(&self, mutinfo: &Matrix, corr: Correction) -> Result<Matrix>;
}

/// Persists a matrix as a text artifact
pub trait MatrixWriter: Debug {
    fn write_matrix(&self, path: &Path, matrix: &Matrix, format: &NumberFormat) -> Result<()>;
}

/// Renders a matrix to a figure file
pub trait FigureBackend: Debug {
    /// Check that figures in `format` can be produced at all.
    /// Errors are expected to be `CoevolError::PlottingUnavailable`.
    fn check_format(&self, format: &str) -> Result<()>;

    fn render(&self, matrix: &Matrix, path: &Path, config: &FigureConfig) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Kernels backed by `crate::core`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultKernels;

impl MutinfoKernels for DefaultKernels {
    fn build_mutinfo(&self, msa: &Alignment, config: &CalcConfig, joint_norm: bool) -> Result<Matrix> {
        core::build_mutinfo_matrix(msa, config, joint_norm)
    }

    fn shannon_entropy(&self, msa: &Alignment, config: &CalcConfig) -> Result<Vec<f64>> {
        core::calc_shannon_entropy(msa, config)
    }

    fn normalize(&self, mutinfo: &Matrix, entropy: &[f64], norm: Normalization) -> Result<Matrix> {
        core::apply_mutinfo_norm(mutinfo, entropy, norm)
    }

    fn correct(&self, mutinfo: &Matrix, corr: Correction) -> Result<Matrix> {
        core::apply_mutinfo_corr(mutinfo, corr)
    }
}
