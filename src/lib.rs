// lib.rs - coevol library root

//! # coevol - Residue coevolution analysis for refined multiple sequence alignments
//!
//! This library computes the mutual information (MI) matrix between alignment columns
//! and derives entropy-normalized and background-corrected variants of it, writing each
//! variant as a text matrix and, optionally, as a heatmap figure.
//!
//! ## Features
//!
//! - **Alignment input**: FASTA, SELEX and Stockholm, plain or gzipped
//! - **Normalizations**: sument, minent, maxent, mincon, maxcon, joint
//! - **Corrections**: average product (APC) and average sum (ASC)
//! - **Text output**: printf-style number formats with a commented header
//! - **Figures**: SVG/PNG heatmaps through plotters (`plot` feature)
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use coevol::prelude::*;
//!
//! let msa = Alignment::from_file(std::path::Path::new("piwi_refined.slx"))?;
//! let calc = CalcConfig::default();
//! let mutinfo = build_mutinfo_matrix(&msa, &calc, false)?;
//!
//! let norms = vec!["joint".to_string(), "minent".to_string()];
//! let tasks = plan_tasks(Some(&norms), None)?;
//!
//! let config = OutputConfig {
//!     prefix: default_prefix("piwi_refined.slx"),
//!     number_format: NumberFormat::default(),
//!     figure: None,
//! };
//! let report = OutputDriver::new(
//!     &DefaultKernels,
//!     &TextMatrixWriter,
//!     &PlottersBackend,
//!     &config,
//! )
//! .run(&tasks, &msa, &calc, &mutinfo)?;
//! println!("{} matrices written", report.text_artifacts.len());
//! # Ok::<(), coevol::CoevolError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod pipeline;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{apply_mutinfo_corr, apply_mutinfo_norm};
    pub use crate::core::{build_mutinfo_matrix, calc_shannon_entropy};
    pub use crate::core::{CalcConfig, Correction, Matrix, Normalization};
    pub use crate::data::{Alignment, AlignmentFormat};
    pub use crate::error::{CoevolError, Result};
    pub use crate::output::{FigureConfig, NumberFormat, PlottersBackend, TextMatrixWriter};
    pub use crate::pipeline::{default_prefix, plan_tasks, Task};
    pub use crate::pipeline::{DefaultKernels, OutputConfig, OutputDriver, RunReport};
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{CalcConfig, Correction, Matrix, Normalization};
pub use data::Alignment;
pub use error::CoevolError;
pub use pipeline::{OutputDriver, Task};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "coevol v{} - Mutual information coevolution analysis for MSAs",
        VERSION
    )
}
