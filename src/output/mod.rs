// mod.rs - Output writers module

pub mod format;
pub mod plot;

pub use format::NumberFormat;
pub use plot::{Colormap, FigureConfig, PlottersBackend, RenderArgs};

use crate::core::Matrix;
use crate::error::{CoevolError, Result};
use crate::pipeline::MatrixWriter;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|source| CoevolError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Write a matrix as whitespace-separated text, one row per line, preceded by
/// `#` lines naming the generator version and the matrix shape. The output depends
/// only on the matrix and the format, so identical runs give identical files.
pub fn write_matrix_text(file_path: &Path, matrix: &Matrix, format: &NumberFormat) -> Result<()> {
    ensure_parent_dir(file_path)?;
    let write_err = |source: std::io::Error| CoevolError::Write {
        path: file_path.to_path_buf(),
        source,
    };

    let file = File::create(file_path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# coevol v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    writeln!(writer, "# Matrix: {} x {}", matrix.size(), matrix.size()).map_err(write_err)?;

    // Write matrix
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|&value| format.format(value))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line).map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;
    tracing::debug!(path = %file_path.display(), "matrix written");
    Ok(())
}

/// Text writer used by the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatrixWriter;

impl MatrixWriter for TextMatrixWriter {
    fn write_matrix(&self, path: &Path, matrix: &Matrix, format: &NumberFormat) -> Result<()> {
        write_matrix_text(path, matrix, format)
    }
}
