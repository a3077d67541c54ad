// msa.rs - Multiple sequence alignment container and file dispatch

use crate::error::{CoevolError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Supported alignment file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Fasta,
    Selex,
    Stockholm,
}

impl FromStr for AlignmentFormat {
    type Err = CoevolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fasta" | "fa" | "fas" | "faa" => Ok(AlignmentFormat::Fasta),
            "selex" | "slx" => Ok(AlignmentFormat::Selex),
            "stockholm" | "sth" | "stk" => Ok(AlignmentFormat::Stockholm),
            _ => Err(CoevolError::input(format!(
                "Unknown alignment format: {}. Use: fasta, selex, stockholm",
                s
            ))),
        }
    }
}

impl AlignmentFormat {
    /// Guess the format from a file name, ignoring a trailing `.gz`
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut path = path.to_path_buf();
        if is_gzipped(&path) {
            path.set_extension("");
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Guess the format from the first non-empty line of the file
    pub fn sniff(first_line: &str) -> Self {
        let line = first_line.trim_start();
        if line.starts_with('>') {
            AlignmentFormat::Fasta
        } else if line.to_uppercase().starts_with("# STOCKHOLM") {
            AlignmentFormat::Stockholm
        } else {
            AlignmentFormat::Selex
        }
    }
}

/// A refined multiple sequence alignment: one label and one residue row per sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub labels: Vec<String>,
    pub sequences: Vec<Vec<u8>>,
}

impl Alignment {
    /// Build an alignment, upper-casing residues and checking row lengths
    pub fn new(labels: Vec<String>, sequences: Vec<Vec<u8>>) -> Result<Self> {
        if sequences.is_empty() {
            return Err(CoevolError::input("Alignment contains no sequences"));
        }
        if labels.len() != sequences.len() {
            return Err(CoevolError::input(format!(
                "Alignment has {} labels but {} sequences",
                labels.len(),
                sequences.len()
            )));
        }

        let width = sequences[0].len();
        if width == 0 {
            return Err(CoevolError::input("Alignment sequences are empty"));
        }
        for (label, seq) in labels.iter().zip(&sequences) {
            if seq.len() != width {
                return Err(CoevolError::input(format!(
                    "Sequence '{}' has length {}, expected {}",
                    label,
                    seq.len(),
                    width
                )));
            }
        }

        let sequences = sequences
            .into_iter()
            .map(|seq| seq.to_ascii_uppercase())
            .collect();

        Ok(Self { labels, sequences })
    }

    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Number of alignment columns (residue positions)
    pub fn num_columns(&self) -> usize {
        self.sequences.first().map(|s| s.len()).unwrap_or(0)
    }

    /// Residues of one column, top to bottom
    pub fn column(&self, index: usize) -> Vec<u8> {
        self.sequences.iter().map(|seq| seq[index]).collect()
    }

    /// Load an alignment file, detecting the format and `.gz` compression
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CoevolError::input(format!(
                "Alignment file does not exist: {}",
                path.display()
            )));
        }

        let mut reader = open_reader(path)?;
        let format = match AlignmentFormat::from_path(path) {
            Some(format) => format,
            None => {
                let first = peek_first_line(&mut reader).map_err(|e| {
                    CoevolError::input(format!("Failed to read '{}': {}", path.display(), e))
                })?;
                AlignmentFormat::sniff(&first)
            }
        };

        tracing::debug!(path = %path.display(), ?format, "parsing alignment");
        let alignment = match format {
            AlignmentFormat::Fasta => Self::from_fasta_reader(reader),
            AlignmentFormat::Selex => Self::from_selex_reader(reader, false),
            AlignmentFormat::Stockholm => Self::from_selex_reader(reader, true),
        }
        .map_err(|e| match e {
            CoevolError::Input(msg) => {
                CoevolError::Input(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;

        tracing::info!(
            sequences = alignment.num_sequences(),
            columns = alignment.num_columns(),
            "alignment loaded from {}",
            path.display()
        );
        Ok(alignment)
    }
}

pub(crate) fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| {
        CoevolError::input(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Look at the first non-empty line without consuming it
fn peek_first_line(reader: &mut Box<dyn BufRead>) -> std::io::Result<String> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(String::new());
        }
        let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        if skip < buf.len() {
            reader.consume(skip);
            let buf = reader.fill_buf()?;
            let end = buf.iter().position(|&b| b == b'\n').unwrap_or(buf.len());
            return Ok(String::from_utf8_lossy(&buf[..end]).into_owned());
        }
        let len = buf.len();
        reader.consume(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            AlignmentFormat::from_path(Path::new("piwi_refined.slx")),
            Some(AlignmentFormat::Selex)
        );
        assert_eq!(
            AlignmentFormat::from_path(Path::new("piwi_refined.slx.gz")),
            Some(AlignmentFormat::Selex)
        );
        assert_eq!(
            AlignmentFormat::from_path(Path::new("data/pf.FASTA")),
            Some(AlignmentFormat::Fasta)
        );
        assert_eq!(
            AlignmentFormat::from_path(Path::new("pf.sth")),
            Some(AlignmentFormat::Stockholm)
        );
        assert_eq!(AlignmentFormat::from_path(Path::new("alignment")), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(AlignmentFormat::sniff(">seq1"), AlignmentFormat::Fasta);
        assert_eq!(
            AlignmentFormat::sniff("# STOCKHOLM 1.0"),
            AlignmentFormat::Stockholm
        );
        assert_eq!(AlignmentFormat::sniff("seq1 ACDE"), AlignmentFormat::Selex);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Alignment::new(
            vec!["a".into(), "b".into()],
            vec![b"ACD".to_vec(), b"AC".to_vec()],
        );
        assert!(matches!(result, Err(CoevolError::Input(_))));
        assert!(Alignment::new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_new_uppercases() {
        let msa = Alignment::new(vec!["a".into()], vec![b"acd-".to_vec()]).unwrap();
        assert_eq!(msa.sequences[0], b"ACD-".to_vec());
        assert_eq!(msa.num_columns(), 4);
        assert_eq!(msa.column(1), vec![b'C']);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Alignment::from_file(Path::new("/nonexistent/piwi.slx"));
        assert!(matches!(result, Err(CoevolError::Input(_))));
    }

    #[test]
    fn test_from_file_gzipped_selex() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piwi_refined.slx.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"seq1 ACDE\nseq2 ACDF\n").unwrap();
        encoder.finish().unwrap();

        let msa = Alignment::from_file(&path).unwrap();
        assert_eq!(msa.labels, vec!["seq1".to_string(), "seq2".to_string()]);
        assert_eq!(msa.num_columns(), 4);
    }

    #[test]
    fn test_from_file_sniffs_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alignment.txt");
        std::fs::write(&path, "\n\n>seq1\nACDE\n>seq2\nAC-E\n").unwrap();

        let msa = Alignment::from_file(&path).unwrap();
        assert_eq!(msa.num_sequences(), 2);
        assert_eq!(msa.sequences[1], b"AC-E".to_vec());
    }
}
