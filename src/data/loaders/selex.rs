// selex.rs - SELEX and Stockholm alignment loader

use crate::data::msa::Alignment;
use crate::error::{CoevolError, Result};
use std::collections::HashMap;
use std::io::BufRead;

impl Alignment {
    /// Load a SELEX or Stockholm stream.
    ///
    /// Both formats hold `label sequence` lines; interleaved blocks are concatenated
    /// per label in order of first appearance. `#` lines are markup and are skipped.
    /// In Stockholm mode parsing stops at the `//` terminator.
    pub fn from_selex_reader<R: BufRead>(reader: R, stockholm: bool) -> Result<Self> {
        let mut labels: Vec<String> = Vec::new();
        let mut sequences: Vec<Vec<u8>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                CoevolError::input(format!("Failed to read line {}: {}", line_num + 1, e))
            })?;
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if trimmed == "//" {
                if stockholm {
                    break;
                }
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let label = parts.next().unwrap_or_default();
            let residues: Vec<u8> = parts.flat_map(|part| part.bytes()).collect();
            if residues.is_empty() {
                return Err(CoevolError::input(format!(
                    "Line {} has a label but no residues",
                    line_num + 1
                )));
            }

            match index.get(label) {
                Some(&i) => sequences[i].extend_from_slice(&residues),
                None => {
                    index.insert(label.to_string(), labels.len());
                    labels.push(label.to_string());
                    sequences.push(residues);
                }
            }
        }

        Self::new(labels, sequences)
    }
}
