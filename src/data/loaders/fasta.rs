// fasta.rs - FASTA alignment loader

use crate::data::msa::Alignment;
use crate::error::{CoevolError, Result};
use bio::io::fasta;
use std::io::Read;

impl Alignment {
    /// Load an aligned FASTA stream (gaps kept as written)
    pub fn from_fasta_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = fasta::Reader::new(reader);
        let mut labels = Vec::new();
        let mut sequences = Vec::new();

        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| CoevolError::input(format!("Invalid FASTA record: {}", e)))?;
            labels.push(record.id().to_string());
            sequences.push(record.seq().to_vec());
        }

        Self::new(labels, sequences)
    }
}
