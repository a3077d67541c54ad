// entropy.rs - Per-column Shannon entropy

use crate::core::alphabet::{CalcConfig, StateTable, NUM_STATES};
use crate::data::Alignment;
use crate::error::{CoevolError, Result};

/// Shannon entropy (natural log) of a weighted state distribution
pub(crate) fn entropy_of(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|&&c| c > 0.0)
        .map(|&c| {
            let p = c / total;
            -p * p.ln()
        })
        .sum()
}

/// Shannon entropy of every alignment column
pub fn calc_shannon_entropy(msa: &Alignment, config: &CalcConfig) -> Result<Vec<f64>> {
    if msa.num_sequences() == 0 {
        return Err(CoevolError::computation("Cannot compute entropy of an empty alignment"));
    }

    let table = StateTable::new(config);
    let entropy = (0..msa.num_columns())
        .map(|col| {
            let mut counts = [0.0f64; NUM_STATES];
            let mut total = 0.0;
            for seq in &msa.sequences {
                let residue = seq[col];
                if config.omit_gaps && table.is_gap(residue) {
                    continue;
                }
                for &(state, weight) in table.states(residue) {
                    counts[state] += weight;
                }
                total += 1.0;
            }
            entropy_of(&counts, total)
        })
        .collect();

    Ok(entropy)
}
