// alphabet.rs - Residue states and calculation options

use serde::{Deserialize, Serialize};

/// The 20 standard amino acids, in state order
pub const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// 20 amino acids, B, Z, J, X, gap
pub const NUM_STATES: usize = 25;
pub const GAP_STATE: usize = 24;

const STATE_B: usize = 20;
const STATE_Z: usize = 21;
const STATE_J: usize = 22;
const STATE_X: usize = 23;

/// Options shared by the entropy and mutual information kernels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Split B, Z, J and X over the residues they stand for
    pub ambiguity: bool,
    /// Leave gap residues out of the frequency counts
    pub omit_gaps: bool,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            ambiguity: true,
            omit_gaps: true,
        }
    }
}

impl CalcConfig {
    pub fn description(&self) -> String {
        format!(
            "ambiguity {}, gaps {}",
            if self.ambiguity { "on" } else { "off" },
            if self.omit_gaps { "omitted" } else { "counted" }
        )
    }
}

fn amino_acid_state(residue: u8) -> usize {
    AMINO_ACIDS
        .iter()
        .position(|&aa| aa == residue)
        .unwrap_or(STATE_X)
}

/// Weighted states for every byte value under a given configuration
pub struct StateTable {
    entries: Vec<Vec<(usize, f64)>>,
}

impl StateTable {
    pub fn new(config: &CalcConfig) -> Self {
        let entries = (0..=255u8)
            .map(|byte| Self::states_for(byte.to_ascii_uppercase(), config.ambiguity))
            .collect();
        Self { entries }
    }

    fn states_for(residue: u8, ambiguity: bool) -> Vec<(usize, f64)> {
        let split = |a: u8, b: u8| vec![(amino_acid_state(a), 0.5), (amino_acid_state(b), 0.5)];
        if !residue.is_ascii_alphabetic() {
            return vec![(GAP_STATE, 1.0)];
        }
        match (residue, ambiguity) {
            (b'B', true) => split(b'D', b'N'),
            (b'Z', true) => split(b'E', b'Q'),
            (b'J', true) => split(b'I', b'L'),
            (b'B', false) => vec![(STATE_B, 1.0)],
            (b'Z', false) => vec![(STATE_Z, 1.0)],
            (b'J', false) => vec![(STATE_J, 1.0)],
            _ => match amino_acid_state(residue) {
                STATE_X if ambiguity => (0..AMINO_ACIDS.len()).map(|s| (s, 0.05)).collect(),
                state => vec![(state, 1.0)],
            },
        }
    }

    pub fn states(&self, residue: u8) -> &[(usize, f64)] {
        &self.entries[residue as usize]
    }

    pub fn is_gap(&self, residue: u8) -> bool {
        matches!(self.states(residue), [(GAP_STATE, _)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_weight(states: &[(usize, f64)]) -> f64 {
        states.iter().map(|(_, w)| w).sum()
    }

    #[test]
    fn test_standard_residues() {
        let table = StateTable::new(&CalcConfig::default());
        assert_eq!(table.states(b'A'), &[(0, 1.0)]);
        assert_eq!(table.states(b'y'), &[(19, 1.0)]);
        assert!(table.is_gap(b'-'));
        assert!(table.is_gap(b'.'));
        assert!(!table.is_gap(b'W'));
    }

    #[test]
    fn test_ambiguous_residues_split() {
        let table = StateTable::new(&CalcConfig::default());
        let b = table.states(b'B');
        assert_eq!(b.len(), 2);
        assert!((total_weight(b) - 1.0).abs() < 1e-12);
        let x = table.states(b'X');
        assert_eq!(x.len(), 20);
        assert!((total_weight(x) - 1.0).abs() < 1e-12);
        // Unknown letters behave like X
        assert_eq!(table.states(b'U').len(), 20);
    }

    #[test]
    fn test_ambiguity_disabled() {
        let config = CalcConfig {
            ambiguity: false,
            omit_gaps: true,
        };
        let table = StateTable::new(&config);
        assert_eq!(table.states(b'B'), &[(STATE_B, 1.0)]);
        assert_eq!(table.states(b'X'), &[(STATE_X, 1.0)]);
        assert_eq!(table.states(b'O'), &[(STATE_X, 1.0)]);
    }
}
