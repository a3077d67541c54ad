// normalization.rs - Entropy-based normalizations of mutual information

use crate::core::matrix::Matrix;
use crate::error::{CoevolError, Result};
use std::fmt;
use std::str::FromStr;

/// Normalization schemes accepted by `--normalization`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// Sum of the two column entropies
    SumEnt,
    /// Smaller column entropy
    MinEnt,
    /// Larger column entropy
    MaxEnt,
    /// Smaller conditional entropy
    MinCon,
    /// Larger conditional entropy
    MaxCon,
    /// Joint entropy of the column pair, computed from the alignment
    Joint,
}

impl Normalization {
    pub const ALL: [Normalization; 6] = [
        Normalization::SumEnt,
        Normalization::MinEnt,
        Normalization::MaxEnt,
        Normalization::MinCon,
        Normalization::MaxCon,
        Normalization::Joint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Normalization::SumEnt => "sument",
            Normalization::MinEnt => "minent",
            Normalization::MaxEnt => "maxent",
            Normalization::MinCon => "mincon",
            Normalization::MaxCon => "maxcon",
            Normalization::Joint => "joint",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|n| n.name()).collect()
    }

    /// Denominator for one column pair
    fn denominator(&self, h_i: f64, h_j: f64, mi: f64) -> f64 {
        match self {
            Normalization::SumEnt => h_i + h_j,
            Normalization::MinEnt => h_i.min(h_j),
            Normalization::MaxEnt => h_i.max(h_j),
            Normalization::MinCon => h_i.min(h_j) - mi,
            Normalization::MaxCon => h_i.max(h_j) - mi,
            Normalization::Joint => h_i + h_j - mi,
        }
    }
}

impl FromStr for Normalization {
    type Err = CoevolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.name() == s)
            .ok_or_else(|| {
                CoevolError::input(format!(
                    "Invalid normalization '{}'. Available: {}",
                    s,
                    Self::names().join(", ")
                ))
            })
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Divide each mutual information entry by an entropy-derived denominator.
///
/// Entries whose denominator is not positive become zero, as does the diagonal.
/// `Joint` is accepted here as the pairwise `H_i + H_j - MI_ij`, which equals the
/// joint entropy of the pair; the pipeline computes it from the alignment instead.
pub fn apply_mutinfo_norm(mutinfo: &Matrix, entropy: &[f64], norm: Normalization) -> Result<Matrix> {
    let n = mutinfo.size();
    if entropy.len() != n {
        return Err(CoevolError::computation(format!(
            "Entropy has {} values but the matrix has {} columns",
            entropy.len(),
            n
        )));
    }

    let mut normalized = Matrix::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let mi = mutinfo.get(i, j);
            let denom = norm.denominator(entropy[i], entropy[j], mi);
            let value = if denom > 0.0 { mi / denom } else { 0.0 };
            normalized.set_symmetric(i, j, value);
        }
    }
    Ok(normalized)
}
