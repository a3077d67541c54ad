// correction.rs - Background corrections of mutual information

use crate::core::matrix::Matrix;
use crate::error::{CoevolError, Result};
use std::fmt;
use std::str::FromStr;

/// Corrections accepted by `--correction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Correction {
    /// Average product correction
    Apc,
    /// Average sum correction
    Asc,
}

impl Correction {
    pub const ALL: [Correction; 2] = [Correction::Apc, Correction::Asc];

    pub fn name(&self) -> &'static str {
        match self {
            Correction::Apc => "apc",
            Correction::Asc => "asc",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.name()).collect()
    }
}

impl FromStr for Correction {
    type Err = CoevolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| {
                CoevolError::input(format!(
                    "Invalid correction '{}'. Available: {}",
                    s,
                    Self::names().join(", ")
                ))
            })
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Remove the background term estimated from per-column average mutual information.
///
/// `a_i` is the mean of row `i` over the off-diagonal entries and `ā` the mean of all
/// `a_i`. Matrices smaller than 2x2, or with `ā == 0`, are returned unchanged.
pub fn apply_mutinfo_corr(mutinfo: &Matrix, corr: Correction) -> Result<Matrix> {
    let n = mutinfo.size();
    if n < 2 {
        return Ok(mutinfo.clone());
    }

    let row_means: Vec<f64> = mutinfo
        .rows()
        .enumerate()
        .map(|(i, row)| (row.iter().sum::<f64>() - row[i]) / (n - 1) as f64)
        .collect();
    let overall = row_means.iter().sum::<f64>() / n as f64;
    if !overall.is_finite() {
        return Err(CoevolError::computation(
            "Mutual information matrix contains non-finite values",
        ));
    }
    if overall == 0.0 {
        return Ok(mutinfo.clone());
    }

    let mut corrected = Matrix::zeros(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let background = match corr {
                Correction::Apc => row_means[i] * row_means[j] / overall,
                Correction::Asc => row_means[i] + row_means[j] - overall,
            };
            corrected.set_symmetric(i, j, mutinfo.get(i, j) - background);
        }
    }
    Ok(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![
            vec![0.0, 0.6, 0.3],
            vec![0.6, 0.0, 0.3],
            vec![0.3, 0.3, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("apc".parse::<Correction>().unwrap(), Correction::Apc);
        assert_eq!("asc".parse::<Correction>().unwrap(), Correction::Asc);
        assert!("minent".parse::<Correction>().is_err());
    }

    #[test]
    fn test_apc() {
        // Row means 0.45, 0.45, 0.3; overall 0.4
        let apc = apply_mutinfo_corr(&sample(), Correction::Apc).unwrap();
        assert!((apc.get(0, 1) - (0.6 - 0.45 * 0.45 / 0.4)).abs() < 1e-12);
        assert!((apc.get(2, 0) - (0.3 - 0.45 * 0.3 / 0.4)).abs() < 1e-12);
        assert_eq!(apc.get(1, 1), 0.0);
    }

    #[test]
    fn test_asc() {
        let asc = apply_mutinfo_corr(&sample(), Correction::Asc).unwrap();
        assert!((asc.get(0, 1) - (0.6 - (0.45 + 0.45 - 0.4))).abs() < 1e-12);
        assert!((asc.get(1, 2) - (0.3 - (0.45 + 0.3 - 0.4))).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_inputs_unchanged() {
        let zeros = Matrix::zeros(3);
        assert_eq!(apply_mutinfo_corr(&zeros, Correction::Apc).unwrap(), zeros);
        let single = Matrix::zeros(1);
        assert_eq!(apply_mutinfo_corr(&single, Correction::Asc).unwrap(), single);
    }
}
