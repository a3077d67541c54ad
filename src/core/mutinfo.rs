// mutinfo.rs - Mutual information matrix between alignment columns

use crate::core::alphabet::{CalcConfig, StateTable, NUM_STATES};
use crate::core::entropy::entropy_of;
use crate::core::matrix::Matrix;
use crate::data::Alignment;
use crate::error::{CoevolError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Mutual information and joint entropy of one column pair
fn pair_scores(col_i: &[u8], col_j: &[u8], table: &StateTable, omit_gaps: bool) -> (f64, f64) {
    let mut joint = [0.0f64; NUM_STATES * NUM_STATES];
    let mut total = 0.0;

    for (&a, &b) in col_i.iter().zip(col_j) {
        if omit_gaps && (table.is_gap(a) || table.is_gap(b)) {
            continue;
        }
        for &(sa, wa) in table.states(a) {
            for &(sb, wb) in table.states(b) {
                joint[sa * NUM_STATES + sb] += wa * wb;
            }
        }
        total += 1.0;
    }

    if total <= 0.0 {
        return (0.0, 0.0);
    }

    let mut p_i = [0.0f64; NUM_STATES];
    let mut p_j = [0.0f64; NUM_STATES];
    for sa in 0..NUM_STATES {
        for sb in 0..NUM_STATES {
            let p = joint[sa * NUM_STATES + sb] / total;
            p_i[sa] += p;
            p_j[sb] += p;
        }
    }

    let mut mi = 0.0;
    for sa in 0..NUM_STATES {
        for sb in 0..NUM_STATES {
            let p = joint[sa * NUM_STATES + sb] / total;
            if p > 0.0 {
                mi += p * (p / (p_i[sa] * p_j[sb])).ln();
            }
        }
    }

    (mi.max(0.0), entropy_of(&joint, total))
}

/// Build the symmetric mutual information matrix of an alignment.
///
/// With `joint_norm` every entry is divided by the joint entropy of its column pair.
/// The diagonal is zero.
pub fn build_mutinfo_matrix(msa: &Alignment, config: &CalcConfig, joint_norm: bool) -> Result<Matrix> {
    if msa.num_sequences() == 0 {
        return Err(CoevolError::computation(
            "Cannot compute mutual information of an empty alignment",
        ));
    }

    let n_columns = msa.num_columns();
    let table = StateTable::new(config);
    let columns: Vec<Vec<u8>> = (0..n_columns).map(|i| msa.column(i)).collect();

    let start = Instant::now();
    let total_pairs = n_columns * n_columns.saturating_sub(1) / 2;
    let pb = ProgressBar::new(total_pairs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let update_interval = std::cmp::max(1, total_pairs / 100);
    let progress_counter = AtomicUsize::new(0);

    let upper_triangle: Vec<(usize, usize, f64)> = (0..n_columns)
        .into_par_iter()
        .flat_map_iter(|i| {
            let columns = &columns;
            let table = &table;
            let pb = &pb;
            let progress_counter = &progress_counter;
            (i + 1..n_columns).map(move |j| {
                let (mi, joint_entropy) =
                    pair_scores(&columns[i], &columns[j], table, config.omit_gaps);
                let value = if !joint_norm {
                    mi
                } else if joint_entropy > 0.0 {
                    mi / joint_entropy
                } else {
                    0.0
                };

                let count = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                if count % update_interval == 0 {
                    pb.set_position(count as u64);
                }
                (i, j, value)
            })
        })
        .collect();

    pb.finish_and_clear();

    let mut matrix = Matrix::zeros(n_columns);
    for (i, j, value) in upper_triangle {
        matrix.set_symmetric(i, j, value);
    }

    tracing::debug!(
        columns = n_columns,
        joint_norm,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "mutual information matrix built"
    );
    Ok(matrix)
}
