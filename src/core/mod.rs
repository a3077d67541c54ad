// mod.rs - Core numerical kernels

pub mod alphabet;
pub mod correction;
pub mod entropy;
pub mod matrix;
pub mod mutinfo;
pub mod normalization;

// Re-export main types for convenience
pub use alphabet::CalcConfig;
pub use correction::{apply_mutinfo_corr, Correction};
pub use entropy::calc_shannon_entropy;
pub use matrix::Matrix;
pub use mutinfo::build_mutinfo_matrix;
pub use normalization::{apply_mutinfo_norm, Normalization};
