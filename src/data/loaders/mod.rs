// mod.rs - Alignment file loaders

pub mod fasta;
pub mod selex;
