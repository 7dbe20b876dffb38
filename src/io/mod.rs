pub mod fasta;
pub mod report;

pub use fasta::load_sequence;
