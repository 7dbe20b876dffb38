pub mod errors;
pub mod seq;
pub mod aligner;
pub mod split;
pub mod io;
