use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

#[derive(Debug)]
pub enum SplitAlnError {
    /// The FASTA file did not contain a single record
    EmptyFasta(PathBuf),

    /// Scoring scheme with a non-positive match score or non-negative penalties
    InvalidScoring { match_score: i32, mismatch: i32, gap: i32 },

    /// A FASTA record name that is not valid UTF-8
    InvalidUtf8Name { source: Utf8Error },

    /// Other IO errors
    IOError(io::Error),
}

impl Error for SplitAlnError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::InvalidUtf8Name { ref source } => Some(source),
            Self::IOError(ref source) => Some(source),
            _ => None
        }
    }
}

impl From<io::Error> for SplitAlnError {
    fn from(value: io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<Utf8Error> for SplitAlnError {
    fn from(value: Utf8Error) -> Self {
        Self::InvalidUtf8Name { source: value }
    }
}

impl Display for SplitAlnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::EmptyFasta(ref path) =>
                write!(f, "No FASTA record found in {}!", path.display()),
            Self::InvalidScoring { match_score, mismatch, gap } =>
                write!(f, "Invalid scoring scheme (match: {match_score}, mismatch: {mismatch}, gap: {gap}). \
                    The match score must be positive and both penalties negative."),
            Self::InvalidUtf8Name { source: _ } =>
                write!(f, "FASTA record name is not valid UTF-8!"),
            Self::IOError(ref err) =>
                err.fmt(f),
        }
    }
}
