use crate::errors::SplitAlnError;

/// Scores a single alignment column.
///
/// A column holds two symbols, or a symbol and a gap (`None`). Two gaps in one column
/// never occur in an alignment.
pub trait ScoringModel: Copy {
    fn match_score(&self) -> i32;
    fn mismatch(&self) -> i32;
    fn gap(&self) -> i32;

    #[inline(always)]
    fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score()
        } else {
            self.mismatch()
        }
    }

    #[inline]
    fn score(&self, a: Option<u8>, b: Option<u8>) -> i32 {
        match (a, b) {
            (Some(a), Some(b)) => self.substitution(a, b),
            (Some(_), None) | (None, Some(_)) => self.gap(),
            (None, None) => panic!("Can't score a column with two gaps!"),
        }
    }
}

/// Match/mismatch scoring with a linear gap penalty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleScore {
    match_score: i32,
    mismatch: i32,
    gap: i32,
}

impl SimpleScore {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self { match_score, mismatch, gap }
    }

    /// Build a scoring scheme from positive magnitudes, as given on the command line.
    pub fn from_costs(match_bonus: u8, mismatch_cost: u8, gap_cost: u8) -> Self {
        Self::new(match_bonus as i32, -(mismatch_cost as i32), -(gap_cost as i32))
    }

    /// Check that the match score is positive and both penalties are negative.
    pub fn validate(&self) -> Result<(), SplitAlnError> {
        if self.match_score > 0 && self.mismatch < 0 && self.gap < 0 {
            Ok(())
        } else {
            Err(SplitAlnError::InvalidScoring {
                match_score: self.match_score,
                mismatch: self.mismatch,
                gap: self.gap,
            })
        }
    }
}

impl Default for SimpleScore {
    fn default() -> Self {
        Self::new(1, -1, -1)
    }
}

impl ScoringModel for SimpleScore {
    #[inline(always)]
    fn match_score(&self) -> i32 {
        self.match_score
    }

    #[inline(always)]
    fn mismatch(&self) -> i32 {
        self.mismatch
    }

    #[inline(always)]
    fn gap(&self) -> i32 {
        self.gap
    }
}

#[cfg(test)]
mod tests {
    use super::{ScoringModel, SimpleScore};

    #[test]
    fn test_simple_score() {
        let scoring = SimpleScore::new(2, -3, -5);

        assert_eq!(scoring.score(Some(b'A'), Some(b'A')), 2);
        assert_eq!(scoring.score(Some(b'N'), Some(b'N')), 2);
        assert_eq!(scoring.score(Some(b'A'), Some(b'C')), -3);
        assert_eq!(scoring.score(Some(b'A'), None), -5);
        assert_eq!(scoring.score(None, Some(b'T')), -5);
    }

    #[test]
    #[should_panic]
    fn test_double_gap_column() {
        SimpleScore::default().score(None, None);
    }

    #[test]
    fn test_validate() {
        assert!(SimpleScore::default().validate().is_ok());
        assert!(SimpleScore::from_costs(1, 4, 2).validate().is_ok());
        assert!(SimpleScore::from_costs(0, 1, 1).validate().is_err());
        assert!(SimpleScore::new(1, 1, -1).validate().is_err());
        assert!(SimpleScore::new(1, -1, 0).validate().is_err());
    }
}
