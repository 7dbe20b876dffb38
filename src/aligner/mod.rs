pub mod alignment;
pub mod matrix;
pub mod scoring;

use tracing::debug;

pub use alignment::{Alignment, AlignmentStats, GappedSeq};
use matrix::ScoreMatrix;
use scoring::ScoringModel;

/// Which sequence ends may be left unaligned without penalty.
///
/// Leading or trailing gaps at an end marked `true` are free; the unaligned part of the
/// sequence is clipped from the resulting alignment instead of being gapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EndGaps {
    pub ref_begin: bool,
    pub ref_end: bool,
    pub read_begin: bool,
    pub read_end: bool,
}

impl EndGaps {
    /// End-to-end alignment of both sequences
    pub fn global() -> Self {
        Self::default()
    }

    /// Globally align the read, but allow free gaps at the beginning and end of the reference
    pub fn semi_global() -> Self {
        Self { ref_begin: true, ref_end: true, ..Self::default() }
    }

    /// Indels at the beginning or end of either sequence are free
    pub fn ends_free() -> Self {
        Self { ref_begin: true, ref_end: true, read_begin: true, read_end: true }
    }

    /// An unaligned suffix of the read is free. Used for the left half of a split alignment.
    pub fn free_read_end() -> Self {
        Self { read_end: true, ..Self::default() }
    }

    /// An unaligned prefix of the read is free. Used for the right half of a split alignment.
    pub fn free_read_begin() -> Self {
        Self { read_begin: true, ..Self::default() }
    }

    /// The policy to use when aligning both sequences reversed.
    pub fn mirrored(&self) -> Self {
        Self {
            ref_begin: self.ref_end,
            ref_end: self.ref_begin,
            read_begin: self.read_end,
            read_end: self.read_begin,
        }
    }
}

/// Pairwise DP aligner of a read against a reference.
pub struct PairwiseAligner<C> {
    costs: C,
}

impl<C> PairwiseAligner<C>
where
    C: ScoringModel,
{
    pub fn new(costs: C) -> Self {
        Self { costs }
    }

    /// Compute the full score matrix without tracing back.
    pub fn fill<'a>(&self, reference: &'a [u8], read: &'a [u8], end_gaps: EndGaps) -> ScoreMatrix<'a, C> {
        ScoreMatrix::fill(reference, read, self.costs, end_gaps)
    }

    /// Compute an optimal alignment under the given end gap policy.
    pub fn align<'a, Seq>(&self, reference: &'a Seq, read: &'a Seq, end_gaps: EndGaps) -> Alignment<'a>
    where
        Seq: AsRef<[u8]> + ?Sized,
    {
        let reference = reference.as_ref();
        let read = read.as_ref();

        let matrix = self.fill(reference, read, end_gaps);
        let (i, j) = matrix.best_end_cell();
        let trace = matrix.traceback(i, j);

        debug!(end_i = i, end_j = j, score = trace.score, "pairwise alignment done");

        Alignment::from_trace(reference, read, &trace)
    }
}

#[cfg(test)]
mod tests {
    use super::scoring::{ScoringModel, SimpleScore};
    use super::{Alignment, EndGaps, PairwiseAligner};

    fn all_policies() -> Vec<EndGaps> {
        (0..16u8)
            .map(|bits| EndGaps {
                ref_begin: bits & 1 != 0,
                ref_end: bits & 2 != 0,
                read_begin: bits & 4 != 0,
                read_end: bits & 8 != 0,
            })
            .collect()
    }

    fn rescore<C: ScoringModel>(aln: &Alignment, costs: &C) -> i32 {
        aln.columns().map(|(r, q)| costs.score(r, q)).sum()
    }

    fn check_well_formed(aln: &Alignment, reference: &[u8], read: &[u8], end_gaps: EndGaps) {
        assert_eq!(aln.reference().len(), aln.read().len());

        for (view, source) in [(aln.reference(), reference), (aln.read(), read)] {
            let rebuilt = [view.clipped_prefix(), view.ungapped(), view.clipped_suffix()].concat();
            assert_eq!(rebuilt, source);
            assert_eq!(view.to_source_position(view.len()), view.clipped_end());
        }

        // Ends that are not free must be fully consumed
        if !end_gaps.ref_begin {
            assert_eq!(aln.reference().clipped_begin(), 0);
        }
        if !end_gaps.ref_end {
            assert_eq!(aln.reference().clipped_end(), reference.len());
        }
        if !end_gaps.read_begin {
            assert_eq!(aln.read().clipped_begin(), 0);
        }
        if !end_gaps.read_end {
            assert_eq!(aln.read().clipped_end(), read.len());
        }

        // No column with two gaps
        assert!(aln.columns().all(|(r, q)| r.is_some() || q.is_some()));
    }

    #[test]
    fn test_all_policies_well_formed() {
        let scoring = SimpleScore::new(1, -1, -1);
        let aligner = PairwiseAligner::new(scoring);

        let pairs: [(&[u8], &[u8]); 6] = [
            (b"AAAACCCCGGGGTTTT", b"GGGGTTTTAAAACCCC"),
            (b"ACGTACGTAC", b"CGTTAC"),
            (b"ACG", b"TTTTTTTTACGTTTT"),
            (b"NNNN", b"ACGT"),
            (b"ACGT", b""),
            (b"", b""),
        ];

        for end_gaps in all_policies() {
            for (reference, read) in pairs {
                let aln = aligner.align(reference, read, end_gaps);
                check_well_formed(&aln, reference, read, end_gaps);
                assert_eq!(rescore(&aln, &scoring), aln.score(), "{end_gaps:?}");
            }
        }
    }

    #[test]
    fn test_global_alignment() {
        let aligner = PairwiseAligner::new(SimpleScore::new(1, -1, -1));
        let aln = aligner.align(b"ACGTTACG".as_slice(), b"ACGTACG".as_slice(), EndGaps::global());

        assert_eq!(aln.score(), 6);
        assert_eq!(aln.reference().to_string(), "ACGTTACG");
        assert_eq!(aln.read().to_string(), "ACG-TACG");
    }

    #[test]
    fn test_free_read_end_clips_suffix() {
        let aligner = PairwiseAligner::new(SimpleScore::new(1, -1, -1));
        let aln = aligner.align(b"ACGT".as_slice(), b"ACGTGGGG".as_slice(), EndGaps::free_read_end());

        assert_eq!(aln.score(), 4);
        assert_eq!(aln.read().clipped_range(), 0..4);
        assert_eq!(aln.read().clipped_suffix(), b"GGGG");
        assert_eq!(aln.reference().gap_count(), 0);
    }

    #[test]
    fn test_free_read_begin_clips_prefix() {
        let aligner = PairwiseAligner::new(SimpleScore::new(1, -1, -1));
        let aln = aligner.align(b"ACGT".as_slice(), b"GGGGACGT".as_slice(), EndGaps::free_read_begin());

        assert_eq!(aln.score(), 4);
        assert_eq!(aln.read().clipped_range(), 4..8);
        assert_eq!(aln.read().to_source_position(0), 4);
    }

    #[test]
    fn test_mirrored_policy() {
        assert_eq!(EndGaps::free_read_begin().mirrored(), EndGaps::free_read_end());
        assert_eq!(EndGaps::ends_free().mirrored(), EndGaps::ends_free());
        assert_eq!(EndGaps::semi_global().mirrored(), EndGaps::semi_global());
    }

    #[test]
    fn test_mismatch_penalty_shifts_to_gaps() {
        // With a cheap mismatch, a single substitution is preferred. With an expensive
        // mismatch, the aligner opens two gaps instead.
        let reference = b"AAAACAAAA".as_slice();
        let read = b"AAAAGAAAA".as_slice();

        let mut prev_gaps = 0;
        for mismatch in 1..=6 {
            let aligner = PairwiseAligner::new(SimpleScore::new(1, -mismatch, -2));
            let aln = aligner.align(reference, read, EndGaps::global());
            let stats = aln.stats();

            assert!(stats.gaps >= prev_gaps);
            prev_gaps = stats.gaps;

            if mismatch < 4 {
                assert_eq!((stats.mismatches, stats.gaps), (1, 0));
            } else if mismatch > 4 {
                assert_eq!((stats.mismatches, stats.gaps), (0, 2));
            }
        }
    }
}
