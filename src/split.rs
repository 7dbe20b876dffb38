//! Split alignment of a read against a reference.
//!
//! The reference is cut at a single position. Its prefix is aligned to a prefix of the
//! read (the "left" alignment), its suffix to a suffix of the read (the "right"
//! alignment). Both alignments are computed in one pass each, and the cut position is
//! chosen such that the sum of both scores is maximal. The read bases between the two
//! alignments, if any, are not explained by the reference (e.g., an insertion, or the
//! junction of a chimeric read).

use std::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use crate::aligner::scoring::ScoringModel;
use crate::aligner::{Alignment, EndGaps, PairwiseAligner};

/// Breakpoint positions of a split alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    /// Reference position where the left alignment ends and the right alignment starts
    pub ref_split_position: usize,

    /// Read position up to which the left alignment consumes the read
    pub read_split_left_position: usize,

    /// Read position from which the right alignment consumes the read
    pub read_split_right_position: usize,

    /// Combined score of both alignments
    pub score: i32,

    /// Reference position at the start of the right alignment
    #[serde(skip)]
    right_ref_position: usize,
}

impl SplitResult {
    /// Whether the reference positions at the end of the left alignment and the start of
    /// the right alignment agree.
    pub fn is_consistent(&self) -> bool {
        self.ref_split_position == self.right_ref_position
    }

    pub fn right_ref_position(&self) -> usize {
        self.right_ref_position
    }

    /// Read range between both alignments. Empty if the alignments overlap on the read.
    pub fn read_center(&self) -> Range<usize> {
        let begin = self.read_split_left_position;
        begin..self.read_split_right_position.max(begin)
    }

    /// True if the left and right alignments both consume some part of the read.
    pub fn read_overlap(&self) -> bool {
        self.read_split_right_position < self.read_split_left_position
    }
}

/// Both halves of a split alignment together with the breakpoint positions.
#[derive(Clone, Debug)]
pub struct SplitAlignment<'a> {
    pub left: Alignment<'a>,
    pub right: Alignment<'a>,
    pub result: SplitResult,
}

pub struct SplitAligner<C> {
    aligner: PairwiseAligner<C>,
}

impl<C> SplitAligner<C>
where
    C: ScoringModel + Send + Sync,
{
    pub fn new(costs: C) -> Self {
        Self { aligner: PairwiseAligner::new(costs) }
    }

    pub fn align<'a, Seq>(&self, reference: &'a Seq, read: &'a Seq) -> SplitAlignment<'a>
    where
        Seq: AsRef<[u8]> + ?Sized,
    {
        self.align_u8(reference.as_ref(), read.as_ref())
    }

    fn align_u8<'a>(&self, reference: &'a [u8], read: &'a [u8]) -> SplitAlignment<'a> {
        let n = reference.len();
        let m = read.len();

        // The right alignment is computed as a left alignment of both sequences reversed,
        // such that row `n - s` of its matrix corresponds to cutting the reference at `s`.
        let ref_rev: Vec<u8> = reference.iter().rev().copied().collect();
        let read_rev: Vec<u8> = read.iter().rev().copied().collect();

        let (left, right) = rayon::join(
            || self.aligner.fill(reference, read, EndGaps::free_read_end()),
            || self.aligner.fill(&ref_rev, &read_rev, EndGaps::free_read_begin().mirrored()),
        );

        let (split, score) = (0..=n)
            .map(|s| (s, left.row_max(s).1 + right.row_max(n - s).1))
            .reduce(|best, cand| if cand.1 > best.1 { cand } else { best })
            .unwrap_or((0, 0));

        // On ties the left alignment ends at the smallest read position, and the right
        // alignment starts at the smallest one, i.e., the last maximum of the reversed row.
        let (left_end, _) = left.row_max(split);
        let (right_end, _) = right.row_max_last(n - split);

        debug!(split, left_end, right_end = m - right_end, score, "found split position");

        let left_trace = left.traceback(split, left_end);
        let right_trace = right.traceback(n - split, right_end).mirrored(n, m);

        let left = Alignment::from_trace(reference, read, &left_trace);
        let right = Alignment::from_trace(reference, read, &right_trace);

        let result = SplitResult {
            ref_split_position: left.reference().to_source_position(left.len()),
            read_split_left_position: left.read().to_source_position(left.len()),
            read_split_right_position: right.read().to_source_position(0),
            score,
            right_ref_position: right.reference().to_source_position(0),
        };

        if !result.is_consistent() {
            warn!(
                left = result.ref_split_position,
                right = result.right_ref_position,
                "Reference split positions of the left and right alignment disagree!"
            );
        }

        SplitAlignment { left, right, result }
    }
}
