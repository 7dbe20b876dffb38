use std::ops::Range;

use tracing::trace;

use crate::aligner::scoring::ScoringModel;
use crate::aligner::EndGaps;

/// A single alignment column as seen from the traceback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignOp {
    /// Reference and read symbol aligned to each other (match or mismatch)
    Match,

    /// Reference symbol aligned to a gap in the read
    Deletion,

    /// Read symbol aligned to a gap in the reference
    Insertion,
}

/// Result of tracing back through a score matrix, independent of the sequences themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    /// Consumed reference range
    pub ref_range: Range<usize>,

    /// Consumed read range
    pub read_range: Range<usize>,

    pub ops: Vec<AlignOp>,
    pub score: i32,
}

impl Trace {
    /// Translate a trace computed on reversed sequences back to forward coordinates.
    pub fn mirrored(mut self, ref_len: usize, read_len: usize) -> Self {
        self.ref_range = ref_len - self.ref_range.end..ref_len - self.ref_range.start;
        self.read_range = read_len - self.read_range.end..read_len - self.read_range.start;
        self.ops.reverse();

        self
    }
}

/// Dynamic programming matrix with linear gap costs.
///
/// Rows correspond to reference positions, columns to read positions. Cell `(i, j)`
/// holds the best score of aligning `reference[..i]` with `read[..j]`.
///
/// Cells are `i32`. With costs taken from the command line (at most 255 each), scores
/// stay in range as long as `reference.len() + read.len()` is below 8,421,504.
pub struct ScoreMatrix<'a, C> {
    reference: &'a [u8],
    read: &'a [u8],
    costs: C,
    end_gaps: EndGaps,
    cells: Vec<i32>,
}

impl<'a, C> ScoreMatrix<'a, C>
where
    C: ScoringModel,
{
    pub fn fill(reference: &'a [u8], read: &'a [u8], costs: C, end_gaps: EndGaps) -> Self {
        let rows = reference.len() + 1;
        let cols = read.len() + 1;

        trace!(rows, cols, ?end_gaps, "filling score matrix");

        let mut cells = vec![0i32; rows * cols];
        let gap = costs.gap();

        if !end_gaps.read_begin {
            for j in 1..cols {
                cells[j] = cells[j - 1] + gap;
            }
        }

        for i in 1..rows {
            let (prev, curr) = cells[(i - 1) * cols..(i + 1) * cols].split_at_mut(cols);

            curr[0] = if end_gaps.ref_begin { 0 } else { prev[0] + gap };

            let ref_symbol = reference[i - 1];
            for j in 1..cols {
                let diag = prev[j - 1] + costs.substitution(ref_symbol, read[j - 1]);
                let up = prev[j] + gap;
                let left = curr[j - 1] + gap;

                curr[j] = diag.max(up).max(left);
            }
        }

        Self { reference, read, costs, end_gaps, cells }
    }

    #[inline]
    pub fn ref_len(&self) -> usize {
        self.reference.len()
    }

    #[inline]
    pub fn read_len(&self) -> usize {
        self.read.len()
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * (self.read_len() + 1) + j]
    }

    /// The highest scoring cell in row `i`, the first one on ties.
    pub fn row_max(&self, i: usize) -> (usize, i32) {
        (0..=self.read_len())
            .map(|j| (j, self.get(i, j)))
            .reduce(|best, cell| if cell.1 > best.1 { cell } else { best })
            .unwrap_or((0, 0))
    }

    /// The highest scoring cell in row `i`, the last one on ties.
    pub fn row_max_last(&self, i: usize) -> (usize, i32) {
        (0..=self.read_len())
            .map(|j| (j, self.get(i, j)))
            .reduce(|best, cell| if cell.1 >= best.1 { cell } else { best })
            .unwrap_or((0, 0))
    }

    /// The highest scoring cell in column `j`, the first one on ties.
    pub fn col_max(&self, j: usize) -> (usize, i32) {
        (0..=self.ref_len())
            .map(|i| (i, self.get(i, j)))
            .reduce(|best, cell| if cell.1 > best.1 { cell } else { best })
            .unwrap_or((0, 0))
    }

    /// Cell where an optimal alignment under this matrix' end gap policy ends.
    pub fn best_end_cell(&self) -> (usize, usize) {
        let n = self.ref_len();
        let m = self.read_len();

        match (self.end_gaps.ref_end, self.end_gaps.read_end) {
            (false, false) => (n, m),
            (false, true) => (n, self.row_max(n).0),
            (true, false) => (self.col_max(m).0, m),
            (true, true) => {
                let (j, row_best) = self.row_max(n);
                let (i, col_best) = self.col_max(m);

                if col_best > row_best {
                    (i, m)
                } else {
                    (n, j)
                }
            }
        }
    }

    /// Trace back from cell `(i, j)`.
    ///
    /// Diagonal moves are preferred over deletions, and deletions over insertions. The
    /// traceback stops early when it hits a border with free leading gaps.
    pub fn traceback(&self, i: usize, j: usize) -> Trace {
        let (end_i, end_j) = (i, j);
        let (mut i, mut j) = (i, j);
        let gap = self.costs.gap();

        let mut ops = Vec::with_capacity(i + j);
        while i > 0 || j > 0 {
            if (i == 0 && self.end_gaps.read_begin) || (j == 0 && self.end_gaps.ref_begin) {
                break;
            }

            let score = self.get(i, j);
            if i > 0 && j > 0
                && score == self.get(i - 1, j - 1) + self.costs.substitution(self.reference[i - 1], self.read[j - 1])
            {
                ops.push(AlignOp::Match);
                i -= 1;
                j -= 1;
            } else if i > 0 && score == self.get(i - 1, j) + gap {
                ops.push(AlignOp::Deletion);
                i -= 1;
            } else if j > 0 {
                ops.push(AlignOp::Insertion);
                j -= 1;
            } else {
                unreachable!("Inconsistent score matrix at cell ({i}, {j})!");
            }
        }

        ops.reverse();

        Trace {
            ref_range: i..end_i,
            read_range: j..end_j,
            ops,
            score: self.get(end_i, end_j),
        }
    }
}
