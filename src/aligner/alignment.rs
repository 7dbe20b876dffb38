use std::fmt::{Display, Formatter};
use std::ops::Range;

use itertools::Itertools;

use crate::aligner::matrix::{AlignOp, Trace};

/// Number of alignment columns per block when rendering an alignment as text
const LINE_WIDTH: usize = 50;

/// A gapped view on a source sequence.
///
/// Only the clipped range `[clip.start, clip.end)` of the source takes part in the
/// alignment; each column either holds the next symbol of that range or a gap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GappedSeq<'a> {
    source: &'a [u8],
    clip: Range<usize>,

    /// `true` if the column holds a source symbol, `false` for a gap
    columns: Vec<bool>,
}

impl<'a> GappedSeq<'a> {
    pub fn new(source: &'a [u8], clip: Range<usize>, columns: Vec<bool>) -> Self {
        debug_assert!(clip.end <= source.len());
        debug_assert_eq!(columns.iter().filter(|&&c| c).count(), clip.len());

        Self { source, clip, columns }
    }

    /// Number of columns in the view
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn clipped_begin(&self) -> usize {
        self.clip.start
    }

    pub fn clipped_end(&self) -> usize {
        self.clip.end
    }

    pub fn clipped_range(&self) -> Range<usize> {
        self.clip.clone()
    }

    #[inline]
    pub fn is_gap(&self, column: usize) -> bool {
        !self.columns[column]
    }

    /// Symbol at the given column, `None` for a gap.
    pub fn get(&self, column: usize) -> Option<u8> {
        if self.columns[column] {
            Some(self.source[self.to_source_position(column)])
        } else {
            None
        }
    }

    /// Translate a column index into a position in the source sequence.
    ///
    /// `column` may equal `len()`, which maps to the end of the clipped range. A gap
    /// column maps to the position after the last consumed symbol.
    pub fn to_source_position(&self, column: usize) -> usize {
        self.clip.start + self.columns[..column].iter().filter(|&&c| c).count()
    }

    /// Iterate over the columns, yielding `None` for gaps.
    pub fn iter(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        let mut symbols = self.source[self.clip.clone()].iter();

        self.columns.iter().map(move |&c| {
            if c {
                symbols.next().copied()
            } else {
                None
            }
        })
    }

    /// The aligned part of the source, i.e., the view with gaps removed.
    pub fn ungapped(&self) -> &'a [u8] {
        &self.source[self.clip.clone()]
    }

    /// Source symbols before the clipped range
    pub fn clipped_prefix(&self) -> &'a [u8] {
        &self.source[..self.clip.start]
    }

    /// Source symbols after the clipped range
    pub fn clipped_suffix(&self) -> &'a [u8] {
        &self.source[self.clip.end..]
    }

    pub fn gap_count(&self) -> usize {
        self.columns.iter().filter(|&&c| !c).count()
    }
}

impl Display for GappedSeq<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: String = self.iter()
            .map(|c| c.map_or('-', char::from))
            .collect();

        f.write_str(&s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

/// A pairwise alignment of a reference and a read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment<'a> {
    reference: GappedSeq<'a>,
    read: GappedSeq<'a>,
    score: i32,
}

impl<'a> Alignment<'a> {
    /// Build the two gapped rows described by a traceback.
    pub fn from_trace(reference: &'a [u8], read: &'a [u8], trace: &Trace) -> Self {
        let (ref_cols, read_cols): (Vec<bool>, Vec<bool>) = trace.ops.iter()
            .map(|op| match op {
                AlignOp::Match => (true, true),
                AlignOp::Deletion => (true, false),
                AlignOp::Insertion => (false, true),
            })
            .unzip();

        Self {
            reference: GappedSeq::new(reference, trace.ref_range.clone(), ref_cols),
            read: GappedSeq::new(read, trace.read_range.clone(), read_cols),
            score: trace.score,
        }
    }

    pub fn reference(&self) -> &GappedSeq<'a> {
        &self.reference
    }

    pub fn read(&self) -> &GappedSeq<'a> {
        &self.read
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Number of alignment columns
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (Option<u8>, Option<u8>)> + '_ {
        self.reference.iter().zip(self.read.iter())
    }

    pub fn stats(&self) -> AlignmentStats {
        self.columns()
            .fold(AlignmentStats::default(), |mut stats, column| {
                match column {
                    (Some(r), Some(q)) if r == q => stats.matches += 1,
                    (Some(_), Some(_)) => stats.mismatches += 1,
                    _ => stats.gaps += 1,
                }

                stats
            })
    }
}

impl Display for Alignment<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty alignment)");
        }

        let columns = self.columns().collect_vec();
        for (block_ix, block) in columns.chunks(LINE_WIDTH).enumerate() {
            let first_col = block_ix * LINE_WIDTH;
            let last_col = first_col + block.len();

            let ref_chars: String = block.iter()
                .map(|(r, _)| r.map_or('-', char::from))
                .collect();
            let aln_chars: String = block.iter()
                .map(|column| match column {
                    (Some(r), Some(q)) if r == q => '|',
                    (Some(_), Some(_)) => '*',
                    _ => ' ',
                })
                .collect();
            let read_chars: String = block.iter()
                .map(|(_, q)| q.map_or('-', char::from))
                .collect();

            writeln!(f, "{:>4} {:>8} {} {}", "ref",
                self.reference.to_source_position(first_col), ref_chars,
                self.reference.to_source_position(last_col))?;
            writeln!(f, "{:>4} {:>8} {}", "", "", aln_chars)?;
            writeln!(f, "{:>4} {:>8} {} {}", "read",
                self.read.to_source_position(first_col), read_chars,
                self.read.to_source_position(last_col))?;
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::{Alignment, AlignmentStats, GappedSeq};
    use crate::aligner::matrix::{AlignOp, Trace};

    fn example_trace() -> Trace {
        // ref:  CC-GTA
        // read: CCAGCA
        Trace {
            ref_range: 2..7,
            read_range: 0..6,
            ops: vec![
                AlignOp::Match, AlignOp::Match, AlignOp::Insertion,
                AlignOp::Match, AlignOp::Match, AlignOp::Match,
            ],
            score: 2,
        }
    }

    #[test]
    fn test_gapped_seq_positions() {
        let source = b"AACCGTAT";
        let view = GappedSeq::new(source, 2..7, vec![true, true, false, true, true, true]);

        assert_eq!(view.len(), 6);
        assert_eq!(view.to_string(), "CC-GTA");
        assert_eq!(view.to_source_position(0), 2);
        assert_eq!(view.to_source_position(2), 4);
        assert_eq!(view.to_source_position(3), 4);
        assert_eq!(view.to_source_position(6), 7);
        assert_eq!(view.get(2), None);
        assert_eq!(view.get(3), Some(b'G'));
        assert!(view.is_gap(2));
        assert_eq!(view.gap_count(), 1);

        assert_eq!(view.clipped_prefix(), b"AA");
        assert_eq!(view.ungapped(), b"CCGTA");
        assert_eq!(view.clipped_suffix(), b"T");
    }

    #[test]
    fn test_source_position_is_monotonic() {
        let source = b"ACGTACGT";
        let view = GappedSeq::new(source, 1..6, vec![false, true, true, false, false, true, true, true, false]);

        assert!((0..=view.len())
            .map(|col| view.to_source_position(col))
            .tuple_windows()
            .all(|(a, b)| a <= b));
    }

    #[test]
    fn test_alignment_from_trace() {
        let reference = b"AACCGTAT";
        let read = b"CCAGCA";

        let aln = Alignment::from_trace(reference, read, &example_trace());

        assert_eq!(aln.len(), 6);
        assert_eq!(aln.score(), 2);
        assert_eq!(aln.reference().to_string(), "CC-GTA");
        assert_eq!(aln.read().to_string(), "CCAGCA");
        assert_eq!(aln.stats(), AlignmentStats { matches: 4, mismatches: 1, gaps: 1 });

        let rendered = aln.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], " ref        2 CC-GTA 7");
        assert_eq!(lines[1], "              || |*|");
        assert_eq!(lines[2], "read        0 CCAGCA 6");
    }

    #[test]
    fn test_empty_alignment() {
        let trace = Trace { ref_range: 3..3, read_range: 0..0, ops: vec![], score: 0 };
        let aln = Alignment::from_trace(b"ACGT", b"", &trace);

        assert!(aln.is_empty());
        assert_eq!(aln.reference().to_source_position(0), 3);
        assert_eq!(aln.reference().clipped_prefix(), b"ACG");
        assert_eq!(aln.to_string(), "(empty alignment)\n");
    }
}
