use std::ops::Range;

/// The five-letter nucleotide alphabet. Anything that is not A, C, G or T is stored as `N`.
pub const DNA5: [u8; 5] = [b'A', b'C', b'G', b'T', b'N'];

/// Map an arbitrary ASCII byte onto the Dna5 alphabet.
#[inline]
pub fn to_dna5(b: u8) -> u8 {
    match b.to_ascii_uppercase() {
        c @ (b'A' | b'C' | b'G' | b'T') => c,
        _ => b'N',
    }
}

/// A named, immutable nucleotide sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    residues: Vec<u8>,
}

impl Sequence {
    /// Create a new sequence, normalizing the given bytes to upper case Dna5.
    pub fn new(name: impl Into<String>, residues: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.into(),
            residues: residues.as_ref().iter().copied().map(to_dna5).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn prefix(&self, end: usize) -> &[u8] {
        &self.residues[..end.min(self.len())]
    }

    pub fn suffix(&self, begin: usize) -> &[u8] {
        &self.residues[begin.min(self.len())..]
    }

    /// Infix `[begin, end)`. An inverted range yields an empty slice.
    pub fn infix(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(self.len());
        let begin = range.start.min(end);

        &self.residues[begin..end]
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.residues
    }
}
