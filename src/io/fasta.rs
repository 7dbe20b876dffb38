use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::{info, warn};

use crate::errors::SplitAlnError;
use crate::seq::Sequence;

/// Read the first record from a FASTA stream.
///
/// Returns `None` if the stream does not contain any record. Additional records are
/// skipped with a warning.
pub fn read_first_record<R>(reader: R) -> Result<Option<Sequence>, SplitAlnError>
where
    R: BufRead,
{
    let mut reader = fasta::io::Reader::new(reader);
    let mut records = reader.records();

    let Some(result) = records.next() else {
        return Ok(None);
    };

    let record = result?;
    let name = std::str::from_utf8(record.name())?;
    let sequence = Sequence::new(name, record.sequence().as_ref());

    let num_skipped = records.count();
    if num_skipped > 0 {
        warn!("Ignoring {num_skipped} additional record(s) after {name}.");
    }

    Ok(Some(sequence))
}

/// Load a single sequence from a (possibly gzipped) FASTA file.
pub fn load_sequence(path: &Path) -> Result<Sequence, SplitAlnError> {
    let is_gzipped = path
        .file_name()
        .map(|v| v.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false);

    let reader_inner: Box<dyn BufRead> = if is_gzipped {
        Box::new(
            File::open(path)
                .map(MultiGzDecoder::new)
                .map(BufReader::new)?,
        )
    } else {
        Box::new(File::open(path).map(BufReader::new)?)
    };

    let sequence = read_first_record(reader_inner)?
        .ok_or_else(|| SplitAlnError::EmptyFasta(path.to_owned()))?;

    info!("Loaded {} ({} bp) from {}", sequence.name(), sequence.len(), path.display());

    Ok(sequence)
}
