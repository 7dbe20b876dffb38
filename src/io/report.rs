use std::io::{self, Write};

use serde::Serialize;

use crate::seq::Sequence;
use crate::split::{SplitAlignment, SplitResult};

/// Write the three breakpoint positions, one per line.
pub fn write_positions<W>(writer: &mut W, result: &SplitResult) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "{}", result.ref_split_position)?;
    writeln!(writer, "{}", result.read_split_left_position)?;
    writeln!(writer, "{}", result.read_split_right_position)?;

    Ok(())
}

/// Human readable report with both alignments and the sequence parts around the breakpoint.
pub fn write_verbose<W>(
    writer: &mut W,
    reference: &Sequence,
    read: &Sequence,
    split: &SplitAlignment,
) -> io::Result<()>
where
    W: Write,
{
    let result = &split.result;

    writeln!(writer, "Resulting alignments")?;
    writeln!(writer)?;
    writeln!(writer, "Left (score: {})", split.left.score())?;
    write!(writer, "{}", split.left)?;
    writeln!(writer, "Right (score: {})", split.right.score())?;
    write!(writer, "{}", split.right)?;
    writeln!(writer)?;

    writeln!(writer, "ref_split_position        == {}", result.ref_split_position)?;
    writeln!(writer, "read_split_left_position  == {}", result.read_split_left_position)?;
    writeln!(writer, "read_split_right_position == {}", result.read_split_right_position)?;
    if !result.is_consistent() {
        writeln!(writer, "WARNING: right alignment starts at reference position {}", result.right_ref_position())?;
    }
    writeln!(writer)?;

    let center = read.infix(result.read_center());
    writeln!(writer, "Reference Left  {}", String::from_utf8_lossy(reference.prefix(result.ref_split_position)))?;
    writeln!(writer, "Reference Right {}", String::from_utf8_lossy(reference.suffix(result.ref_split_position)))?;
    writeln!(writer)?;
    writeln!(writer, "Read Left       {}", String::from_utf8_lossy(read.prefix(result.read_split_left_position)))?;
    if result.read_overlap() {
        writeln!(writer, "Read Center     (left and right alignment overlap by {} bp)",
            result.read_split_left_position - result.read_split_right_position)?;
    } else {
        writeln!(writer, "Read Center     {}", String::from_utf8_lossy(center))?;
    }
    writeln!(writer, "Read Right      {}", String::from_utf8_lossy(read.suffix(result.read_split_right_position)))?;

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    reference: &'a str,
    read: &'a str,

    #[serde(flatten)]
    result: &'a SplitResult,

    consistent: bool,
}

pub fn write_json<W>(writer: &mut W, reference: &Sequence, read: &Sequence, result: &SplitResult) -> io::Result<()>
where
    W: Write,
{
    let report = JsonReport {
        reference: reference.name(),
        read: read.name(),
        result,
        consistent: result.is_consistent(),
    };

    serde_json::to_writer(&mut *writer, &report)?;
    writeln!(writer)?;

    Ok(())
}
