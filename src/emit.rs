//! Result lines.
//!
//! Every answer is one line: each id followed by a single space, then a
//! newline. An empty answer is a bare newline.

use std::io::Write;

/// Writes one answer line
///
/// # Errors
/// Propagates any error from the underlying writer.
pub fn write_answer<W: Write>(out: &mut W, ids: &[i64]) -> std::io::Result<()> {
    for id in ids {
        write!(out, "{id} ")?;
    }
    writeln!(out)
}

/// Writes one line per answer, in order
///
/// # Errors
/// Propagates any error from the underlying writer.
pub fn write_answers<W, A>(out: &mut W, answers: &[A]) -> std::io::Result<()>
where
    W: Write,
    A: AsRef<[i64]>,
{
    for answer in answers {
        write_answer(out, answer.as_ref())?;
    }
    Ok(())
}
