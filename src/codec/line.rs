use crate::models::LineSplit;
use crate::utils::constants::SEPARATOR;

/// Split a record line on the first separator byte into station and
/// temperature fields, borrowing both from the input.
///
/// Returns `None` when the separator is absent; the caller's policy is to
/// drop the line silently rather than fail the run.
pub fn split_line(line: &[u8]) -> Option<LineSplit<'_>> {
    let pos = line.iter().position(|&b| b == SEPARATOR)?;
    Some(LineSplit {
        station: &line[..pos],
        temperature: &line[pos + 1..],
    })
}
