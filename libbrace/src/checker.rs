//! Brace balance checker.
//!
//! A single pass over the source keeps a stack of the positions of open
//! braces:
//! - `{` pushes its position
//! - `}` pops the innermost open brace, or is recorded as an extra closer
//!   when nothing is open
//! - whatever remains on the stack at the end is unclosed, outermost first
//!
//! All other characters are ignored.

use tracing::{debug, trace};

use crate::position::Position;
use crate::report::Report;

/// Check brace balance over a sequence of lines.
///
/// Lines and columns are numbered from 1; columns count characters.
///
/// ```
/// use libbrace::{check, Position};
///
/// let report = check(["{", "  { }"]);
/// assert!(!report.is_balanced());
/// assert_eq!(report.unclosed(), vec![Position::new(1, 1)]);
/// ```
pub fn check<I, S>(lines: I) -> Report
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stack: Vec<Position> = Vec::new();
    let mut extra_closing = Vec::new();
    let mut line_count = 0;

    for (line_idx, line) in lines.into_iter().enumerate() {
        line_count += 1;
        for (col_idx, ch) in line.as_ref().chars().enumerate() {
            match ch {
                '{' => stack.push(Position::new(line_idx + 1, col_idx + 1)),
                '}' => {
                    if stack.pop().is_none() {
                        let pos = Position::new(line_idx + 1, col_idx + 1);
                        trace!(%pos, "extra closing brace");
                        extra_closing.push(pos);
                    }
                }
                _ => {}
            }
        }
    }

    debug!(
        lines = line_count,
        extra_closing = extra_closing.len(),
        unclosed = stack.len(),
        "brace check finished"
    );

    // Push order is already earliest-opened first.
    Report::new(extra_closing, stack)
}

/// Check brace balance over a whole source string.
pub fn check_str(source: &str) -> Report {
    check(crate::source::split_lines(source))
}
