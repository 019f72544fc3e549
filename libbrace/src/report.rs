//! Balance check results and their text rendering.

use std::fmt;

use crate::position::Position;

/// An unmatched brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Defect {
    /// A `}` with no open brace to close.
    ExtraClosingBrace(Position),
    /// A `{` that was never closed.
    UnclosedBrace(Position),
}

impl Defect {
    /// Location of the offending brace.
    pub fn position(&self) -> Position {
        match self {
            Defect::ExtraClosingBrace(pos) | Defect::UnclosedBrace(pos) => *pos,
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Defect::ExtraClosingBrace(pos) => write!(f, "Extra closing brace at {}", pos),
            Defect::UnclosedBrace(pos) => write!(f, "Unclosed brace at {}", pos),
        }
    }
}

/// Outcome of a brace balance check.
///
/// Only the checker builds reports, so the verdict always agrees with the
/// defect lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    balanced: bool,
    extra_closing: Vec<Position>,
    unclosed: Vec<Position>,
}

impl Report {
    pub(crate) fn new(extra_closing: Vec<Position>, unclosed: Vec<Position>) -> Self {
        Self {
            balanced: extra_closing.is_empty() && unclosed.is_empty(),
            extra_closing,
            unclosed,
        }
    }

    /// True iff both defect lists are empty.
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// Closing braces seen with nothing open, in scan order.
    pub fn extra_closing(&self) -> &[Position] {
        &self.extra_closing
    }

    /// Opening braces left open at end of input, earliest first.
    pub fn unclosed(&self) -> &[Position] {
        &self.unclosed
    }

    /// Total number of unmatched braces.
    pub fn defect_count(&self) -> usize {
        self.extra_closing.len() + self.unclosed.len()
    }

    /// All defects, extra closers first, then unclosed openers.
    pub fn defects(&self) -> impl Iterator<Item = Defect> + '_ {
        let extra = self
            .extra_closing
            .iter()
            .copied()
            .map(Defect::ExtraClosingBrace);
        let open = self.unclosed.iter().copied().map(Defect::UnclosedBrace);
        extra.chain(open)
    }
}

/// Renders one message per line:
///
/// ```text
/// Extra closing brace at line 12, col 1
/// Unclosed braces: 1
/// Unclosed brace at line 3, col 40
/// ```
///
/// or `Braces are balanced.` when there is nothing to report.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.balanced {
            return write!(f, "Braces are balanced.");
        }
        let mut lines: Vec<String> = self
            .extra_closing
            .iter()
            .map(|pos| Defect::ExtraClosingBrace(*pos).to_string())
            .collect();
        if !self.unclosed.is_empty() {
            lines.push(format!("Unclosed braces: {}", self.unclosed.len()));
            lines.extend(
                self.unclosed
                    .iter()
                    .map(|pos| Defect::UnclosedBrace(*pos).to_string()),
            );
        }
        write!(f, "{}", lines.join("\n"))
    }
}
