//! Brace balance checker.
//!
//! Scans source text for `{` and `}` and reports every brace that has no
//! partner: closing braces seen while nothing was open, and opening braces
//! still open at the end of the input. Lines and columns are 1-based, as
//! editors number them.
//!
//! # Pipeline
//!
//! 1. **Source**: Raw bytes are decoded as UTF-8 and split into lines. This
//!    is the only stage that can fail.
//!
//! 2. **Checker**: One pass over the lines with a stack of open brace
//!    positions. Never fails; unbalanced input is an ordinary result.
//!
//! 3. **Report**: The balanced verdict plus the two ordered defect lists,
//!    rendered as text through `Display`.

mod checker;
mod error;
mod position;
mod report;
mod source;

pub use checker::{check, check_str};
pub use error::{Error, Result, SourceContext};
pub use position::Position;
pub use report::{Defect, Report};
pub use source::SourceText;

/// Read a file and check its brace balance.
///
/// # Example
///
/// ```no_run
/// use libbrace::check_file;
///
/// let report = check_file("src/context/AppContext.tsx").unwrap();
/// if !report.is_balanced() {
///     println!("{}", report);
/// }
/// ```
pub fn check_file(path: impl AsRef<std::path::Path>) -> Result<Report> {
    Ok(SourceText::read(path)?.check())
}
