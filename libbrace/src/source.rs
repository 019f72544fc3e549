//! Loading source text.
//!
//! Bytes become lines here. Decoding is strict UTF-8; a failure reports
//! the 1-based line and column of the first invalid byte.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result, SourceContext};
use crate::report::Report;

/// Source text as an ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    /// Split a string into lines on `\n`, `\r\n` or a bare `\r`.
    pub fn new(source: &str) -> Self {
        Self {
            lines: split_lines(source).map(String::from).collect(),
        }
    }

    /// Decode UTF-8 bytes into lines.
    pub fn from_bytes(bytes: &[u8], ctx: &SourceContext) -> Result<Self> {
        match std::str::from_utf8(bytes) {
            Ok(source) => Ok(Self::new(source)),
            Err(e) => {
                let (line, column) = locate_offset(bytes, e.valid_up_to());
                Err(Error::decoding(ctx, line, column))
            }
        }
    }

    /// Read and decode a file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "read source");
        let name = path.to_string_lossy();
        Self::from_bytes(&bytes, &SourceContext::new(Some(&name)))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check brace balance over these lines.
    pub fn check(&self) -> Report {
        crate::checker::check(&self.lines)
    }
}

impl From<Vec<String>> for SourceText {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Split source into lines. `\n`, `\r\n` and a bare `\r` each end a line.
/// An empty string has no lines, and a final line break does not start
/// another one.
pub(crate) fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = source;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(end) => {
                let line = &rest[..end];
                let break_len = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + break_len..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// 1-based line and column of a byte offset into text that is valid UTF-8
/// up to that offset. Lines break the same way as in `split_lines`.
fn locate_offset(bytes: &[u8], offset: usize) -> (usize, usize) {
    let prefix = std::str::from_utf8(&bytes[..offset]).unwrap_or_default();
    let mut line_count = 0;
    let mut last_line = "";
    for line in split_lines(prefix) {
        line_count += 1;
        last_line = line;
    }
    if prefix.is_empty() || prefix.ends_with(|c: char| c == '\n' || c == '\r') {
        (line_count + 1, 1)
    } else {
        (line_count, last_line.chars().count() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_splits_lines() {
        let text = SourceText::new("a {\r\n}\n");
        assert_eq!(text.lines(), &["a {".to_string(), "}".to_string()]);
        assert_eq!(text.len(), 2);
    }

    #[test]
    fn test_bare_carriage_return_ends_a_line() {
        let text = SourceText::new("{\r}\r}");
        assert_eq!(text.len(), 3);
        let report = text.check();
        assert_eq!(report.extra_closing(), &[crate::Position::new(3, 1)]);
    }

    #[test]
    fn test_mixed_line_breaks() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\rd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
        let lines: Vec<&str> = split_lines("a\r").collect();
        assert_eq!(lines, vec!["a"]);
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        assert!(SourceText::new("").is_empty());
        assert!(SourceText::new("").check().is_balanced());
    }

    #[test]
    fn test_from_bytes_valid() {
        let ctx = SourceContext::new(None);
        let text = SourceText::from_bytes("{ \"é\" }".as_bytes(), &ctx).unwrap();
        assert!(text.check().is_balanced());
    }

    #[test]
    fn test_from_bytes_invalid_location() {
        let ctx = SourceContext::new(Some("broken.tsx"));
        let mut bytes = b"{\n  \xc3\xa9x".to_vec();
        bytes.push(0xff);
        let err = SourceText::from_bytes(&bytes, &ctx).unwrap_err();
        match err {
            Error::Decoding {
                line,
                column,
                ref suffix,
            } => {
                assert_eq!((line, column), (2, 5));
                assert_eq!(suffix, " of <broken.tsx>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_byte_location_after_bare_carriage_returns() {
        let ctx = SourceContext::new(None);
        let err = SourceText::from_bytes(b"a\r\nb\rc\xff", &ctx).unwrap_err();
        assert!(matches!(err, Error::Decoding { line: 3, column: 2, .. }));
        let err = SourceText::from_bytes(b"{\r\xff", &ctx).unwrap_err();
        assert!(matches!(err, Error::Decoding { line: 2, column: 1, .. }));
        let err = SourceText::from_bytes(b"\xff", &ctx).unwrap_err();
        assert!(matches!(err, Error::Decoding { line: 1, column: 1, .. }));
    }

    #[test]
    fn test_bom_is_kept_as_a_character() {
        let ctx = SourceContext::new(None);
        let text = SourceText::from_bytes(b"\xef\xbb\xbf{", &ctx).unwrap();
        assert_eq!(text.check().unclosed()[0].column, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let err = SourceText::read("/nonexistent/dir/AppContext.tsx").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("Cannot read /nonexistent/dir/AppContext.tsx"));
    }
}
