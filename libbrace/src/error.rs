//! Error types for reading source text.
//!
//! Brace checking itself cannot fail; these errors only arise at the
//! boundary where bytes are read and decoded into lines.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for source loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Names the input being decoded, for decoding error messages.
#[derive(Clone, Debug, Default)]
pub struct SourceContext {
    pub name: Option<String>,
}

impl SourceContext {
    /// `name` is usually the file path; `None` for anonymous input.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
        }
    }

    /// ` of <name>` when the input is named, otherwise empty.
    pub fn name_suffix(&self) -> String {
        match &self.name {
            Some(name) => format!(" of <{}>", name),
            None => String::new(),
        }
    }
}

/// Error type for loading source text.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not valid UTF-8.
    #[error("Input is not valid UTF-8 at line {line}, col {column}{suffix}")]
    Decoding {
        line: usize,
        column: usize,
        suffix: String,
    },
}

impl Error {
    /// Create a decoding error at a 1-based location.
    pub fn decoding(ctx: &SourceContext, line: usize, column: usize) -> Self {
        Error::Decoding {
            line,
            column,
            suffix: ctx.name_suffix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoding_message_with_name() {
        let ctx = SourceContext::new(Some("AppContext.tsx"));
        let err = Error::decoding(&ctx, 3, 7);
        assert_eq!(
            err.to_string(),
            "Input is not valid UTF-8 at line 3, col 7 of <AppContext.tsx>"
        );
    }

    #[test]
    fn test_decoding_message_without_name() {
        let err = Error::decoding(&SourceContext::default(), 1, 1);
        assert_eq!(err.to_string(), "Input is not valid UTF-8 at line 1, col 1");
    }
}
