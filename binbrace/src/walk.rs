//! Directory traversal and the extension filter.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use libbrace::Error;
use tracing::debug;

/// Extensions checked in directory mode when nothing else is configured.
const DEFAULT_EXTENSIONS: &str = "ts,tsx,js,jsx,rs,c,h,cpp,java,go,cs,json,css";

/// Environment variable overriding the default extension list.
const EXTENSIONS_VAR: &str = "BRACES_EXTENSIONS";

/// Resolve the extension list: `--ext`, then `BRACES_EXTENSIONS`, then the default.
pub fn resolve_extensions(cli: Option<&str>) -> Vec<String> {
    let list = cli
        .map(String::from)
        .or_else(|| env::var(EXTENSIONS_VAR).ok())
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.to_string());
    parse_extension_list(&list)
}

/// Split a comma-separated list, dropping leading dots and empty entries.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .map(|e| extensions.iter().any(|x| *x == e))
        .unwrap_or(false)
}

/// Collect matching files under `dir`, recursively, in sorted order.
pub fn collect_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    visit(dir, extensions, &mut files)?;
    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "collected files");
    Ok(files)
}

fn visit(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<(), Error> {
    let io_err = |source: std::io::Error| Error::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        // `file_type` does not follow symlinks.
        let file_type = entry.file_type().map_err(io_err)?;
        let path = entry.path();
        if file_type.is_dir() {
            visit(&path, extensions, files)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "skipping symlinked directory");
        } else if has_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}
