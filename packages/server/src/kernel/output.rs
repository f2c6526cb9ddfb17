//! Best-effort mirror of the final document to a local file.
//!
//! The written file is a side output, not a source of truth: a failure to
//! write it is logged and swallowed, never surfaced to the request.

use std::fs;
use std::io;
use std::path::Path;

/// Write the document to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) {
    match try_write(path, content) {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = content.len(), "Wrote output document");
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Failed to write output document");
        }
    }
}

fn try_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_file_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/output_llm.txt");

        write_output(&path, "## Homepage\n- [Home](https://example.com/)");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("## Homepage"));
    }

    #[test]
    fn test_write_failure_does_not_panic() {
        // Path with an unwritable parent (a file used as a directory)
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        write_output(&blocker.join("child.txt"), "content");
    }
}
