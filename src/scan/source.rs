//! Filesystem-backed document provider.
//!
//! The extraction core does not traverse the filesystem itself; it consumes
//! whatever a [`DocumentSource`] yields. The contract is a stable,
//! path-sorted document set per invocation, each document fully
//! materialized as an ordered line sequence. Undecodable bytes are
//! replaced lossily and never fail a read; I/O failures downgrade to one
//! [`ReadError`] per document.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use walkdir::WalkDir;

/// A fully materialized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path the document was loaded from.
    pub path: PathBuf,
    /// Document content, one entry per line.
    pub lines: Vec<String>,
}

/// A document that could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("Failed to read {}: {source}", path.display())]
pub struct ReadError {
    /// Path of the document that failed to load.
    pub path: PathBuf,
    /// The underlying I/O failure.
    pub source: io::Error,
}

/// Yields the documents for one traceability run.
pub trait DocumentSource {
    /// Loads every document, in lexicographic path order.
    ///
    /// Read failures are yielded in place so the caller can record them
    /// without aborting the run.
    fn load(&self) -> Vec<Result<Document, ReadError>>;
}

/// Loads `.md` documents from a set of root directories.
#[derive(Debug, Clone)]
pub struct FsSource {
    roots: Vec<PathBuf>,
}

impl FsSource {
    /// Creates a source that scans the given roots recursively.
    ///
    /// Roots that do not exist contribute no documents.
    #[must_use]
    pub const fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl DocumentSource for FsSource {
    fn load(&self) -> Vec<Result<Document, ReadError>> {
        let mut paths: Vec<PathBuf> = self
            .roots
            .iter()
            .flat_map(|root| collect_markdown_paths(root))
            .collect();

        // Duplicate detection and diagnostic ordering depend on a
        // deterministic document order, so reads may run in parallel but
        // results are merged in sorted path order.
        paths.sort();
        paths.dedup();

        paths.into_par_iter().map(load_document).collect()
    }
}

fn collect_markdown_paths(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new("md")))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn load_document(path: PathBuf) -> Result<Document, ReadError> {
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) => return Err(ReadError { path, source }),
    };

    let text = String::from_utf8_lossy(&bytes);
    let lines = text.lines().map(ToString::to_string).collect();
    Ok(Document { path, lines })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn unwrap_paths(documents: Vec<Result<Document, ReadError>>) -> Vec<PathBuf> {
        documents
            .into_iter()
            .map(|document| document.unwrap().path)
            .collect()
    }

    #[test]
    fn loads_markdown_files_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("spec");
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("b.md"), "ID: SYS-002\n").unwrap();
        fs::write(root.join("nested/c.md"), "ID: SYS-003\n").unwrap();
        fs::write(root.join("a.md"), "ID: SYS-001\n").unwrap();

        let source = FsSource::new(vec![root.clone()]);
        let paths = unwrap_paths(source.load());

        assert_eq!(
            paths,
            [
                root.join("a.md"),
                root.join("b.md"),
                root.join("nested/c.md")
            ]
        );
    }

    #[test]
    fn ignores_non_markdown_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "ID: SYS-001\n").unwrap();
        fs::write(tmp.path().join("spec.md"), "ID: SYS-001\n").unwrap();

        let source = FsSource::new(vec![tmp.path().to_path_buf()]);
        let paths = unwrap_paths(source.load());

        assert_eq!(paths, [tmp.path().join("spec.md")]);
    }

    #[test]
    fn missing_root_contributes_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = FsSource::new(vec![tmp.path().join("does-not-exist")]);
        assert!(source.load().is_empty());
    }

    #[test]
    fn duplicate_roots_are_scanned_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("spec.md"), "ID: SYS-001\n").unwrap();

        let root = tmp.path().to_path_buf();
        let source = FsSource::new(vec![root.clone(), root]);

        assert_eq!(source.load().len(), 1);
    }

    #[test]
    fn undecodable_bytes_are_replaced_not_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec.md");
        fs::write(&path, b"ID: SYS-001\ncaf\xe9\n").unwrap();

        let source = FsSource::new(vec![tmp.path().to_path_buf()]);
        let documents = source.load();

        let document = documents.into_iter().next().unwrap().unwrap();
        assert_eq!(document.lines[0], "ID: SYS-001");
        assert!(document.lines[1].contains('\u{fffd}'));
    }

    #[test]
    fn splits_lines_preserving_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec.md");
        fs::write(&path, "first\nsecond\n\nfourth\n").unwrap();

        let source = FsSource::new(vec![tmp.path().to_path_buf()]);
        let document = source.load().into_iter().next().unwrap().unwrap();

        assert_eq!(document.lines, ["first", "second", "", "fourth"]);
    }
}
