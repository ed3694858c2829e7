//! Transforming files and directory trees on disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::options::TransformOptions;
use crate::transform::{transform_with_report, TransformReport};

/// Errors that can occur while transforming files.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// True for the JavaScript and TypeScript extensions the rewriter accepts.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "cts" | "tsx"
            )
        })
}

/// Outcome of [`transform_tree`].
#[derive(Debug, Default)]
pub struct TreeReport {
    /// Files written, relative to the source root.
    pub transformed: Vec<PathBuf>,
    /// Files that could not be transformed, with the reason.
    pub failed: Vec<(PathBuf, String)>,
    /// Statement counts summed over every transformed file.
    pub totals: TransformReport,
}

/// Read and transform a single source file.
pub fn transform_file(path: &Path, options: &TransformOptions) -> FileResult<String> {
    if !is_supported(path) {
        return Err(FileError::UnsupportedFileType(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(transform_with_report(&content, options).0)
}

/// Transform every supported file under `src_root` into the same relative
/// path under `dst_root`. Other files are not copied.
///
/// A file that fails is logged and recorded in [`TreeReport::failed`]; the
/// walk continues.
pub fn transform_tree(
    src_root: &Path,
    dst_root: &Path,
    options: &TransformOptions,
) -> FileResult<TreeReport> {
    let mut report = TreeReport::default();

    for entry in WalkDir::new(src_root)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_supported(path) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(src_root) else {
            continue;
        };

        match transform_one(path, &dst_root.join(relative), options) {
            Ok(counts) => {
                tracing::debug!(file = %relative.display(), ?counts, "transformed");
                report.totals.merge(counts);
                report.transformed.push(relative.to_path_buf());
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "failed to transform");
                report.failed.push((relative.to_path_buf(), e.to_string()));
            }
        }
    }

    Ok(report)
}

fn transform_one(src: &Path, dst: &Path, options: &TransformOptions) -> FileResult<TransformReport> {
    let content = fs::read_to_string(src)?;
    let (output, counts) = transform_with_report(&content, options);
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dst, output)?;
    Ok(counts)
}

/// Check if a directory should be skipped during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}
