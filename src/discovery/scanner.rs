//! Source sample discovery

use crate::types::{AudioFormat, SCAN_EXTENSIONS};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Marks a file as generated output rather than an original sample
const GENERATED_MARKER: char = '_';

/// Original sample selected for shifting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name without extension
    pub stem: String,
    pub format: AudioFormat,
}

/// Scan a directory (non-recursively) for source samples
///
/// Files are grouped by extension in [`SCAN_EXTENSIONS`] order and sorted
/// by file name within each group. Hidden files are ignored. Files whose
/// stem contains an underscore are treated as previously generated output
/// and skipped. A missing directory yields an empty list.
pub fn scan(dir: &Path) -> Vec<SourceFile> {
    if !dir.is_dir() {
        warn!("Input directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut candidates: Vec<(usize, SourceFile)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| try_discover_file(entry.path()))
        .collect();

    candidates.sort_by(|(a_rank, a), (b_rank, b)| {
        a_rank
            .cmp(b_rank)
            .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
    });

    let mut seen = HashSet::new();
    let files: Vec<SourceFile> = candidates
        .into_iter()
        .map(|(_, file)| file)
        .filter(|file| {
            let key = file.path.canonicalize().unwrap_or_else(|_| file.path.clone());
            seen.insert(key)
        })
        .collect();

    info!("Discovered {} source files in {}", files.len(), dir.display());
    files
}

/// Returns the scan rank of the file's extension and the file itself,
/// or None if it is not an original sample
fn try_discover_file(path: &Path) -> Option<(usize, SourceFile)> {
    if is_hidden(path) {
        debug!("Skipping hidden file: {}", path.display());
        return None;
    }

    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let rank = SCAN_EXTENSIONS.iter().position(|candidate| *candidate == ext)?;
    let format = AudioFormat::from_extension(&ext)?;
    let stem = path.file_stem()?.to_string_lossy().into_owned();

    if is_generated_stem(&stem) {
        debug!("Skipping generated file: {}", path.display());
        return None;
    }

    debug!("Discovered: {}", path.display());
    Some((
        rank,
        SourceFile {
            path: path.to_path_buf(),
            stem,
            format,
        },
    ))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// True if the stem looks like output of a previous run
pub fn is_generated_stem(stem: &str) -> bool {
    stem.contains(GENERATED_MARKER)
}
