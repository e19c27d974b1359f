//! File scanning for audio files

use crate::types::ScanResult;
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted when the user adds files or a folder
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a"];

/// Extensions collected by a full volume scan
pub const FULL_SCAN_EXTENSIONS: &[&str] = &["mp3"];

/// Directory names never descended into
pub const DEFAULT_EXCLUDE_NAMES: &[&str] = &[
    "Windows",
    "$RECYCLE.BIN",
    "System Volume Information",
    "ProgramData",
    "Program Files",
    "Program Files (x86)",
    "node_modules",
];

/// Default result cap for a full scan
pub const DEFAULT_MAX_RESULTS: usize = 500;

/// Breadth-first scanner for audio files across several roots
///
/// The walk keeps a set of visited directories (by canonical path), so
/// symlink cycles terminate. Once the number of results reaches
/// `max_results` no further directory is opened; files from the listing in
/// progress are still collected, so the result may overshoot slightly.
#[derive(Debug, Clone)]
pub struct FileScanner {
    /// Lowercase extensions without the dot
    extensions: Vec<String>,

    /// Directory base names to skip
    exclude_names: HashSet<String>,

    /// Soft cap on results
    max_results: usize,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self {
            extensions: FULL_SCAN_EXTENSIONS.iter().map(ToString::to_string).collect(),
            exclude_names: DEFAULT_EXCLUDE_NAMES.iter().map(ToString::to_string).collect(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl FileScanner {
    /// Create a scanner with the full-scan defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extensions to collect
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Set the directory names to skip
    pub fn exclude_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the soft result cap
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Scan `roots` breadth-first and collect matching files
    ///
    /// Never fails: unreadable directories and entries are skipped. Each
    /// call walks from scratch.
    pub async fn scan(&self, roots: &[PathBuf]) -> Vec<ScanResult> {
        let mut queue: VecDeque<PathBuf> = roots.iter().cloned().collect();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut results = Vec::new();

        tracing::info!(roots = roots.len(), max_results = self.max_results, "Starting scan");

        while let Some(dir) = queue.pop_front() {
            if results.len() >= self.max_results {
                tracing::info!(
                    found = results.len(),
                    pending = queue.len() + 1,
                    "Result cap reached, stopping scan"
                );
                break;
            }

            let key = tokio::fs::canonicalize(&dir)
                .await
                .unwrap_or_else(|_| dir.clone());
            if visited.contains(&key) {
                tracing::trace!(dir = %dir.display(), "Already visited");
                continue;
            }
            if self.is_excluded(&dir) {
                tracing::trace!(dir = %dir.display(), "Excluded directory");
                continue;
            }
            visited.insert(key);

            self.scan_directory(&dir, &mut queue, &mut results).await;
        }

        tracing::info!(
            found = results.len(),
            directories = visited.len(),
            "Scan finished"
        );
        results
    }

    /// List one directory, queueing subdirectories and collecting matches
    async fn scan_directory(
        &self,
        dir: &Path,
        queue: &mut VecDeque<PathBuf>,
        results: &mut Vec<ScanResult>,
    ) {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!(dir = %dir.display(), error = %e, "Cannot list directory");
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::trace!(dir = %dir.display(), error = %e, "Cannot read entry");
                    break;
                }
            };
            let path = entry.path();

            // Follows symlinks, like stat
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::trace!(path = %path.display(), error = %e, "Cannot stat entry");
                    continue;
                }
            };

            if metadata.is_dir() {
                queue.push_back(path);
            } else if metadata.is_file() && has_extension(&path, &self.extensions) {
                results.push(ScanResult {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    size_bytes: metadata.len(),
                    last_modified: metadata.modified().ok().map(DateTime::<Utc>::from),
                    path,
                });
            }
        }
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        dir.file_name()
            .map(|name| self.exclude_names.contains(name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }
}

/// List audio files directly inside `folder` (no recursion)
///
/// Accepts [`SUPPORTED_EXTENSIONS`]. Symlinked files count when their
/// target is a file. An unreadable folder yields an empty list. Results are
/// sorted by path.
pub fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    if !folder.is_dir() {
        tracing::warn!(folder = %folder.display(), "Not a readable folder");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| is_audio_file(p))
        .collect();
    files.sort();

    tracing::debug!(folder = %folder.display(), count = files.len(), "Listed folder");
    files
}

/// Check if a file is a supported audio file
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("test.mp3")));
        assert!(is_audio_file(Path::new("test.MP3")));
        assert!(is_audio_file(Path::new("test.m4a")));
        assert!(is_audio_file(Path::new("test.flac")));
        assert!(!is_audio_file(Path::new("test.opus")));
        assert!(!is_audio_file(Path::new("test.txt")));
        assert!(!is_audio_file(Path::new("test")));
    }

    #[test]
    fn test_extension_builder_normalizes() {
        let scanner = FileScanner::new().extensions([".WAV", "ogg"]);
        assert!(has_extension(Path::new("a.wav"), &scanner.extensions));
        assert!(has_extension(Path::new("a.OGG"), &scanner.extensions));
        assert!(!has_extension(Path::new("a.mp3"), &scanner.extensions));
    }

    #[test]
    fn test_default_excludes() {
        let scanner = FileScanner::new();
        assert!(scanner.is_excluded(Path::new("/repo/node_modules")));
        assert!(scanner.is_excluded(Path::new("/mnt/c/$RECYCLE.BIN")));
        assert!(!scanner.is_excluded(Path::new("/home/me/Music")));
        assert!(!scanner.is_excluded(Path::new("/")));
    }
}
