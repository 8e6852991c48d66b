//! Media listings: an extension-filtered, stably ordered directory scan.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extensions treated as playable media, lower-case.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "webm", "flv", "wmv", "m4v", "mpg", "mpeg", "3gp", "ts",
];

/// A sorted listing of media files under one root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaLibrary {
    files: Vec<PathBuf>,
}

impl MediaLibrary {
    /// Scan `root` recursively. Unreadable entries are skipped with a
    /// warning; a missing root yields an empty library. Results are sorted
    /// by path so indices stay stable between scans.
    pub fn scan(root: &Path) -> Self {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("media scan: {err}");
                    continue;
                }
            };
            if entry.file_type().is_file() && is_media(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        MediaLibrary { files }
    }

    pub fn from_files(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        MediaLibrary { files }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Indexed access: `wrap` folds the index modulo the listing length,
    /// otherwise out-of-range indices clamp to the last file.
    pub fn at(&self, index: usize, wrap: bool) -> Option<&Path> {
        if self.files.is_empty() {
            return None;
        }
        let index = if wrap {
            index % self.files.len()
        } else {
            index.min(self.files.len() - 1)
        };
        self.files.get(index).map(PathBuf::as_path)
    }
}

fn is_media(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            MEDIA_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
