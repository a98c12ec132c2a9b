//! Path utilities for candidate discovery

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::domain::model::TEMP_SUFFIX;

/// Extensions (lowercase, without the dot) treated as video files
pub const VIDEO_EXTENSIONS: [&str; 8] = ["mkv", "mp4", "avi", "mov", "wmv", "flv", "webm", "m2ts"];

/// Result of scanning a root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Files to process, in scan order
    pub candidates: Vec<PathBuf>,
    /// Video files skipped because their name marks them as temp artifacts
    pub temp_artifacts: usize,
}

/// Path utilities for the scan
pub struct PathUtils;

impl PathUtils {
    /// Whether the extension is on the video allow-list, ignoring case
    pub fn has_video_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Whether the file is a temp artifact (`{stem}.temp.{ext}`)
    pub fn is_temp_artifact(path: &Path) -> bool {
        path.file_stem()
            .map(Path::new)
            .and_then(|stem| stem.extension())
            .map(|ext| ext == TEMP_SUFFIX)
            .unwrap_or(false)
    }

    /// Collect every candidate below `root`, sorted by file name within each
    /// directory. A regular file given as `root` is its own single candidate.
    pub fn discover(root: &Path) -> Discovery {
        let files: Vec<PathBuf> = if root.is_file() {
            vec![root.to_path_buf()]
        } else {
            WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("Cannot read directory entry: {}", e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .collect()
        };

        let mut discovery = Discovery::default();
        for path in files.into_iter().filter(|p| Self::has_video_extension(p)) {
            if Self::is_temp_artifact(&path) {
                discovery.temp_artifacts += 1;
            } else {
                discovery.candidates.push(path);
            }
        }
        discovery
    }
}
