use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cull::priority::PriorityTable;

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_supported_extension(path: &Path, table: &PriorityTable) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| table.is_supported(ext))
        .unwrap_or(false)
}

/// Collect every supported audio file under `root`, sorted into
/// lexicographic path order. The sort makes the traversal order — and with
/// it every tie-break decision downstream — reproducible across runs and
/// filesystems.
///
/// The only fatal error of a run lives here: an unreadable root aborts
/// before any action is produced. Unreadable entries deeper in the tree are
/// skipped.
pub fn collect_audio_files(root: &Path, table: &PriorityTable) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("source root {} is not a directory", root.display());
    }
    std::fs::read_dir(root)
        .with_context(|| format!("failed to enumerate source root {}", root.display()))?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| has_supported_extension(p, table))
        .collect();

    files.sort();
    Ok(files)
}
