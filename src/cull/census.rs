use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cull::descriptor::{FormatClass, TrackDescriptor};
use crate::error::ExtractionError;

/// Per-run tally of what the collection contains: file counts per
/// `(format class, container priority)` bucket, per-extension counts, and
/// the files that failed extraction.
#[derive(Debug, Default)]
pub struct FormatCensus {
    buckets: BTreeMap<(FormatClass, u32), usize>,
    extensions: BTreeMap<String, usize>,
    failures: Vec<(PathBuf, ExtractionError)>,
    total_bytes: u64,
}

impl FormatCensus {
    pub fn record(&mut self, path: &Path, outcome: &Result<TrackDescriptor, ExtractionError>) {
        match outcome {
            Ok(d) => {
                *self
                    .buckets
                    .entry((d.format_class, d.container_priority))
                    .or_default() += 1;
                let ext = path
                    .extension()
                    .and_then(|s| s.to_str())
                    .unwrap_or("none")
                    .to_ascii_lowercase();
                *self.extensions.entry(ext).or_default() += 1;
                self.total_bytes += d.file_size_bytes;
            }
            Err(err) => self.failures.push((path.to_path_buf(), err.clone())),
        }
    }

    pub fn total_classified(&self) -> usize {
        self.buckets.values().sum()
    }

    pub fn failures(&self) -> &[(PathBuf, ExtractionError)] {
        &self.failures
    }

    /// Human-readable census lines, stable order (class band, then
    /// priority).
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "classified {} file(s), {} byte(s) of audio",
            self.total_classified(),
            self.total_bytes
        ));
        for ((class, priority), count) in &self.buckets {
            lines.push(format!(
                "{}/priority {}: {} file(s)",
                class.as_str(),
                priority,
                count
            ));
        }
        for (ext, count) in &self.extensions {
            lines.push(format!(".{ext}: {count} file(s)"));
        }
        for (path, err) in &self.failures {
            lines.push(format!("failed {}: {err}", path.display()));
        }
        lines
    }
}
