use anyhow::Result;
use std::path::Path;

use crate::commands::CommandReport;
use crate::cull::census::FormatCensus;
use crate::cull::extract::Extractor;
use crate::cull::priority::PriorityTable;
use crate::cull::walk;

/// Read-only census of a tree: what formats live there, in which quality
/// buckets, and which files cannot be read at all. Touches nothing.
pub fn run(root: &Path) -> Result<CommandReport> {
    let table = PriorityTable::default();
    let files = walk::collect_audio_files(root, &table)?;

    let mut report = CommandReport::new("report");
    report.detail(format!(
        "scanned {} audio file(s) under {}",
        files.len(),
        root.display()
    ));

    let extractor = Extractor::new(table);
    let mut census = FormatCensus::default();
    for path in &files {
        let outcome = extractor.extract(path);
        census.record(path, &outcome);
    }

    for line in census.render_lines() {
        report.detail(line);
    }
    if !census.failures().is_empty() {
        report.issue(format!(
            "{} file(s) could not be read",
            census.failures().len()
        ));
    }
    Ok(report)
}
