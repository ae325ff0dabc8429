use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::commands::CommandReport;
use crate::cull::action::{ActionKind, ActionLog};
use crate::cull::census::FormatCensus;
use crate::cull::config::{self, CliOverrides};
use crate::cull::engine::ResolutionEngine;
use crate::cull::executor::ActionExecutor;
use crate::cull::extract::Extractor;
use crate::cull::walk;

/// The full pipeline: walk the source tree in canonical order, resolve
/// every file to an action, execute the action, then place one winner per
/// logical track. One action log line per file, streamed as it happens.
pub fn run(cli: &CliOverrides) -> Result<CommandReport> {
    let cfg = config::load(cli)?;
    let table = cfg.priority_table()?;
    let mut report = CommandReport::new("organize");

    let started = chrono::Local::now();
    info!(
        source = %cfg.source_root.display(),
        dry_run = cfg.dry_run,
        copy = cfg.copy_instead_of_move,
        "organize pass started"
    );

    // The one fatal error of a run: an unreadable source root.
    let files = walk::collect_audio_files(&cfg.source_root, &table)?;
    report.detail(format!(
        "scanned {} candidate file(s) under {}",
        files.len(),
        cfg.source_root.display()
    ));

    let log_path = cfg.log_path.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "trackcull-{}.jsonl",
            started.format("%Y%m%d-%H%M%S")
        ))
    });
    let mut log = ActionLog::with_sink(&log_path)?;

    let extractor = Extractor::new(table);
    let mut engine = ResolutionEngine::new();
    let mut census = FormatCensus::default();
    let executor = ActionExecutor::new(&cfg);

    for path in &files {
        let outcome = extractor.extract(path);
        census.record(path, &outcome);
        let mut entry = engine.resolve(path, outcome);
        if let Err(err) = executor.apply(&entry) {
            warn!(path = %entry.path.display(), %err, "action failed");
            entry.execution_failure = Some(err.to_string());
        }
        log.append(entry)?;
    }

    // Final sweep: placements come out in first-seen key order, parallel to
    // the index entries they were built from.
    if engine.index().is_empty() {
        report.detail("no classifiable tracks found");
    }

    let placements = engine.placements();
    for (mut entry, lib) in placements.into_iter().zip(engine.index().entries()) {
        debug!(
            title = %lib.key.title,
            artist = %lib.key.artist,
            winner = %lib.current_best.path.display(),
            "placing winner"
        );
        if let Err(err) = executor.place(&lib.current_best) {
            warn!(path = %entry.path.display(), %err, "placement failed");
            entry.execution_failure = Some(err.to_string());
        }
        log.append(entry)?;
    }

    summarize(&mut report, &log, &census, engine.index().len());
    report.detail(format!("action log written to {}", log_path.display()));
    if cfg.dry_run {
        report.detail("dry run: no files were moved, copied, or deleted");
    }
    Ok(report)
}

fn summarize(
    report: &mut CommandReport,
    log: &ActionLog,
    census: &FormatCensus,
    tracks: usize,
) {
    let count = |kind: ActionKind| {
        log.entries()
            .iter()
            .filter(|e| e.action == kind)
            .count()
    };
    report.detail(format!(
        "{} logical track(s): kept {}, superseded {}, discarded {}, reviewed {}, placed {}",
        tracks,
        count(ActionKind::KeepAsBest),
        count(ActionKind::SupersedeAndRetire),
        count(ActionKind::DiscardAsInferior),
        count(ActionKind::SendToReview),
        count(ActionKind::PlaceInLibrary),
    ));
    for line in census.render_lines() {
        report.detail(line);
    }

    let failed = log
        .entries()
        .iter()
        .filter(|e| e.execution_failure.is_some())
        .count();
    if failed > 0 {
        report.issue(format!("{failed} action(s) failed to execute; see the log"));
    }
}
