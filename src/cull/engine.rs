use std::cmp::Ordering;
use std::path::Path;

use crate::cull::action::{ActionKind, ActionLogEntry};
use crate::cull::compare;
use crate::cull::descriptor::TrackDescriptor;
use crate::cull::index::LibraryIndex;
use crate::error::{ExtractionError, ReasonCode};

/// Single-pass duplicate resolver. Consumes extraction outcomes strictly in
/// traversal order, keeps the library index as the only mutable state, and
/// emits exactly one action per file. Never touches the filesystem.
#[derive(Debug, Default)]
pub struct ResolutionEngine {
    index: LibraryIndex,
}

impl ResolutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &LibraryIndex {
        &self.index
    }

    /// Decide what happens to one file. Pure in (outcome, index state);
    /// the returned entry is the only output, the index update the only
    /// side effect.
    pub fn resolve(
        &mut self,
        path: &Path,
        outcome: Result<TrackDescriptor, ExtractionError>,
    ) -> ActionLogEntry {
        let descriptor = match outcome {
            Ok(d) => d,
            Err(err) => {
                return ActionLogEntry::new(
                    path.to_path_buf(),
                    ActionKind::SendToReview,
                    ReasonCode::from(&err),
                );
            }
        };

        if !descriptor.integrity_ok {
            return ActionLogEntry::new(
                descriptor.path,
                ActionKind::SendToReview,
                ReasonCode::CorruptStream,
            );
        }

        let Some(key) = descriptor.track_key() else {
            return ActionLogEntry::new(
                descriptor.path,
                ActionKind::SendToReview,
                ReasonCode::MissingTags,
            );
        };

        let Some(incumbent) = self.index.lookup(&key) else {
            let entry = ActionLogEntry::new(
                descriptor.path.clone(),
                ActionKind::KeepAsBest,
                ReasonCode::FirstSighting,
            );
            self.index.insert(key, descriptor);
            return entry;
        };

        let incumbent_path = incumbent.current_best.path.clone();
        let priority_decides =
            descriptor.container_priority != incumbent.current_best.container_priority;

        // Across classes only the container priority table speaks; within a
        // class the full comparator does. A cross-class priority tie cannot
        // occur with a well-banded table, but keeps the incumbent if it does.
        let ordering = if descriptor.format_class != incumbent.current_best.format_class {
            incumbent
                .current_best
                .container_priority
                .cmp(&descriptor.container_priority)
        } else {
            compare::compare(&descriptor, &incumbent.current_best)
        };

        match ordering {
            Ordering::Greater => {
                let reason = if priority_decides {
                    ReasonCode::BetterContainer
                } else {
                    ReasonCode::BetterSignals
                };
                let entry =
                    ActionLogEntry::new(descriptor.path.clone(), ActionKind::SupersedeAndRetire, reason)
                        .related(incumbent_path);
                self.index.supersede(&key, descriptor);
                entry
            }
            Ordering::Equal => ActionLogEntry::new(
                descriptor.path,
                ActionKind::DiscardAsInferior,
                ReasonCode::EqualQualityTie,
            )
            .related(incumbent_path),
            Ordering::Less => {
                let reason = if priority_decides {
                    ReasonCode::WorseContainer
                } else {
                    ReasonCode::WorseSignals
                };
                ActionLogEntry::new(descriptor.path, ActionKind::DiscardAsInferior, reason)
                    .related(incumbent_path)
            }
        }
    }

    /// Final sweep: one placement action per logical track, in first-seen
    /// key order. This is the only action that ever reads destination
    /// folder structure, and the executor resolves that.
    pub fn placements(&self) -> Vec<ActionLogEntry> {
        self.index
            .entries()
            .map(|entry| {
                ActionLogEntry::new(
                    entry.current_best.path.clone(),
                    ActionKind::PlaceInLibrary,
                    ReasonCode::FinalPlacement,
                )
            })
            .collect()
    }
}
