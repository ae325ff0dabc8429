use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cull::action::{ActionKind, ActionLogEntry};
use crate::cull::config::Config;
use crate::cull::descriptor::TrackDescriptor;
use crate::error::ExecutionError;

/// Carries out the filesystem side of each action. In dry-run mode every
/// call is a no-op, so a dry pass produces the exact action log of a real
/// pass without touching anything.
#[derive(Debug)]
pub struct ActionExecutor<'a> {
    cfg: &'a Config,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self { cfg }
    }

    /// Apply one per-file action from the resolution pass. Placement is
    /// separate (`place`) because it is the only action that needs tag data
    /// to build the destination path.
    pub fn apply(&self, entry: &ActionLogEntry) -> Result<(), ExecutionError> {
        debug_assert_ne!(entry.action, ActionKind::PlaceInLibrary);
        if self.cfg.dry_run {
            return Ok(());
        }
        match entry.action {
            ActionKind::KeepAsBest | ActionKind::PlaceInLibrary => Ok(()),
            ActionKind::SendToReview => self.move_to_review(&entry.path),
            // Retiring and discarding delete a file; in copy mode the source
            // tree is left untouched, so both become no-ops.
            ActionKind::SupersedeAndRetire => match &entry.related_path {
                Some(retired) if !self.cfg.copy_instead_of_move => delete(retired),
                _ => Ok(()),
            },
            ActionKind::DiscardAsInferior => {
                if self.cfg.copy_instead_of_move {
                    Ok(())
                } else {
                    delete(&entry.path)
                }
            }
        }
    }

    /// Move or copy a winning file into `destination/<artist>/<album>/`.
    pub fn place(&self, descriptor: &TrackDescriptor) -> Result<(), ExecutionError> {
        if self.cfg.dry_run {
            return Ok(());
        }
        let artist = sanitize_component(descriptor.artist.as_deref().unwrap_or("Unknown Artist"));
        let album = sanitize_component(descriptor.album.as_deref().unwrap_or("Unknown Album"));
        let album_dir = self.cfg.destination_root.join(artist).join(album);

        let file_name = descriptor
            .path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("unnamed"));
        let target = unique_target(&album_dir, &file_name);

        debug!(from = %descriptor.path.display(), to = %target.display(), "placing");
        if self.cfg.copy_instead_of_move {
            copy(&descriptor.path, &target)
        } else {
            move_file(&descriptor.path, &target)
        }
    }

    fn move_to_review(&self, path: &Path) -> Result<(), ExecutionError> {
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("unnamed"));
        let target = unique_target(&self.cfg.review_root, &file_name);
        debug!(from = %path.display(), to = %target.display(), "quarantining");
        move_file(path, &target)
    }
}

/// Strip characters that are unsafe in folder names on common filesystems.
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let trimmed = cleaned.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick a target path that does not collide with an existing file, so two
/// review candidates with the same filename both survive.
fn unique_target(dir: &Path, file_name: &Path) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = file_name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let ext = file_name.extension().and_then(|s| s.to_str());
    for n in 1u32.. {
        let name = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("u32 counter exhausted");
}

fn delete(path: &Path) -> Result<(), ExecutionError> {
    debug!(path = %path.display(), "deleting");
    fs::remove_file(path).map_err(|err| ExecutionError::Delete {
        path: path.display().to_string(),
        detail: err.to_string(),
    })
}

fn copy(from: &Path, to: &Path) -> Result<(), ExecutionError> {
    ensure_parent(to)?;
    fs::copy(from, to).map_err(|err| ExecutionError::Copy {
        path: from.display().to_string(),
        detail: err.to_string(),
    })?;
    Ok(())
}

/// Rename, falling back to copy+remove when the destination is on another
/// filesystem.
fn move_file(from: &Path, to: &Path) -> Result<(), ExecutionError> {
    if from == to {
        return Ok(());
    }
    ensure_parent(to)?;
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if matches!(
                rename_err.kind(),
                ErrorKind::CrossesDevices | ErrorKind::PermissionDenied
            ) {
                copy(from, to)?;
                delete(from)
            } else {
                Err(ExecutionError::Move {
                    path: from.display().to_string(),
                    detail: rename_err.to_string(),
                })
            }
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), ExecutionError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|err| ExecutionError::Move {
        path: parent.display().to_string(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cull::action::ActionLogEntry;
    use crate::cull::descriptor::FormatClass;
    use crate::error::ReasonCode;
    use tempfile::tempdir;

    fn config(root: &Path, dry_run: bool, copy_mode: bool) -> Config {
        Config {
            source_root: root.join("in"),
            destination_root: root.join("out"),
            review_root: root.join("review"),
            dry_run,
            copy_instead_of_move: copy_mode,
            ..Config::default()
        }
    }

    fn descriptor(path: PathBuf, artist: &str, album: &str) -> TrackDescriptor {
        TrackDescriptor {
            path,
            title: Some("t".into()),
            artist: Some(artist.into()),
            album: Some(album.into()),
            format_class: FormatClass::LossyCompressed,
            container_priority: 20,
            bitrate_bps: 128_000,
            sample_rate_hz: 44_100,
            bit_depth_bits: 0,
            channels: 2,
            duration_secs: 60,
            file_size_bytes: 3,
            integrity_ok: true,
        }
    }

    #[test]
    fn review_moves_the_file_and_keeps_collisions_apart() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), false, false);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let sub = cfg.source_root.join("sub");
        fs::create_dir_all(&sub).unwrap();
        let a = cfg.source_root.join("x.mp3");
        let b = sub.join("x.mp3");
        fs::write(&a, b"one").unwrap();
        fs::write(&b, b"two").unwrap();

        let exec = ActionExecutor::new(&cfg);
        for p in [&a, &b] {
            exec.apply(&ActionLogEntry::new(
                p.clone(),
                ActionKind::SendToReview,
                ReasonCode::MissingTags,
            ))
            .unwrap();
        }

        assert!(!a.exists());
        assert!(!b.exists());
        assert!(cfg.review_root.join("x.mp3").exists());
        assert!(cfg.review_root.join("x (1).mp3").exists());
    }

    #[test]
    fn discard_deletes_unless_copy_mode() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), false, false);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let loser = cfg.source_root.join("loser.mp3");
        fs::write(&loser, b"x").unwrap();

        let entry = ActionLogEntry::new(
            loser.clone(),
            ActionKind::DiscardAsInferior,
            ReasonCode::WorseSignals,
        );
        ActionExecutor::new(&cfg).apply(&entry).unwrap();
        assert!(!loser.exists());

        fs::write(&loser, b"x").unwrap();
        let copy_cfg = config(tmp.path(), false, true);
        ActionExecutor::new(&copy_cfg).apply(&entry).unwrap();
        assert!(loser.exists(), "copy mode never deletes from the source");
    }

    #[test]
    fn supersede_retires_the_old_best() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), false, false);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let old = cfg.source_root.join("old.mp3");
        let new = cfg.source_root.join("new.flac");
        fs::write(&old, b"x").unwrap();
        fs::write(&new, b"y").unwrap();

        let entry = ActionLogEntry::new(
            new.clone(),
            ActionKind::SupersedeAndRetire,
            ReasonCode::BetterContainer,
        )
        .related(old.clone());
        ActionExecutor::new(&cfg).apply(&entry).unwrap();

        assert!(!old.exists());
        assert!(new.exists());
    }

    #[test]
    fn placement_builds_sanitized_artist_album_layout() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), false, false);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let src = cfg.source_root.join("song.mp3");
        fs::write(&src, b"x").unwrap();

        let d = descriptor(src.clone(), "AC/DC", "Back in Black?");
        ActionExecutor::new(&cfg).place(&d).unwrap();

        let placed = cfg
            .destination_root
            .join("AC_DC")
            .join("Back in Black_")
            .join("song.mp3");
        assert!(placed.exists());
        assert!(!src.exists());
    }

    #[test]
    fn copy_mode_placement_leaves_the_source() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), false, true);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let src = cfg.source_root.join("song.mp3");
        fs::write(&src, b"x").unwrap();

        let d = descriptor(src.clone(), "Artist", "Album");
        ActionExecutor::new(&cfg).place(&d).unwrap();

        assert!(src.exists());
        assert!(cfg
            .destination_root
            .join("Artist")
            .join("Album")
            .join("song.mp3")
            .exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let tmp = tempdir().unwrap();
        let cfg = config(tmp.path(), true, false);
        fs::create_dir_all(&cfg.source_root).unwrap();
        let src = cfg.source_root.join("song.mp3");
        fs::write(&src, b"x").unwrap();

        let exec = ActionExecutor::new(&cfg);
        exec.apply(&ActionLogEntry::new(
            src.clone(),
            ActionKind::SendToReview,
            ReasonCode::MissingTags,
        ))
        .unwrap();
        exec.place(&descriptor(src.clone(), "Artist", "Album"))
            .unwrap();

        assert!(src.exists());
        assert!(!cfg.review_root.exists());
        assert!(!cfg.destination_root.exists());
    }

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_component("a<b>c:d"), "a_b_c_d");
        assert_eq!(sanitize_component("  trailing. "), "trailing");
        assert_eq!(sanitize_component("***"), "___");
        assert_eq!(sanitize_component(""), "_");
    }
}
