use serde::Serialize;
use std::path::PathBuf;

/// Coarse quality bucket deciding which signal tuple applies when two copies
/// of the same track are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatClass {
    Uncompressed,
    LosslessCompressed,
    LossyCompressed,
    Unknown,
}

impl FormatClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uncompressed => "uncompressed",
            Self::LosslessCompressed => "lossless",
            Self::LossyCompressed => "lossy",
            Self::Unknown => "unknown",
        }
    }
}

/// Immutable snapshot of one file's extracted facts. Never mutated after
/// extraction; every ranking transition builds new state around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub path: PathBuf,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub format_class: FormatClass,
    pub container_priority: u32,
    /// Zero when the extractor could not compute a signal; comparison treats
    /// zero as the worst possible value rather than failing.
    pub bitrate_bps: u32,
    pub sample_rate_hz: u32,
    pub bit_depth_bits: u32,
    pub channels: u32,
    pub duration_secs: u64,
    pub file_size_bytes: u64,
    pub integrity_ok: bool,
}

impl TrackDescriptor {
    /// The normalized identity of the logical track this file encodes, or
    /// `None` when any of title/artist/album is missing or blank — such
    /// files are never grouped and always go to review.
    pub fn track_key(&self) -> Option<TrackKey> {
        let title = normalize(self.title.as_deref()?);
        let artist = normalize(self.artist.as_deref()?);
        let album = normalize(self.album.as_deref()?);
        if title.is_empty() || artist.is_empty() || album.is_empty() {
            return None;
        }
        Some(TrackKey { title, artist, album })
    }
}

/// Grouping key for "the same song in different files". Normalization:
/// Unicode lowercase, outer whitespace trimmed, inner whitespace runs
/// collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub title: String,
    pub artist: String,
    pub album: String,
}

fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    out
}
