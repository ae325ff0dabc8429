use anyhow::{Result, anyhow};
use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use crate::cull::descriptor::FormatClass;

/// Sentinel priority for containers the table does not know.
pub const UNKNOWN_PRIORITY: u32 = 999;

/// Which format class an extension belongs to. Fixed; only the priority
/// *within* a class band is configurable.
pub fn class_of(ext: &str) -> FormatClass {
    match ext {
        "wav" | "aiff" | "pcm" | "bwf" => FormatClass::Uncompressed,
        "flac" | "alac" | "mp4" | "ape" | "wv" | "tta" => FormatClass::LosslessCompressed,
        "mp3" | "aac" | "ogg" | "opus" | "m4a" | "wma" | "mpc" | "atrac" => {
            FormatClass::LossyCompressed
        }
        _ => FormatClass::Unknown,
    }
}

/// Each class owns a disjoint priority band, so a well-formed table can
/// never make two classes tie on priority.
pub fn band(class: FormatClass) -> RangeInclusive<u32> {
    match class {
        FormatClass::LosslessCompressed => 1..=9,
        FormatClass::Uncompressed => 10..=19,
        FormatClass::LossyCompressed => 20..=99,
        FormatClass::Unknown => UNKNOWN_PRIORITY..=UNKNOWN_PRIORITY,
    }
}

/// Preference ranking among containers, lower value preferred. Defaults keep
/// lossless-compressed ahead of uncompressed ahead of lossy, and within a
/// band follow common library practice (flac first, mp3 first among lossy).
#[derive(Debug, Clone)]
pub struct PriorityTable {
    priorities: HashMap<String, u32>,
}

impl Default for PriorityTable {
    fn default() -> Self {
        let defaults = [
            ("flac", 1),
            ("alac", 2),
            ("ape", 3),
            ("wv", 4),
            ("tta", 5),
            // An .mp4 in a music tree is almost always an ALAC rip.
            ("mp4", 6),
            ("wav", 10),
            ("aiff", 11),
            ("pcm", 12),
            ("bwf", 13),
            ("mp3", 20),
            ("aac", 21),
            ("ogg", 22),
            ("opus", 23),
            ("m4a", 24),
            ("wma", 25),
            ("mpc", 26),
            ("atrac", 27),
        ];
        Self {
            priorities: defaults
                .into_iter()
                .map(|(ext, p)| (ext.to_string(), p))
                .collect(),
        }
    }
}

impl PriorityTable {
    /// Build the table with user overrides layered on top of the defaults.
    /// An override must name a known extension and stay inside that
    /// extension's class band.
    pub fn with_overrides(overrides: &BTreeMap<String, u32>) -> Result<Self> {
        let mut table = Self::default();
        for (ext, priority) in overrides {
            let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
            let class = class_of(&ext);
            if class == FormatClass::Unknown {
                return Err(anyhow!("container priority override for unknown extension `{ext}`"));
            }
            let band = band(class);
            if !band.contains(priority) {
                return Err(anyhow!(
                    "priority {priority} for `{ext}` is outside the {} band {}..={}",
                    class.as_str(),
                    band.start(),
                    band.end()
                ));
            }
            table.priorities.insert(ext, *priority);
        }
        Ok(table)
    }

    /// Class and priority for an extension; unknown extensions get
    /// `(Unknown, UNKNOWN_PRIORITY)`.
    pub fn classify(&self, ext: &str) -> (FormatClass, u32) {
        let ext = ext.to_ascii_lowercase();
        let class = class_of(&ext);
        let priority = self
            .priorities
            .get(&ext)
            .copied()
            .unwrap_or(UNKNOWN_PRIORITY);
        (class, priority)
    }

    pub fn is_supported(&self, ext: &str) -> bool {
        class_of(&ext.to_ascii_lowercase()) != FormatClass::Unknown
    }
}
