use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use std::fs;
use std::path::Path;

use crate::cull::descriptor::{FormatClass, TrackDescriptor};
use crate::cull::priority::PriorityTable;
use crate::error::ExtractionError;

/// Turns a file path into an immutable `TrackDescriptor`, classifying the
/// container once so everything downstream is format-agnostic. The parse
/// itself doubles as the integrity check: a stream lofty cannot read maps
/// to `ExtractionError::Corrupt` and never enters ranking.
#[derive(Debug)]
pub struct Extractor {
    table: PriorityTable,
}

impl Extractor {
    pub fn new(table: PriorityTable) -> Self {
        Self { table }
    }

    pub fn extract(&self, path: &Path) -> Result<TrackDescriptor, ExtractionError> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let (format_class, container_priority) = self.table.classify(ext);
        if format_class == FormatClass::Unknown {
            return Err(ExtractionError::Unsupported(ext.to_string()));
        }

        let meta =
            fs::metadata(path).map_err(|err| ExtractionError::Io(err.to_string()))?;

        let tagged = lofty::read_from_path(path)
            .map_err(|err| ExtractionError::Corrupt(err.to_string()))?;

        let props = tagged.properties();
        let mut title = None;
        let mut artist = None;
        let mut album = None;
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            title = non_blank(tag.get_string(&ItemKey::TrackTitle));
            artist = non_blank(tag.get_string(&ItemKey::TrackArtist));
            album = non_blank(tag.get_string(&ItemKey::AlbumTitle));
        }

        Ok(TrackDescriptor {
            path: path.to_path_buf(),
            title,
            artist,
            album,
            format_class,
            container_priority,
            // lofty reports kbps; the comparator works in bps.
            bitrate_bps: props.audio_bitrate().unwrap_or(0).saturating_mul(1000),
            sample_rate_hz: props.sample_rate().unwrap_or(0),
            bit_depth_bits: u32::from(props.bit_depth().unwrap_or(0)),
            channels: u32::from(props.channels().unwrap_or(0)),
            duration_secs: props.duration().as_secs(),
            file_size_bytes: meta.len(),
            integrity_ok: true,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}
