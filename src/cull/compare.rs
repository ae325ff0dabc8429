use std::cmp::Ordering;

use crate::cull::descriptor::{FormatClass, TrackDescriptor};

/// Total-order quality comparison between two copies of the same logical
/// track in the same format class. `Greater` means `a` is the better copy.
///
/// Order of decision: integrity, then container priority (lower preferred),
/// then the class-specific signal tuple, all higher-wins. A full tie is
/// `Equal`; the engine keeps whichever copy it saw first.
pub fn compare(a: &TrackDescriptor, b: &TrackDescriptor) -> Ordering {
    debug_assert_eq!(a.format_class, b.format_class);

    match (a.integrity_ok, b.integrity_ok) {
        (false, false) => return Ordering::Equal,
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        (true, true) => {}
    }

    // Reversed: a *lower* container priority is the preferred one.
    b.container_priority
        .cmp(&a.container_priority)
        .then_with(|| signal_tuple(a).cmp(&signal_tuple(b)))
}

/// The lexicographic signal tuple for a class. Lossless and uncompressed
/// audio is judged on resolution, lossy on bitrate; missing signals are
/// zero and therefore lose every comparison they participate in.
fn signal_tuple(d: &TrackDescriptor) -> (u32, u32, u32, u64) {
    match d.format_class {
        FormatClass::Uncompressed | FormatClass::LosslessCompressed => {
            (d.bit_depth_bits, d.sample_rate_hz, d.channels, d.duration_secs)
        }
        FormatClass::LossyCompressed | FormatClass::Unknown => {
            (d.bitrate_bps, d.sample_rate_hz, d.channels, d.duration_secs)
        }
    }
}
