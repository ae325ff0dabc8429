//! Builds minimal but valid PCM WAV files carrying RIFF INFO tags, so the
//! end-to-end tests can exercise real extraction without fixture binaries.

/// RIFF chunk with even-length padding.
fn chunk(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(id);
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    if body.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn info_value(id: &[u8; 4], text: &str) -> Vec<u8> {
    let mut body = text.as_bytes().to_vec();
    body.push(0);
    chunk(id, &body)
}

pub fn tagged_wav(sample_rate: u32, bits: u16, title: &str, artist: &str, album: &str) -> Vec<u8> {
    let channels: u16 = 2;
    let block_align = channels * bits / 8;
    let byte_rate = sample_rate * u32::from(block_align);

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&channels.to_le_bytes());
    fmt.extend_from_slice(&sample_rate.to_le_bytes());
    fmt.extend_from_slice(&byte_rate.to_le_bytes());
    fmt.extend_from_slice(&block_align.to_le_bytes());
    fmt.extend_from_slice(&bits.to_le_bytes());

    let data = vec![0u8; usize::from(block_align) * 100];

    let mut info = Vec::new();
    info.extend_from_slice(b"INFO");
    info.extend_from_slice(&info_value(b"INAM", title));
    info.extend_from_slice(&info_value(b"IART", artist));
    info.extend_from_slice(&info_value(b"IPRD", album));

    let mut riff_body = Vec::new();
    riff_body.extend_from_slice(b"WAVE");
    riff_body.extend_from_slice(&chunk(b"fmt ", &fmt));
    riff_body.extend_from_slice(&chunk(b"data", &data));
    riff_body.extend_from_slice(&chunk(b"LIST", &info));

    chunk(b"RIFF", &riff_body)
}
