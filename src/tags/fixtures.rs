//! Minimal hand-assembled MP3 and FLAC files for extraction tests.

pub(crate) const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

fn synchsafe(n: u32) -> [u8; 4] {
    [
        ((n >> 21) & 0x7f) as u8,
        ((n >> 14) & 0x7f) as u8,
        ((n >> 7) & 0x7f) as u8,
        (n & 0x7f) as u8,
    ]
}

fn id3v23_frame(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(10 + body.len());
    out.extend_from_slice(id);
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(body);
    out
}

fn id3v23_text(id: &[u8; 4], text: &str) -> Vec<u8> {
    let mut body = vec![0x00]; // ISO-8859-1
    body.extend_from_slice(text.as_bytes());
    id3v23_frame(id, &body)
}

fn id3v23_apic(mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = vec![0x00];
    body.extend_from_slice(mime.as_bytes());
    body.push(0);
    body.push(0x03); // front cover
    body.push(0); // empty description
    body.extend_from_slice(data);
    id3v23_frame(b"APIC", &body)
}

/// A few silent MPEG-1 Layer III frames (128 kbps, 44.1 kHz, 417 bytes each).
fn mpeg_frames() -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..3 {
        out.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        out.extend(std::iter::repeat_n(0u8, 413));
    }
    out
}

#[derive(Default)]
pub(crate) struct Mp3Fixture<'a> {
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
    pub cover: Option<(&'a str, &'a [u8])>,
    pub with_tag: bool,
}

impl Mp3Fixture<'_> {
    pub(crate) fn bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.with_tag {
            let mut frames = Vec::new();
            if let Some(t) = self.title {
                frames.extend(id3v23_text(b"TIT2", t));
            }
            if let Some(a) = self.artist {
                frames.extend(id3v23_text(b"TPE1", a));
            }
            if let Some(a) = self.album {
                frames.extend(id3v23_text(b"TALB", a));
            }
            if let Some((mime, data)) = self.cover {
                frames.extend(id3v23_apic(mime, data));
            }
            out.extend_from_slice(b"ID3");
            out.extend_from_slice(&[3, 0, 0]);
            out.extend_from_slice(&synchsafe(frames.len() as u32));
            out.extend(frames);
        }
        out.extend(mpeg_frames());
        out
    }
}

fn flac_block(block_type: u8, last: bool, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + body.len());
    out.push(if last { 0x80 | block_type } else { block_type });
    let len = body.len() as u32;
    out.extend_from_slice(&len.to_be_bytes()[1..]);
    out.extend_from_slice(body);
    out
}

fn flac_stream_info() -> Vec<u8> {
    let mut body = Vec::with_capacity(34);
    body.extend_from_slice(&4096u16.to_be_bytes());
    body.extend_from_slice(&4096u16.to_be_bytes());
    body.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    let sample_rate: u64 = 44_100;
    let channels_minus_one: u64 = 1;
    let bits_minus_one: u64 = 15;
    let total_samples: u64 = 44_100;
    let packed =
        (sample_rate << 44) | (channels_minus_one << 41) | (bits_minus_one << 36) | total_samples;
    body.extend_from_slice(&packed.to_be_bytes());
    body.extend_from_slice(&[0u8; 16]);
    body
}

fn flac_vorbis_comments(comments: &[(&str, &str)]) -> Vec<u8> {
    let vendor = b"cadence tests";
    let mut body = Vec::new();
    body.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    body.extend_from_slice(vendor);
    body.extend_from_slice(&(comments.len() as u32).to_le_bytes());
    for (key, value) in comments {
        let entry = format!("{key}={value}");
        body.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        body.extend_from_slice(entry.as_bytes());
    }
    body
}

fn flac_picture(mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(&3u32.to_be_bytes()); // front cover
    body.extend_from_slice(&(mime.len() as u32).to_be_bytes());
    body.extend_from_slice(mime.as_bytes());
    body.extend_from_slice(&0u32.to_be_bytes()); // description
    for v in [1u32, 1, 24, 0] {
        body.extend_from_slice(&v.to_be_bytes());
    }
    body.extend_from_slice(&(data.len() as u32).to_be_bytes());
    body.extend_from_slice(data);
    body
}

#[derive(Default)]
pub(crate) struct FlacFixture<'a> {
    pub comments: Option<&'a [(&'a str, &'a str)]>,
    pub picture: Option<(&'a str, &'a [u8])>,
}

impl FlacFixture<'_> {
    pub(crate) fn bytes(&self) -> Vec<u8> {
        let mut blocks: Vec<(u8, Vec<u8>)> = vec![(0, flac_stream_info())];
        if let Some(comments) = self.comments {
            blocks.push((4, flac_vorbis_comments(comments)));
        }
        if let Some((mime, data)) = self.picture {
            blocks.push((6, flac_picture(mime, data)));
        }

        let mut out = b"fLaC".to_vec();
        let last = blocks.len() - 1;
        for (i, (block_type, body)) in blocks.iter().enumerate() {
            out.extend(flac_block(*block_type, i == last, body));
        }
        out
    }
}
