use std::borrow::Cow;

use lofty::picture::Picture;

/// Embedded artwork as stored in the file (still encoded, e.g. PNG/JPEG).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub data: Vec<u8>,
    pub mime_type: Option<String>,
}

impl Cover {
    pub(super) fn from_picture(picture: &Picture) -> Option<Self> {
        if picture.data().is_empty() {
            return None;
        }
        Some(Self {
            data: picture.data().to_vec(),
            mime_type: picture.mime_type().map(|m| m.as_str().to_string()),
        })
    }

    /// Short human-readable description, e.g. `image/png, 12.3 KiB`.
    pub fn describe(&self) -> String {
        let kib = self.data.len() as f64 / 1024.0;
        match self.mime_type.as_deref() {
            Some(mime) => format!("{mime}, {kib:.1} KiB"),
            None => format!("{kib:.1} KiB"),
        }
    }
}

/// Text fields and artwork read from a track's tags.
///
/// Text fields are empty when unknown. This is raw tag data: display
/// fallbacks (file name, "Unknown") are applied by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: Option<Cover>,
}

impl TrackMetadata {
    pub(super) fn set_text(
        &mut self,
        title: Option<Cow<'_, str>>,
        artist: Option<Cow<'_, str>>,
        album: Option<Cow<'_, str>>,
    ) {
        self.title = clean(title);
        self.artist = clean(artist);
        self.album = clean(album);
    }
}

fn clean(value: Option<Cow<'_, str>>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
