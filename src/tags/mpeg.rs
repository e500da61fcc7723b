//! MPEG strategy: ID3v2 text frames plus the first attached picture (`APIC`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::id3::v2::{Frame, Id3v2Tag};
use lofty::mpeg::MpegFile;
use lofty::tag::Accessor;

use super::model::{Cover, TrackMetadata};

pub(super) fn extract(path: &Path) -> TrackMetadata {
    let mut meta = TrackMetadata::default();

    let Some(mpeg) = read(path) else {
        return meta;
    };
    let Some(tag) = mpeg.id3v2() else {
        debug!("{}: no ID3v2 tag", path.display());
        return meta;
    };

    meta.set_text(tag.title(), tag.artist(), tag.album());
    meta.cover = first_attached_picture(tag);
    meta
}

fn read(path: &Path) -> Option<MpegFile> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("{}: cannot open for tag read: {e}", path.display());
            return None;
        }
    };
    let mut reader = BufReader::new(file);
    match MpegFile::read_from(&mut reader, ParseOptions::new().read_properties(false)) {
        Ok(mpeg) => Some(mpeg),
        Err(e) => {
            debug!("{}: not a readable MPEG file: {e}", path.display());
            None
        }
    }
}

fn first_attached_picture(tag: &Id3v2Tag) -> Option<Cover> {
    tag.into_iter()
        .find_map(|frame| match frame {
            Frame::Picture(apic) => Some(apic),
            _ => None,
        })
        .and_then(|apic| Cover::from_picture(&apic.picture))
}
