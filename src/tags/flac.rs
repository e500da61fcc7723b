//! FLAC strategy: Vorbis comments for text, the stream's own picture list
//! (`METADATA_BLOCK_PICTURE`) for artwork. The two are read independently;
//! a file may carry pictures without any comment block.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use lofty::config::ParseOptions;
use lofty::file::AudioFile;
use lofty::flac::FlacFile;
use lofty::ogg::OggPictureStorage;
use lofty::tag::Accessor;

use super::model::{Cover, TrackMetadata};

pub(super) fn extract(path: &Path) -> TrackMetadata {
    let mut meta = TrackMetadata::default();

    let Some(flac) = read(path) else {
        return meta;
    };

    match flac.vorbis_comments() {
        Some(comments) => meta.set_text(comments.title(), comments.artist(), comments.album()),
        None => debug!("{}: no Vorbis comment block", path.display()),
    }

    meta.cover = flac
        .pictures()
        .first()
        .and_then(|(picture, _info)| Cover::from_picture(picture));
    meta
}

fn read(path: &Path) -> Option<FlacFile> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!("{}: cannot open for tag read: {e}", path.display());
            return None;
        }
    };
    let mut reader = BufReader::new(file);
    match FlacFile::read_from(&mut reader, ParseOptions::new().read_properties(false)) {
        Ok(flac) => Some(flac),
        Err(e) => {
            debug!("{}: not a readable FLAC file: {e}", path.display());
            None
        }
    }
}
