//! Core tag translation module using `lofty`.
//!
//! One canonical tag vocabulary is projected onto the native metadata
//! structures of each supported container: ID3v2 frames for MP3 and WAV,
//! `ilst` atoms for M4A, and Vorbis Comments for FLAC/OGG/Opus. All
//! functions are synchronous and never panic on malformed input: reads
//! degrade to `None`, writes report `false`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use lofty::config::{ParseOptions, ParsingMode, WriteOptions};
use lofty::file::AudioFile;
use lofty::flac::FlacFile;
use lofty::id3::v2::{CommentFrame, Frame, FrameId, Id3v2Tag, TextInformationFrame};
use lofty::iff::wav::WavFile;
use lofty::mp4::{Atom, AtomData, AtomIdent, DataType, Ilst, Mp4File};
use lofty::mpeg::MpegFile;
use lofty::ogg::{OggPictureStorage, OpusFile, VorbisComments, VorbisFile};
use lofty::picture::{MimeType, Picture, PictureInformation, PictureType};
use lofty::tag::TagExt;
use lofty::TextEncoding;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// lofty open/read/write failures.
    #[error("{0}")]
    Io(String),
    /// Extension outside the supported set.
    #[error("unsupported extension \"{0}\"")]
    UnsupportedExtension(String),
    /// Extensions we recognize but have no tag backend for (ASF/WMA).
    #[error("{0}")]
    UnsupportedContainer(String),
    /// Numeric coercion failures for MP4 track/disc numbers.
    #[error("{0}")]
    InvalidNumber(String),
}

// ---------------------------------------------------------------------------
// Canonical tags
// ---------------------------------------------------------------------------

/// The editable tag vocabulary, independent of container format.
///
/// Cover art is deliberately not part of this enum; it goes through the
/// dedicated picture methods on [`TrackHandle`] instead of the scalar path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalTag {
    Artist,
    AlbumArtist,
    Album,
    Title,
    Genre,
    Date,
    TrackNumber,
    DiscNumber,
    Comment,
}

impl CanonicalTag {
    /// All canonical tags, in menu order.
    pub const ALL: [CanonicalTag; 9] = [
        CanonicalTag::Artist,
        CanonicalTag::AlbumArtist,
        CanonicalTag::Album,
        CanonicalTag::Title,
        CanonicalTag::Genre,
        CanonicalTag::Date,
        CanonicalTag::TrackNumber,
        CanonicalTag::DiscNumber,
        CanonicalTag::Comment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalTag::Artist => "artist",
            CanonicalTag::AlbumArtist => "albumartist",
            CanonicalTag::Album => "album",
            CanonicalTag::Title => "title",
            CanonicalTag::Genre => "genre",
            CanonicalTag::Date => "date",
            CanonicalTag::TrackNumber => "tracknumber",
            CanonicalTag::DiscNumber => "discnumber",
            CanonicalTag::Comment => "comment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Tags that usually hold one value for a whole directory and are
    /// offered a "global" edit in the setup menu.
    pub fn is_global(self) -> bool {
        matches!(
            self,
            CanonicalTag::Artist
                | CanonicalTag::AlbumArtist
                | CanonicalTag::Album
                | CanonicalTag::Date
                | CanonicalTag::Genre
        )
    }

    /// ID3v2 frame ID used for MP3 and WAV.
    fn id3_frame(self) -> FrameId<'static> {
        FrameId::Valid(Cow::Borrowed(match self {
            CanonicalTag::Artist => "TPE1",
            CanonicalTag::AlbumArtist => "TPE2",
            CanonicalTag::Album => "TALB",
            CanonicalTag::Title => "TIT2",
            CanonicalTag::Genre => "TCON",
            CanonicalTag::Date => "TDRC",
            CanonicalTag::TrackNumber => "TRCK",
            CanonicalTag::DiscNumber => "TPOS",
            CanonicalTag::Comment => "COMM",
        }))
    }

    /// MP4 `ilst` atom identifier.
    fn mp4_fourcc(self) -> [u8; 4] {
        match self {
            CanonicalTag::Artist => *b"\xa9ART",
            CanonicalTag::AlbumArtist => *b"aART",
            CanonicalTag::Album => *b"\xa9alb",
            CanonicalTag::Title => *b"\xa9nam",
            CanonicalTag::Genre => *b"\xa9gen",
            CanonicalTag::Date => *b"\xa9day",
            CanonicalTag::TrackNumber => *b"trkn",
            CanonicalTag::DiscNumber => *b"disk",
            CanonicalTag::Comment => *b"\xa9cmt",
        }
    }

    /// Tags stored as (number, total) integer pairs under MP4.
    fn is_mp4_pair(self) -> bool {
        matches!(self, CanonicalTag::TrackNumber | CanonicalTag::DiscNumber)
    }
}

// ---------------------------------------------------------------------------
// Container kinds
// ---------------------------------------------------------------------------

/// Extensions this tool will pick up during a scan.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &[".flac", ".mp3", ".m4a", ".ogg", ".opus", ".wma", ".wav"];

/// A class of audio container sharing one metadata structure style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// ID3v2 frames (MP3).
    Id3Like,
    /// `ilst` atoms with typed multi-value entries (M4A).
    Mp4,
    /// Free-form key/value comment maps (FLAC, OGG, Opus, WMA).
    VorbisLike,
    /// RIFF containers tagged through an embedded ID3v2 chunk (WAV).
    FreeTextWav,
}

impl ContainerKind {
    /// Classify a lowercase file extension (including the leading dot).
    ///
    /// Returns `None` for anything outside the supported set; callers must
    /// treat that as "skip this file", not as an error.
    pub fn classify(extension: &str) -> Option<ContainerKind> {
        match extension {
            ".mp3" => Some(ContainerKind::Id3Like),
            ".m4a" => Some(ContainerKind::Mp4),
            ".flac" | ".ogg" | ".opus" | ".wma" => Some(ContainerKind::VorbisLike),
            ".wav" => Some(ContainerKind::FreeTextWav),
            _ => None,
        }
    }

    /// Classify a path by its extension.
    pub fn for_path(path: &Path) -> Option<ContainerKind> {
        Self::classify(&extension_of(path)?)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Id3Like => "id3",
            ContainerKind::Mp4 => "mp4",
            ContainerKind::VorbisLike => "vorbis_comment",
            ContainerKind::FreeTextWav => "wav",
        }
    }
}

/// Lowercase extension with leading dot, e.g. `".mp3"`.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

// ---------------------------------------------------------------------------
// Track handles
// ---------------------------------------------------------------------------

/// The parsed representation of one file's metadata. The variant is fixed
/// at load time by the extension, never re-sniffed afterwards.
enum ContainerFile {
    Mpeg(MpegFile),
    Wav(WavFile),
    Mp4(Mp4File),
    Flac(FlacFile),
    Opus(OpusFile),
    Vorbis(VorbisFile),
}

/// An open audio file's metadata, tied to one load/save cycle.
///
/// Changes made through `set`/`set_cover` live in memory until [`save`]
/// is called; a dropped handle loses them.
///
/// [`save`]: TrackHandle::save
pub struct TrackHandle {
    path: PathBuf,
    kind: ContainerKind,
    file: ContainerFile,
}

/// Build `ParseOptions` for metadata-only reads.
///
/// Cover art must be read even when it is not displayed, so existing
/// pictures survive a rewrite of the tag.
fn parse_options() -> ParseOptions {
    ParseOptions::new()
        .read_properties(false)
        .read_cover_art(true)
        .parsing_mode(ParsingMode::BestAttempt)
}

impl TrackHandle {
    /// Open and parse a file's metadata structure.
    ///
    /// Failures here are non-fatal to a batch: the caller reports the file
    /// and moves on.
    pub fn load(path: &Path) -> Result<TrackHandle, TagError> {
        let ext = extension_of(path)
            .ok_or_else(|| TagError::UnsupportedExtension(path.display().to_string()))?;
        let kind = ContainerKind::classify(&ext)
            .ok_or_else(|| TagError::UnsupportedExtension(ext.clone()))?;

        let mut file = File::open(path)
            .map_err(|e| TagError::Io(format!("Failed to open {}: {e}", path.display())))?;
        let opts = parse_options();
        let parse = |e: lofty::error::LoftyError| {
            TagError::Io(format!("Failed to parse {}: {e}", path.display()))
        };

        let file = match ext.as_str() {
            ".mp3" => ContainerFile::Mpeg(MpegFile::read_from(&mut file, opts).map_err(parse)?),
            ".wav" => ContainerFile::Wav(WavFile::read_from(&mut file, opts).map_err(parse)?),
            ".m4a" => ContainerFile::Mp4(Mp4File::read_from(&mut file, opts).map_err(parse)?),
            ".flac" => ContainerFile::Flac(FlacFile::read_from(&mut file, opts).map_err(parse)?),
            ".ogg" => ContainerFile::Vorbis(VorbisFile::read_from(&mut file, opts).map_err(parse)?),
            ".opus" => ContainerFile::Opus(OpusFile::read_from(&mut file, opts).map_err(parse)?),
            // WMA classifies as a free-form container, but no maintained ASF
            // tag backend exists; surface it as a per-file load failure.
            ".wma" => {
                return Err(TagError::UnsupportedContainer(format!(
                    "No ASF tag backend available for {}",
                    path.display()
                )));
            }
            _ => return Err(TagError::UnsupportedExtension(ext)),
        };

        Ok(TrackHandle {
            path: path.to_path_buf(),
            kind,
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Whether the file has any tag structure at all. Reads never flip this.
    pub fn has_tags(&self) -> bool {
        match &self.file {
            ContainerFile::Mpeg(f) => f.id3v2().is_some(),
            ContainerFile::Wav(f) => f.id3v2().is_some() || f.riff_info().is_some(),
            ContainerFile::Mp4(f) => f.ilst().is_some_and(|ilst| !ilst.is_empty()),
            ContainerFile::Flac(f) => f.vorbis_comments().is_some() || !f.pictures().is_empty(),
            // OGG streams always carry a comment header, possibly empty.
            ContainerFile::Opus(_) | ContainerFile::Vorbis(_) => true,
        }
    }

    /// Read a canonical tag as text.
    ///
    /// Best-effort by contract: a missing container, a missing native key,
    /// or a frame of an unexpected shape all come back as `None`. Reading
    /// never creates a tag container.
    pub fn get(&self, tag: CanonicalTag) -> Option<String> {
        match &self.file {
            ContainerFile::Mpeg(f) => id3_text(f.id3v2()?, tag),
            ContainerFile::Wav(f) => id3_text(f.id3v2()?, tag),
            ContainerFile::Mp4(f) => ilst_text(f.ilst()?, tag),
            ContainerFile::Flac(f) => vorbis_text(f.vorbis_comments()?, tag),
            ContainerFile::Opus(f) => vorbis_text(f.vorbis_comments(), tag),
            ContainerFile::Vorbis(f) => vorbis_text(f.vorbis_comments(), tag),
        }
    }

    /// Write a canonical tag, overwriting any existing value(s).
    ///
    /// Returns `false` (after logging a warning naming the tag) instead of
    /// propagating, so one bad field never aborts the rest of a file.
    pub fn set(&mut self, tag: CanonicalTag, value: &str) -> bool {
        match self.try_set(tag, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "could not set {} on {}: {e}",
                    tag.name(),
                    self.path.display()
                );
                false
            }
        }
    }

    fn try_set(&mut self, tag: CanonicalTag, value: &str) -> Result<(), TagError> {
        match &mut self.file {
            ContainerFile::Mpeg(f) => {
                if f.id3v2().is_none() {
                    f.set_id3v2(Id3v2Tag::new());
                }
                let id3 = f
                    .id3v2_mut()
                    .ok_or_else(|| TagError::Io("ID3v2 tag vanished after insert".to_string()))?;
                set_id3_text(id3, tag, value);
                Ok(())
            }
            ContainerFile::Wav(f) => {
                if f.id3v2().is_none() {
                    f.set_id3v2(Id3v2Tag::new());
                }
                let id3 = f
                    .id3v2_mut()
                    .ok_or_else(|| TagError::Io("ID3v2 tag vanished after insert".to_string()))?;
                set_id3_text(id3, tag, value);
                Ok(())
            }
            ContainerFile::Mp4(f) => {
                if f.ilst().is_none() {
                    f.set_ilst(Ilst::new());
                }
                let ilst = f
                    .ilst_mut()
                    .ok_or_else(|| TagError::Io("ilst atom vanished after insert".to_string()))?;
                set_ilst_value(ilst, tag, value)
            }
            ContainerFile::Flac(f) => {
                if f.vorbis_comments().is_none() {
                    f.set_vorbis_comments(VorbisComments::default());
                }
                let vc = f.vorbis_comments_mut().ok_or_else(|| {
                    TagError::Io("Vorbis comments vanished after insert".to_string())
                })?;
                vc.insert(tag.name().to_string(), value.to_string());
                Ok(())
            }
            ContainerFile::Opus(f) => {
                f.vorbis_comments_mut()
                    .insert(tag.name().to_string(), value.to_string());
                Ok(())
            }
            ContainerFile::Vorbis(f) => {
                f.vorbis_comments_mut()
                    .insert(tag.name().to_string(), value.to_string());
                Ok(())
            }
        }
    }

    /// Metadata about the embedded cover art, if any. Never binary data.
    pub fn cover(&self) -> Option<CoverArtMeta> {
        match &self.file {
            ContainerFile::Mpeg(f) => id3_cover_meta(f.id3v2()?),
            ContainerFile::Wav(f) => id3_cover_meta(f.id3v2()?),
            ContainerFile::Mp4(f) => f.ilst()?.pictures()?.next().map(picture_meta),
            ContainerFile::Flac(f) => stored_cover_meta(f.pictures()),
            ContainerFile::Opus(f) => stored_cover_meta(f.vorbis_comments().pictures()),
            ContainerFile::Vorbis(f) => stored_cover_meta(f.vorbis_comments().pictures()),
        }
    }

    /// Embed `data` as the single front-cover picture.
    ///
    /// All existing pictures are cleared first; exactly one record remains,
    /// typed "front cover" with MIME `image/jpeg` and description "Cover".
    pub fn set_cover(&mut self, data: Vec<u8>) -> bool {
        match self.try_set_cover(data) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("could not embed cover on {}: {e}", self.path.display());
                false
            }
        }
    }

    fn try_set_cover(&mut self, data: Vec<u8>) -> Result<(), TagError> {
        let picture = front_cover_picture(data);

        match &mut self.file {
            ContainerFile::Mpeg(f) => {
                if f.id3v2().is_none() {
                    f.set_id3v2(Id3v2Tag::new());
                }
                let id3 = f
                    .id3v2_mut()
                    .ok_or_else(|| TagError::Io("ID3v2 tag vanished after insert".to_string()))?;
                id3.retain(|frame| !matches!(frame, Frame::Picture(_)));
                let _ = id3.insert_picture(picture);
            }
            ContainerFile::Wav(f) => {
                if f.id3v2().is_none() {
                    f.set_id3v2(Id3v2Tag::new());
                }
                let id3 = f
                    .id3v2_mut()
                    .ok_or_else(|| TagError::Io("ID3v2 tag vanished after insert".to_string()))?;
                id3.retain(|frame| !matches!(frame, Frame::Picture(_)));
                let _ = id3.insert_picture(picture);
            }
            ContainerFile::Mp4(f) => {
                if f.ilst().is_none() {
                    f.set_ilst(Ilst::new());
                }
                let ilst = f
                    .ilst_mut()
                    .ok_or_else(|| TagError::Io("ilst atom vanished after insert".to_string()))?;
                ilst.remove_pictures();
                ilst.insert_picture(picture);
            }
            ContainerFile::Flac(f) => {
                let info = PictureInformation::from_picture(&picture).unwrap_or_default();
                if let Some(vc) = f.vorbis_comments_mut() {
                    let _ = vc.remove_pictures();
                }
                let _ = f.remove_pictures();
                f.insert_picture(picture, Some(info))
                    .map_err(|e| TagError::Io(format!("Failed to store picture: {e}")))?;
            }
            ContainerFile::Opus(f) => {
                let info = PictureInformation::from_picture(&picture).unwrap_or_default();
                let vc = f.vorbis_comments_mut();
                let _ = vc.remove_pictures();
                vc.insert_picture(picture, Some(info))
                    .map_err(|e| TagError::Io(format!("Failed to store picture: {e}")))?;
            }
            ContainerFile::Vorbis(f) => {
                let info = PictureInformation::from_picture(&picture).unwrap_or_default();
                let vc = f.vorbis_comments_mut();
                let _ = vc.remove_pictures();
                vc.insert_picture(picture, Some(info))
                    .map_err(|e| TagError::Io(format!("Failed to store picture: {e}")))?;
            }
        }

        Ok(())
    }

    /// Persist every tag layer back into the file on disk.
    ///
    /// This is the one fatal-capable operation on a handle; batch loops
    /// report the error and continue with the next file.
    pub fn save(&self) -> Result<(), TagError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|e| {
                TagError::Io(format!(
                    "Failed to open {} for writing: {e}",
                    self.path.display()
                ))
            })?;

        let result = match &self.file {
            ContainerFile::Mpeg(f) => f.save_to(&mut file, WriteOptions::default()),
            ContainerFile::Wav(f) => f.save_to(&mut file, WriteOptions::default()),
            ContainerFile::Mp4(f) => f.save_to(&mut file, WriteOptions::default()),
            ContainerFile::Flac(f) => f.save_to(&mut file, WriteOptions::default()),
            ContainerFile::Opus(f) => f.save_to(&mut file, WriteOptions::default()),
            ContainerFile::Vorbis(f) => f.save_to(&mut file, WriteOptions::default()),
        };

        result.map_err(|e| TagError::Io(format!("Failed to save {}: {e}", self.path.display())))
    }
}

// ---------------------------------------------------------------------------
// Per-container helpers
// ---------------------------------------------------------------------------

const APIC_ID: FrameId<'static> = FrameId::Valid(Cow::Borrowed("APIC"));

/// First text element of the native ID3v2 frame for `tag`.
fn id3_text(id3: &Id3v2Tag, tag: CanonicalTag) -> Option<String> {
    match id3.get(&tag.id3_frame())? {
        // v2.4 joins multiple values with NUL; only the first is surfaced.
        Frame::Text(TextInformationFrame { value, .. }) => {
            value.split('\0').next().map(str::to_string)
        }
        Frame::Comment(comment) => Some(comment.content.to_string()),
        // TDRC parses into a dedicated timestamp frame on re-read.
        Frame::Timestamp(frame) => Some(frame.timestamp.to_string()),
        _ => None,
    }
}

/// Overwrite the native ID3v2 frame for `tag`.
///
/// COMM needs a language marker and a description by frame shape; both are
/// fixed here ("eng", empty) rather than exposed to callers.
fn set_id3_text(id3: &mut Id3v2Tag, tag: CanonicalTag, value: &str) {
    let id = tag.id3_frame();
    let frame = if tag == CanonicalTag::Comment {
        Frame::Comment(CommentFrame::new(
            TextEncoding::UTF8,
            *b"eng",
            String::new(),
            value.to_string(),
        ))
    } else {
        Frame::Text(TextInformationFrame::new(
            id.clone(),
            TextEncoding::UTF8,
            value.to_string(),
        ))
    };

    // A re-read date may live in a timestamp frame, which a plain text
    // insert would not displace; drop every frame under the ID first.
    let _ = id3.remove(&id);
    let _ = id3.insert(frame);
}

/// Read a canonical tag from an `ilst` atom list.
fn ilst_text(ilst: &Ilst, tag: CanonicalTag) -> Option<String> {
    if tag.is_mp4_pair() {
        return ilst_pair_number(ilst, tag.mp4_fourcc()).map(|n| n.to_string());
    }

    match ilst.get(&AtomIdent::Fourcc(tag.mp4_fourcc()))?.data().next()? {
        AtomData::UTF8(s) | AtomData::UTF16(s) => Some(s.clone()),
        _ => None,
    }
}

/// Number component of a `trkn`/`disk` style integer pair.
fn ilst_pair_number(ilst: &Ilst, fourcc: [u8; 4]) -> Option<u16> {
    let atom = ilst.get(&AtomIdent::Fourcc(fourcc))?;
    match atom.data().next() {
        Some(AtomData::Unknown {
            code: DataType::Reserved,
            data,
        }) if data.len() >= 4 => Some(u16::from_be_bytes([data[2], data[3]])),
        _ => None,
    }
}

/// Write a canonical tag into an `ilst` atom list.
///
/// Track and disc numbers are stored as a single (n, 0) pair; the total
/// component is never set by this tool. A failed integer parse leaves the
/// existing atom untouched.
fn set_ilst_value(ilst: &mut Ilst, tag: CanonicalTag, value: &str) -> Result<(), TagError> {
    let ident = AtomIdent::Fourcc(tag.mp4_fourcc());

    if tag.is_mp4_pair() {
        let n: u16 = value.trim().parse().map_err(|_| {
            TagError::InvalidNumber(format!(
                "{} must be a non-negative integer, got \"{value}\"",
                tag.name()
            ))
        })?;
        let number = n.to_be_bytes();
        let data = vec![0, 0, number[0], number[1], 0, 0];
        ilst.replace_atom(Atom::new(
            ident,
            AtomData::Unknown {
                code: DataType::Reserved,
                data,
            },
        ));
        return Ok(());
    }

    ilst.replace_atom(Atom::new(ident, AtomData::UTF8(value.to_string())));
    Ok(())
}

/// Read a canonical tag from a free-form comment map. Multi-valued keys
/// surface their first value.
fn vorbis_text(vc: &VorbisComments, tag: CanonicalTag) -> Option<String> {
    vc.get(tag.name()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Cover art
// ---------------------------------------------------------------------------

/// Metadata about embedded cover art (never contains binary data).
#[derive(Debug, Serialize)]
pub struct CoverArtMeta {
    pub format: String,
    pub size_bytes: usize,
}

/// Build the single picture record this tool embeds.
fn front_cover_picture(data: Vec<u8>) -> Picture {
    Picture::new_unchecked(
        PictureType::CoverFront,
        Some(MimeType::Jpeg),
        Some("Cover".to_string()),
        data,
    )
}

fn mime_name(mime: Option<&MimeType>) -> &'static str {
    match mime {
        Some(MimeType::Jpeg) => "jpeg",
        Some(MimeType::Png) => "png",
        Some(MimeType::Tiff) => "tiff",
        Some(MimeType::Bmp) => "bmp",
        Some(MimeType::Gif) => "gif",
        _ => "unknown",
    }
}

fn picture_meta(picture: &Picture) -> CoverArtMeta {
    CoverArtMeta {
        format: mime_name(picture.mime_type()).to_string(),
        size_bytes: picture.data().len(),
    }
}

/// First APIC frame in an ID3v2 tag.
fn id3_cover_meta(id3: &Id3v2Tag) -> Option<CoverArtMeta> {
    match id3.get(&APIC_ID)? {
        Frame::Picture(frame) => Some(picture_meta(&frame.picture)),
        _ => None,
    }
}

/// Front cover from an OGG-style picture store, falling back to the first
/// picture of any type.
fn stored_cover_meta(pictures: &[(Picture, PictureInformation)]) -> Option<CoverArtMeta> {
    pictures
        .iter()
        .find(|(p, _)| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
        .map(|(p, _)| picture_meta(p))
}

// ---------------------------------------------------------------------------
// Read reports
// ---------------------------------------------------------------------------

/// Result of reading a single file, shaped for JSON output.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FileReadResult {
    Ok {
        path: String,
        format: String,
        tags: BTreeMap<&'static str, Option<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cover_art: Option<CoverArtMeta>,
    },
    Error {
        path: String,
        error: String,
    },
}

/// Read the requested canonical tags (all of them by default) from one file.
pub fn read_report(
    path: &Path,
    fields: Option<&[CanonicalTag]>,
    include_cover_art: bool,
) -> FileReadResult {
    let path_str = path.display().to_string();

    let handle = match TrackHandle::load(path) {
        Ok(h) => h,
        Err(e) => {
            return FileReadResult::Error {
                path: path_str,
                error: e.to_string(),
            };
        }
    };

    let selected: &[CanonicalTag] = fields.unwrap_or(&CanonicalTag::ALL);
    let tags = selected
        .iter()
        .map(|&tag| (tag.name(), handle.get(tag)))
        .collect();

    FileReadResult::Ok {
        path: path_str,
        format: handle.kind().as_str().to_string(),
        tags,
        cover_art: if include_cover_art {
            handle.cover()
        } else {
            None
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
