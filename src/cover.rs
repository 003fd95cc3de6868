//! Cover art sourcing and embedding.
//!
//! A cover is resolved to a local file path first, either through a
//! MusicBrainz release search plus a Cover Art Archive download, or from a
//! user-supplied local image. Only after a confirmation step are the bytes
//! embedded, unchanged, into every file of the batch.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::prompt;
use crate::tags::{CanonicalTag, TrackHandle};

/// Accepted local image extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".bmp", ".gif"];

#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("{0}")]
    Http(String),
    #[error("No release found for \"{artist}\" / \"{album}\"")]
    NoRelease { artist: String, album: String },
    #[error("No cover image published for release {0}")]
    NoImage(String),
    #[error("Unsupported image format \"{0}\" (use jpg/jpeg/png/bmp/gif)")]
    UnsupportedImage(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Io(String),
}

const DEFAULT_MUSICBRAINZ_URL: &str = "https://musicbrainz.org/ws/2";
const DEFAULT_COVERART_URL: &str = "https://coverartarchive.org";

const USER_AGENT: &str = concat!("tagfix/", env!("CARGO_PKG_VERSION"));

/// MusicBrainz endpoint, overridable for mirrors.
fn musicbrainz_endpoint() -> String {
    std::env::var("TAGFIX_MUSICBRAINZ_URL").unwrap_or_else(|_| DEFAULT_MUSICBRAINZ_URL.to_string())
}

/// Cover Art Archive endpoint, overridable for mirrors.
fn coverart_endpoint() -> String {
    std::env::var("TAGFIX_COVERART_URL").unwrap_or_else(|_| DEFAULT_COVERART_URL.to_string())
}

#[derive(Deserialize)]
struct ReleaseSearchResponse {
    releases: Option<Vec<Release>>,
}

#[derive(Deserialize)]
struct Release {
    id: String,
}

/// Search MusicBrainz for a release and download its front cover into a
/// temp file, returning the path.
pub fn fetch_cover_online(artist: &str, album: &str) -> Result<PathBuf, CoverError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CoverError::Http(format!("Failed to build HTTP client: {e}")))?;

    // MusicBrainz etiquette: stay under one request per second.
    std::thread::sleep(Duration::from_millis(1100));

    let query = format!("artist:{artist} AND release:{album}");
    let response = client
        .get(format!("{}/release/", musicbrainz_endpoint()))
        .query(&[
            ("query", query.as_str()),
            ("limit", "1"),
            ("fmt", "json"),
        ])
        .send()
        .map_err(|e| CoverError::Http(format!("MusicBrainz request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(CoverError::Http(format!(
            "MusicBrainz returned HTTP {}",
            response.status()
        )));
    }

    let parsed: ReleaseSearchResponse = response
        .json()
        .map_err(|e| CoverError::Http(format!("Malformed MusicBrainz response: {e}")))?;
    let release = parsed
        .releases
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| CoverError::NoRelease {
            artist: artist.to_string(),
            album: album.to_string(),
        })?;

    let image = client
        .get(format!("{}/release/{}/front", coverart_endpoint(), release.id))
        .send()
        .map_err(|e| CoverError::Http(format!("Cover Art Archive request failed: {e}")))?;

    if image.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(CoverError::NoImage(release.id));
    }
    if !image.status().is_success() {
        return Err(CoverError::Http(format!(
            "Cover Art Archive returned HTTP {}",
            image.status()
        )));
    }

    let bytes = image
        .bytes()
        .map_err(|e| CoverError::Http(format!("Failed to download cover: {e}")))?;

    let mut temp = tempfile::Builder::new()
        .prefix("tagfix-cover-")
        .suffix(".jpg")
        .tempfile()
        .map_err(|e| CoverError::Io(format!("Failed to create temp file: {e}")))?;
    temp.write_all(&bytes)
        .map_err(|e| CoverError::Io(format!("Failed to write temp file: {e}")))?;
    let (_, path) = temp
        .keep()
        .map_err(|e| CoverError::Io(format!("Failed to keep temp file: {e}")))?;

    Ok(path)
}

/// Check a user-supplied image path: it must exist and carry one of the
/// accepted extensions.
pub fn validate_local_image(input: &str) -> Result<PathBuf, CoverError> {
    let path = PathBuf::from(input.trim());
    if !path.is_file() {
        return Err(CoverError::NotFound(path.display().to_string()));
    }
    let ext = crate::tags::extension_of(&path).unwrap_or_default();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoverError::UnsupportedImage(ext));
    }
    Ok(path)
}

/// Textual preview plus a use/skip confirmation. Nothing is embedded until
/// this returns `true`.
pub fn confirm_cover(path: &Path) -> io::Result<bool> {
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    eprintln!("\nCover file: {}", path.display());
    eprintln!("Size: {} KB", size / 1024);
    loop {
        let input = prompt::prompt_line("Use this cover? [y]es / [s]kip: ")?;
        match input.to_lowercase().as_str() {
            "y" => return Ok(true),
            "s" => return Ok(false),
            _ => {}
        }
    }
}

/// Artist and album of the first readable file, used to seed the online
/// search.
pub fn detect_artist_album(files: &[PathBuf]) -> (String, String) {
    for path in files {
        if let Ok(handle) = TrackHandle::load(path) {
            let artist = handle.get(CanonicalTag::Artist).unwrap_or_default();
            let album = handle.get(CanonicalTag::Album).unwrap_or_default();
            return (artist, album);
        }
    }
    (String::new(), String::new())
}

/// Embed the image at `image_path` into every file, replacing any existing
/// pictures. Returns (embedded, failed).
pub fn embed_cover(files: &[PathBuf], image_path: &Path) -> (usize, usize) {
    let data = match std::fs::read(image_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", image_path.display());
            return (0, files.len());
        }
    };

    let mut embedded = 0;
    let mut failed = 0;

    for path in files {
        let mut handle = match TrackHandle::load(path) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("  SKIP {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };
        if !handle.set_cover(data.clone()) {
            failed += 1;
            continue;
        }
        match handle.save() {
            Ok(()) => embedded += 1,
            Err(e) => {
                eprintln!("  FAIL {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    (embedded, failed)
}

/// The interactive cover flow: pick a source, preview, confirm, embed.
pub fn process_album_cover(files: &[PathBuf]) -> io::Result<()> {
    if files.is_empty() {
        eprintln!("No audio files found for cover embedding.");
        return Ok(());
    }

    let (artist, album) = detect_artist_album(files);
    eprintln!("\nAlbum detected: {album}");
    eprintln!("Artist detected: {artist}");
    eprintln!("\nChoose album cover source:");
    eprintln!("[1] Search online (MusicBrainz)");
    eprintln!("[2] Provide local image file");

    let choice = loop {
        let input = prompt::prompt_line("Your choice [1/2]: ")?;
        match input.as_str() {
            "1" | "2" => break input,
            _ => {}
        }
    };

    let cover_path = if choice == "1" {
        eprintln!("Searching online for album cover...");
        match fetch_cover_online(&artist, &album) {
            Ok(path) => Some(path),
            Err(e) => {
                eprintln!("Online search failed ({e}). Switching to local image.");
                None
            }
        }
    } else {
        None
    };

    let cover_path = match cover_path {
        Some(path) => path,
        None => loop {
            let input = prompt::prompt_line("Enter local image path: ")?;
            match validate_local_image(&input) {
                Ok(path) => break path,
                Err(e) => eprintln!("{e}"),
            }
        },
    };

    if !confirm_cover(&cover_path)? {
        eprintln!("Album cover embedding skipped.");
        return Ok(());
    }

    let (embedded, failed) = embed_cover(files, &cover_path);
    eprintln!("Album cover embedded into {embedded} file(s) ({failed} failed).");
    Ok(())
}
