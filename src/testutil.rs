//! Shared test fixtures: minimal but well-formed container files, built
//! byte by byte so tests never depend on binary assets.

use std::fs;
use std::path::Path;

/// Minimal valid WAV file: 44-byte header plus one silent sample.
pub fn write_wav(path: &Path) {
    let data_size: u32 = 2;
    let file_size = 36 + data_size;
    let mut h = Vec::new();
    h.extend_from_slice(b"RIFF");
    h.extend_from_slice(&file_size.to_le_bytes());
    h.extend_from_slice(b"WAVE");
    h.extend_from_slice(b"fmt ");
    h.extend_from_slice(&16u32.to_le_bytes());
    h.extend_from_slice(&1u16.to_le_bytes()); // PCM
    h.extend_from_slice(&1u16.to_le_bytes()); // mono
    h.extend_from_slice(&44100u32.to_le_bytes());
    h.extend_from_slice(&88200u32.to_le_bytes());
    h.extend_from_slice(&2u16.to_le_bytes());
    h.extend_from_slice(&16u16.to_le_bytes());
    h.extend_from_slice(b"data");
    h.extend_from_slice(&data_size.to_le_bytes());
    h.extend_from_slice(&[0u8; 2]);
    fs::write(path, h).unwrap();
}

/// One silent MPEG-1 Layer III frame (128 kbps, 44.1 kHz).
pub fn write_mp3(path: &Path) {
    let mut data = vec![0xFF, 0xFB, 0x90, 0x00];
    data.resize(417, 0);
    fs::write(path, data).unwrap();
}

/// `fLaC` marker plus a zeroed (but well-formed) STREAMINFO block.
pub fn write_flac(path: &Path) {
    let mut data = Vec::new();
    data.extend_from_slice(b"fLaC");
    data.push(0x80); // last-block flag, block type 0 (STREAMINFO)
    data.extend_from_slice(&[0, 0, 34]);
    data.extend_from_slice(&[0u8; 34]);
    fs::write(path, data).unwrap();
}

/// `ftyp` plus an empty `moov.udta.meta.ilst` chain.
pub fn write_m4a(path: &Path) {
    let mut data = Vec::new();
    data.extend_from_slice(&16u32.to_be_bytes());
    data.extend_from_slice(b"ftyp");
    data.extend_from_slice(b"M4A ");
    data.extend_from_slice(&[0, 0, 0, 0]);

    let ilst: Vec<u8> = {
        let mut b = Vec::new();
        b.extend_from_slice(&8u32.to_be_bytes());
        b.extend_from_slice(b"ilst");
        b
    };
    let meta: Vec<u8> = {
        let mut b = Vec::new();
        b.extend_from_slice(&((12 + ilst.len()) as u32).to_be_bytes());
        b.extend_from_slice(b"meta");
        b.extend_from_slice(&[0, 0, 0, 0]); // full-atom version/flags
        b.extend_from_slice(&ilst);
        b
    };
    let udta: Vec<u8> = {
        let mut b = Vec::new();
        b.extend_from_slice(&((8 + meta.len()) as u32).to_be_bytes());
        b.extend_from_slice(b"udta");
        b.extend_from_slice(&meta);
        b
    };
    data.extend_from_slice(&((8 + udta.len()) as u32).to_be_bytes());
    data.extend_from_slice(b"moov");
    data.extend_from_slice(&udta);

    fs::write(path, data).unwrap();
}

/// JFIF magic followed by filler; enough for MIME sniffing.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(&[0u8; 64]);
    data
}
