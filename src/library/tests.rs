use super::*;
use super::model::{UNKNOWN_ALBUM, UNKNOWN_ARTIST};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn untagged_record_uses_file_name_and_placeholders() {
    let t = TrackRecord::untagged("/music/Song One.flac");
    assert_eq!(t.title, "Song One.flac");
    assert_eq!(t.artist, "Unknown Artist");
    assert_eq!(t.album, "Unknown Album");
    assert_eq!(t.duration_seconds, 0);
    assert!(t.is_well_formed());
}

#[test]
fn empty_or_blank_path_is_not_well_formed() {
    assert!(!TrackRecord::untagged(PathBuf::new()).is_well_formed());
    assert!(!TrackRecord::untagged("   ").is_well_formed());
}

#[test]
fn display_prefers_artist_dash_title() {
    let mut t = TrackRecord::untagged("/tmp/x.mp3");
    t.title = "Song".into();
    assert_eq!(t.display(), "Song");

    t.artist = "  Artist ".into();
    assert_eq!(t.display(), "Artist - Song");
}

#[test]
fn lofty_extractor_rejects_unreadable_files() {
    let dir = tempdir().unwrap();
    let bogus = dir.path().join("broken.bin");
    fs::write(&bogus, b"definitely not audio").unwrap();

    assert!(LoftyExtractor.extract(&bogus).is_none());
    assert!(LoftyExtractor.extract(Path::new("/nonexistent/file.mp3")).is_none());
}

fn riff_chunk(buf: &mut Vec<u8>, id: &[u8; 4], data: &[u8]) {
    buf.extend_from_slice(id);
    buf.extend_from_slice(&(data.len() as u32).to_le_bytes());
    buf.extend_from_slice(data);
    if data.len() % 2 == 1 {
        buf.push(0);
    }
}

/// 8 kHz mono 16-bit PCM silence with optional RIFF INFO tags.
fn wav_bytes(seconds: u32, info: &[(&[u8; 4], &str)]) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let block_align: u16 = 2;
    let byte_rate = sample_rate * u32::from(block_align);

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&1u16.to_le_bytes()); // mono
    fmt.extend_from_slice(&sample_rate.to_le_bytes());
    fmt.extend_from_slice(&byte_rate.to_le_bytes());
    fmt.extend_from_slice(&block_align.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());

    let mut body = b"WAVE".to_vec();
    riff_chunk(&mut body, b"fmt ", &fmt);
    if !info.is_empty() {
        let mut list = b"INFO".to_vec();
        for (id, value) in info {
            let mut v = value.as_bytes().to_vec();
            v.push(0);
            riff_chunk(&mut list, id, &v);
        }
        riff_chunk(&mut body, b"LIST", &list);
    }
    riff_chunk(&mut body, b"data", &vec![0u8; (byte_rate * seconds) as usize]);

    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

#[test]
fn lofty_extractor_reads_duration_and_keeps_placeholders_without_tags() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Plain Tone.wav");
    fs::write(&path, wav_bytes(2, &[])).unwrap();

    let t = LoftyExtractor.extract(&path).unwrap();
    assert_eq!(t.path, path);
    assert_eq!(t.duration_seconds, 2);
    assert_eq!(t.title, "Plain Tone.wav");
    assert_eq!(t.artist, UNKNOWN_ARTIST);
    assert_eq!(t.album, UNKNOWN_ALBUM);
}

#[test]
fn lofty_extractor_uses_trimmed_tags_and_skips_blank_ones() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tagged.wav");
    let info: &[(&[u8; 4], &str)] = &[(b"INAM", "  Song "), (b"IART", "Band"), (b"IPRD", "   ")];
    fs::write(&path, wav_bytes(1, info)).unwrap();

    let t = LoftyExtractor.extract(&path).unwrap();
    assert_eq!(t.title, "Song");
    assert_eq!(t.artist, "Band");
    assert_eq!(t.album, UNKNOWN_ALBUM);
    assert_eq!(t.duration_seconds, 1);
    assert_eq!(t.display(), "Band - Song");
}
