use super::*;
use crate::library::TrackRecord;
use std::path::{Path, PathBuf};

fn t(path: &str) -> TrackRecord {
    TrackRecord {
        path: PathBuf::from(path),
        title: path.into(),
        artist: "Test Artist".into(),
        album: "Test Album".into(),
        duration_seconds: 180,
    }
}

fn playlist_of(n: usize) -> Playlist {
    let mut p = Playlist::new();
    for i in 0..n {
        assert!(p.add(t(&format!("/music/{i}.mp3"))));
    }
    p
}

#[test]
fn add_appends_in_order() {
    let mut p = Playlist::new();
    assert!(p.add(t("a.mp3")));
    assert!(p.add(t("b.mp3")));
    let titles: Vec<&str> = p.tracks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a.mp3", "b.mp3"]);
    assert_eq!(p.current_index(), None);
}

#[test]
fn add_rejects_records_without_path_and_duplicates() {
    let mut p = Playlist::new();
    assert!(!p.add(t("")));
    assert!(p.add(t("a.mp3")));
    assert!(!p.add(t("a.mp3")));
    assert_eq!(p.len(), 1);
}

#[test]
fn remove_at_out_of_range_returns_none() {
    let mut p = playlist_of(1);
    assert_eq!(p.remove_at(99), None);
    assert_eq!(p.len(), 1);
}

#[test]
fn removing_only_current_track_clears_selection() {
    let mut p = playlist_of(1);
    p.set_current(0);
    let removed = p.remove_at(0).unwrap();
    assert_eq!(removed.path, Path::new("/music/0.mp3"));
    assert!(p.is_empty());
    assert_eq!(p.current_index(), None);
}

#[test]
fn removing_before_current_decrements_it() {
    let mut p = playlist_of(5);
    p.set_current(3);
    p.remove_at(1);
    assert_eq!(p.current_index(), Some(2));
    assert_eq!(p.current_track().unwrap().path, Path::new("/music/3.mp3"));
}

#[test]
fn removing_after_current_leaves_it_unchanged() {
    let mut p = playlist_of(5);
    p.set_current(1);
    p.remove_at(3);
    assert_eq!(p.current_index(), Some(1));
}

#[test]
fn removing_current_clamps_into_range() {
    let mut p = playlist_of(3);
    p.set_current(1);
    p.remove_at(1);
    assert_eq!(p.current_index(), Some(1));
    assert_eq!(p.current_track().unwrap().path, Path::new("/music/2.mp3"));

    p.remove_at(1);
    assert_eq!(p.current_index(), Some(0));
}

#[test]
fn clear_resets_current() {
    let mut p = playlist_of(3);
    p.set_current(2);
    p.clear();
    assert!(p.is_empty());
    assert_eq!(p.current_index(), None);
}

#[test]
fn set_current_out_of_range_is_not_found() {
    let mut p = playlist_of(2);
    p.set_current(1);
    assert!(p.set_current(2).is_none());
    assert_eq!(p.current_index(), Some(1));
}

#[test]
fn navigation_on_empty_playlist_is_none() {
    let p = Playlist::new();
    assert_eq!(p.next_index(None), None);
    assert_eq!(p.next_index(Some(0)), None);
    assert_eq!(p.previous_index(None), None);
}

#[test]
fn navigation_wraps_around() {
    let p = playlist_of(3);
    assert_eq!(p.next_index(Some(2)), Some(0));
    assert_eq!(p.previous_index(Some(0)), Some(2));
    assert_eq!(p.next_index(None), Some(0));
    assert_eq!(p.previous_index(None), Some(2));
}

#[test]
fn next_applied_len_times_returns_to_start() {
    for n in 1..=7 {
        let p = playlist_of(n);
        for start in 0..n {
            let mut i = start;
            for _ in 0..n {
                i = p.next_index(Some(i)).unwrap();
            }
            assert_eq!(i, start, "n = {n}");
        }
    }
}

#[test]
fn previous_undoes_next() {
    for n in 1..=7 {
        let p = playlist_of(n);
        for i in 0..n {
            assert_eq!(p.previous_index(p.next_index(Some(i))), Some(i));
            assert_eq!(p.next_index(p.previous_index(Some(i))), Some(i));
        }
    }
}
