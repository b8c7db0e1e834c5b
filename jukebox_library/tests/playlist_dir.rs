use std::fs;

use jukebox_library::playlist::scan_directory;
use jukebox_library::{LibraryError, Playlist};

#[test]
fn load_keeps_only_audio_files_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.mp3", "a.mp3", "b.MP3", "notes.txt", "a.jpg"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("nested.mp3")).unwrap();

    let playlist = Playlist::load(dir.path(), "mp3");
    let names: Vec<_> = playlist.tracks().iter().map(|t| t.name()).collect();
    assert_eq!(names, ["a.mp3", "b.MP3", "c.mp3"]);
}

#[test]
fn load_attaches_companion_artwork() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"").unwrap();
    fs::write(dir.path().join("a.jpg"), b"").unwrap();
    fs::write(dir.path().join("b.mp3"), b"").unwrap();

    let playlist = Playlist::load(dir.path(), "mp3");
    assert_eq!(playlist.get(0).unwrap().artwork(), Some(dir.path().join("a.jpg").as_path()));
    assert!(playlist.get(1).unwrap().artwork().is_none());
}

#[test]
fn missing_directory_is_created_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let music = dir.path().join("music");

    let playlist = Playlist::load(&music, "mp3");
    assert!(playlist.is_empty());
    assert!(music.is_dir());
}

#[test]
fn order_is_stable_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["zeta.mp3", "alpha.mp3", "mid.mp3"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    let first = Playlist::load(dir.path(), "mp3");
    let second = Playlist::load(dir.path(), "mp3");
    assert_eq!(first.tracks(), second.tracks());
}

#[test]
fn unreadable_path_reports_error_but_load_is_soft() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir");
    fs::write(&file, b"").unwrap();

    let err = scan_directory(&file, "mp3").unwrap_err();
    assert!(matches!(err, LibraryError::ReadDir { .. }));
    assert!(Playlist::load(&file, "mp3").is_empty());
}
