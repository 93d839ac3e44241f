use harmonia::{Album, ChartObject, ResonanceMatrix, ResonanceSettings};
use std::fs;
use tempfile::tempdir;

const ALBUM: &str = "\
#Alice
sun 0
moon 120
venus 240

#Bob
sun 1 30
<Alice and Bob # Alice # Bob>
";

#[test]
fn test_read_album_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("friends.daw");
    fs::write(&path, ALBUM).unwrap();

    let album = Album::read(&path).unwrap();
    assert_eq!(album.name(), "friends");
    assert_eq!(album.names(), vec!["Alice", "Bob", "Alice and Bob"]);
    assert_eq!(album.get("Alice and Bob").unwrap().dimension(), 2);
}

#[test]
fn test_write_then_read() {
    let dir = tempdir().unwrap();
    let album = Album::parse("friends", ALBUM).unwrap();
    let path = dir.path().join("copy.daw");
    album.write(&path).unwrap();

    let again = Album::read(&path).unwrap();
    assert_eq!(again.names(), album.names());
    let bob = again.single("Bob").unwrap();
    assert!((bob.point("sun").unwrap().position() - 1.5).abs() < 1e-9);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    assert!(Album::read(dir.path().join("absent.daw")).is_err());
}

#[test]
fn test_album_entry_feeds_matrix() {
    let album = Album::parse("friends", ALBUM).unwrap();
    let object = album.get("Alice and Bob").unwrap();
    assert!(matches!(object, ChartObject::Multi(_)));

    let matrix = ResonanceMatrix::from_object(object, &ResonanceSettings::default());
    assert_eq!(matrix.len(), 4);
    let alice = album.single("Alice").unwrap();
    let patterns = matrix.find_patterns(3, &[alice.id()]);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].size(), 3);
}
