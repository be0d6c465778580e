//! Non-clobbering move behaviour

use dropfix_fs::{Error, io};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn moves_directory_tree_intact() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("node_modules");
    fs::create_dir_all(src.join("pkg")).unwrap();
    fs::write(src.join("pkg").join("index.js"), "module.exports = 1;").unwrap();
    let dest = temp.path().join("staged");

    io::move_no_clobber(&src, &dest).unwrap();

    assert!(!src.exists());
    assert_eq!(
        fs::read_to_string(dest.join("pkg").join("index.js")).unwrap(),
        "module.exports = 1;"
    );
}

#[test]
fn refuses_to_clobber_existing_destination() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("build");
    fs::write(&src, "new").unwrap();
    let dest = temp.path().join("occupied");
    fs::write(&dest, "old").unwrap();

    let err = io::move_no_clobber(&src, &dest).unwrap_err();

    assert!(matches!(err, Error::DestinationExists { .. }));
    assert_eq!(fs::read_to_string(&src).unwrap(), "new");
    assert_eq!(fs::read_to_string(&dest).unwrap(), "old");
}

#[test]
fn refuses_to_clobber_empty_directory() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("build");
    fs::create_dir(&src).unwrap();
    let dest = temp.path().join("occupied");
    fs::create_dir(&dest).unwrap();

    let err = io::move_no_clobber(&src, &dest).unwrap_err();
    assert!(matches!(err, Error::DestinationExists { .. }));
    assert!(src.is_dir());
}

#[test]
fn missing_source_is_an_error() {
    let temp = TempDir::new().unwrap();

    let err = io::move_no_clobber(&temp.path().join("gone"), &temp.path().join("x")).unwrap_err();
    assert!(matches!(err, Error::SourceMissing { .. }));
}

#[cfg(unix)]
#[test]
fn moves_dangling_symlink_itself() {
    let temp = TempDir::new().unwrap();
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(temp.path().join("nowhere"), &link).unwrap();
    let dest = temp.path().join("moved");

    io::move_no_clobber(&link, &dest).unwrap();

    assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert!(fs::symlink_metadata(&link).is_err());
}

#[test]
fn is_empty_dir_reports_contents() {
    let temp = TempDir::new().unwrap();
    assert!(io::is_empty_dir(temp.path()).unwrap());

    fs::write(temp.path().join("f"), "").unwrap();
    assert!(!io::is_empty_dir(temp.path()).unwrap());
}

#[test]
fn is_empty_dir_on_missing_path_errors() {
    let temp = TempDir::new().unwrap();
    assert!(io::is_empty_dir(&temp.path().join("missing")).is_err());
}
