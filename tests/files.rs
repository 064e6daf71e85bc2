use bpatch::{ByteOrder, DiffError, PatchConfig, PatchError, Patcher};
use std::fs;

#[test]
fn test_diff_then_apply_files() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("test1.txt");
    let new = dir.path().join("test2.txt");
    let patch = dir.path().join("diff.bin");
    let out = dir.path().join("out.txt");

    fs::write(&old, "The quick brown fox jumps over the lazy dog\n").unwrap();
    fs::write(&new, "The quick red fox jumped over the lazy dogs\n").unwrap();

    let patcher = Patcher::builder().build();
    let stats = patcher.diff_files(&old, &new, &patch).unwrap();

    assert!(stats.edits() > 0);
    assert_eq!(fs::metadata(&patch).unwrap().len() as usize, stats.edits() * 6);

    let written = patcher.apply_files(&old, &patch, &out).unwrap();
    assert_eq!(fs::read(&out).unwrap(), fs::read(&new).unwrap());
    assert_eq!(written, fs::read(&new).unwrap().len());
}

#[test]
fn test_concrete_patch_files() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let new = dir.path().join("new");
    let patch = dir.path().join("patch");

    fs::write(&old, "abc").unwrap();
    fs::write(&new, "axc").unwrap();

    let patcher = Patcher::builder().build();
    let stats = patcher.diff_files(&old, &new, &patch).unwrap();

    assert_eq!(stats.replaces, 1);
    assert_eq!(stats.cost, 2);
    assert_eq!(fs::read(&patch).unwrap(), vec![0x02, 0x01, 0x00, 0x00, 0x00, b'x']);

    let edits = patcher.inspect_file(&patch).unwrap();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].to_string(), "replace 0x78 at 1");
}

#[test]
fn test_identical_files_give_empty_patch() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let patch = dir.path().join("patch");
    let out = dir.path().join("out");

    fs::write(&old, [0u8, 1, 2, 3, 255]).unwrap();

    let patcher = Patcher::builder().build();
    let stats = patcher.diff_files(&old, &old, &patch).unwrap();

    assert_eq!(stats.edits(), 0);
    assert!(fs::read(&patch).unwrap().is_empty());

    patcher.apply_files(&old, &patch, &out).unwrap();
    assert_eq!(fs::read(&out).unwrap(), vec![0u8, 1, 2, 3, 255]);
}

#[test]
fn test_config_file_byte_order() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("bpatch.json");
    fs::write(&config_path, r#"{"byte_order":"big"}"#).unwrap();

    let config = PatchConfig::from_file(&config_path).unwrap();
    assert_eq!(config.byte_order, ByteOrder::Big);

    let patcher = Patcher::builder().config(config).build();
    let (patch, _) = patcher.diff(b"ab", b"ab!").unwrap();
    assert_eq!(patch.as_ref(), &[0x00, 0x00, 0x00, 0x00, 0x02, b'!']);
}

#[test]
fn test_missing_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let patch = dir.path().join("patch");

    let patcher = Patcher::builder().build();
    let err = patcher.diff_files(&missing, &missing, &patch).unwrap_err();

    match err {
        PatchError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!patch.exists());
}

#[test]
fn test_truncated_patch_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let patch = dir.path().join("patch");
    let out = dir.path().join("out");

    fs::write(&old, "abc").unwrap();
    fs::write(&patch, [0x02, 0x01, 0x00, 0x00, 0x00]).unwrap();

    let patcher = Patcher::builder().build();
    let err = patcher.apply_files(&old, &patch, &out).unwrap_err();

    assert!(matches!(
        err,
        PatchError::Diff(DiffError::MalformedPatch(_))
    ));
    assert!(!out.exists());
}

#[test]
fn test_dangling_edit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old");
    let patch = dir.path().join("patch");
    let out = dir.path().join("out");

    fs::write(&old, "abc").unwrap();
    // Insert at 9 in a 3-byte original
    fs::write(&patch, [0x00, 0x09, 0x00, 0x00, 0x00, b'z']).unwrap();

    let patcher = Patcher::builder().build();
    let err = patcher.apply_files(&old, &patch, &out).unwrap_err();

    assert!(err.to_string().contains("unreachable"));
    assert!(!out.exists());
}
