use std::fs;

use studio_core::{AuthUser, HistoryEntry, StoredAsset, HISTORY_LIMIT};
use studio_engine::{
    LocalStore, AUTH_TOKEN_KEY, AUTH_USER_KEY, HISTORY_KEY, LIBRARY_KEY,
};
use tempfile::TempDir;

fn entry(id: u64) -> HistoryEntry {
    HistoryEntry {
        id,
        title: format!("prompt {id}"),
        time: "12:00".into(),
    }
}

#[test]
fn missing_keys_read_as_absent() {
    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path().join("not-created-yet"));
    assert!(store.load_history().is_empty());
    assert!(store.load_library().is_empty());
    assert_eq!(store.current_user(), None);
    assert_eq!(store.auth_token(), None);
}

#[test]
fn malformed_json_reads_as_default() {
    studio_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    for key in [HISTORY_KEY, LIBRARY_KEY, AUTH_USER_KEY] {
        fs::write(temp.path().join(format!("{key}.json")), "{not json").unwrap();
    }
    let store = LocalStore::new(temp.path());
    assert!(store.load_history().is_empty());
    assert!(store.load_library().is_empty());
    assert_eq!(store.current_user(), None);

    fs::write(temp.path().join(format!("{LIBRARY_KEY}.json")), r#"{"name":"x"}"#).unwrap();
    assert!(store.load_library().is_empty());
}

#[test]
fn library_skips_entries_that_are_not_assets() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(format!("{LIBRARY_KEY}.json")),
        r#"[42, {"name":"Neon Cityscape.png","dataURL":"data:a"}, "text", {"dataURL":"data:b"}]"#,
    )
    .unwrap();
    let store = LocalStore::new(temp.path());
    assert_eq!(
        store.load_library(),
        vec![
            StoredAsset::new("Neon Cityscape.png", "data:a"),
            StoredAsset {
                name: None,
                data_url: "data:b".into()
            },
        ]
    );
}

#[test]
fn append_library_creates_dir_and_skips_duplicates() {
    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path().join("data"));
    let asset = StoredAsset::new("A.mp4", "/Videos/A.mp4");

    store.append_library(&asset).unwrap();
    store.append_library(&asset).unwrap();
    store
        .append_library(&StoredAsset::new("B.mp4", "/Videos/B.mp4"))
        .unwrap();

    let raw = fs::read_to_string(temp.path().join("data").join("vp_videos.json")).unwrap();
    assert!(raw.contains(r#""dataURL":"/Videos/A.mp4""#));
    assert_eq!(store.load_library().len(), 2);
}

#[test]
fn history_round_trip_is_capped() {
    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());
    let entries: Vec<_> = (0..45).map(entry).collect();

    store.save_history(&entries).unwrap();
    let loaded = store.load_history();
    assert_eq!(loaded.len(), HISTORY_LIMIT);
    assert_eq!(loaded[0], entry(0));

    // A file written by something else is still capped on load.
    store.set_json(HISTORY_KEY, &entries).unwrap();
    assert_eq!(store.load_history().len(), HISTORY_LIMIT);
}

#[test]
fn session_save_and_clear() {
    let temp = TempDir::new().unwrap();
    let store = LocalStore::new(temp.path());
    let user = AuthUser {
        name: "Ada".into(),
        email: None,
    };

    store.save_session(Some("tok"), Some(&user)).unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join(format!("{AUTH_TOKEN_KEY}.json"))).unwrap(),
        "tok"
    );
    assert_eq!(store.current_user(), Some(user));

    store.clear_session().unwrap();
    assert_eq!(store.auth_token(), None);
    assert_eq!(store.current_user(), None);
    // Clearing twice is fine.
    store.clear_session().unwrap();
}

#[test]
fn writing_into_a_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let store = LocalStore::new(file_path.clone());
    assert!(store.save_history(&[entry(1)]).is_err());
    assert!(store.load_history().is_empty());
}
