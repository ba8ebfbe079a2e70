use voxscribe::domain::{StoragePath, TranscriptionId};

#[test]
fn given_id_and_file_name_when_creating_path_then_format_is_id_slash_file_name() {
    let id = TranscriptionId::new();
    let path = StoragePath::new(&id, "lecture.mp3");

    assert_eq!(path.as_str(), format!("{}/lecture.mp3", id));
}

#[test]
fn given_two_ids_when_creating_paths_then_paths_differ() {
    let path_a = StoragePath::new(&TranscriptionId::new(), "file.wav");
    let path_b = StoragePath::new(&TranscriptionId::new(), "file.wav");

    assert_ne!(path_a, path_b);
}

#[test]
fn given_file_name_with_separators_when_creating_path_then_stays_in_id_directory() {
    let id = TranscriptionId::from_string("abc");
    let path = StoragePath::new(&id, "../../etc/passwd.mp3");

    assert_eq!(path.as_str(), "abc/_.._etc_passwd.mp3");
}

#[test]
fn given_blank_file_name_when_creating_path_then_uses_placeholder() {
    let id = TranscriptionId::from_string("abc");
    assert_eq!(StoragePath::new(&id, "  ").as_str(), "abc/audio");
}

#[test]
fn given_storage_path_when_displayed_then_matches_as_str() {
    let path = StoragePath::new(&TranscriptionId::new(), "test.wav");
    assert_eq!(format!("{}", path), path.as_str());
}
