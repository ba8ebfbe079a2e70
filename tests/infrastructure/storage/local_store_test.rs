use std::io;

use bytes::Bytes;
use futures::stream;

use voxscribe::application::ports::{StagingStore, StagingStoreError};
use voxscribe::domain::{StoragePath, TranscriptionId};
use voxscribe::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_returns_bytes_written() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TranscriptionId::new(), "test.mp3");

    let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
    let size = store
        .store(&path, Box::pin(stream::iter(chunks)), Some(11))
        .await
        .unwrap();

    assert_eq!(size, 11);
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TranscriptionId::new(), "test.wav");

    let content = b"test content";
    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from(&content[..]))]));
    store.store(&path, byte_stream, None).await.unwrap();

    let fetched = store.fetch(&path).await.unwrap();
    assert_eq!(&fetched[..], content);
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_fetch_returns_not_found() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TranscriptionId::new(), "test.mp3");

    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from("data"))]));
    store.store(&path, byte_stream, None).await.unwrap();

    store.delete(&path).await.unwrap();

    let result = store.fetch(&path).await;
    assert!(matches!(result, Err(StagingStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_io_error() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TranscriptionId::new(), "broken.mp3");

    let chunks = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away")),
    ];
    let result = store.store(&path, Box::pin(stream::iter(chunks)), None).await;

    assert!(matches!(result, Err(StagingStoreError::Io(_))));
}

#[tokio::test]
async fn given_length_mismatch_when_storing_then_rejects_upload() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::new(&TranscriptionId::new(), "short.mp3");

    let chunks = vec![Ok::<_, io::Error>(Bytes::from("abc"))];
    let result = store
        .store(&path, Box::pin(stream::iter(chunks)), Some(10))
        .await;

    assert!(matches!(result, Err(StagingStoreError::UploadFailed(_))));
    assert!(store.fetch(&path).await.is_err());
}

#[tokio::test]
async fn given_files_under_two_ids_when_listing_prefix_then_returns_only_matching() {
    let (_dir, store) = create_test_store();
    let id_a = TranscriptionId::from_string("aaaa");
    let id_b = TranscriptionId::from_string("bbbb");
    for (id, name) in [(&id_a, "one.mp3"), (&id_b, "two.mp3")] {
        let path = StoragePath::new(id, name);
        let byte_stream = Box::pin(stream::iter(vec![Ok::<_, io::Error>(Bytes::from("x"))]));
        store.store(&path, byte_stream, None).await.unwrap();
    }

    let listed = store.list_prefix(id_a.as_str()).await.unwrap();

    assert_eq!(listed, vec![StoragePath::new(&id_a, "one.mp3")]);
}

#[tokio::test]
async fn given_unknown_prefix_when_listing_then_returns_empty() {
    let (_dir, store) = create_test_store();
    assert!(store.list_prefix("missing").await.unwrap().is_empty());
}
