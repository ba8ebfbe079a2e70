use voxscribe::application::ports::HistoryRepository;
use voxscribe::domain::{Transcription, TranscriptionId};
use voxscribe::infrastructure::persistence::InMemoryHistoryRepository;

fn entry(id: &str) -> Transcription {
    Transcription::new(TranscriptionId::from_string(id), "clip.mp3", "text").unwrap()
}

#[tokio::test]
async fn given_duplicate_id_when_appending_then_history_keeps_one_copy_at_front() {
    let repo = InMemoryHistoryRepository::new(10);
    repo.append(entry("a")).await.unwrap();
    repo.append(entry("b")).await.unwrap();
    repo.append(entry("a")).await.unwrap();

    let ids: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn given_entry_when_getting_by_id_then_returns_it() {
    let repo = InMemoryHistoryRepository::new(10);
    repo.append(entry("a")).await.unwrap();

    assert!(repo.get(&TranscriptionId::from_string("a")).await.unwrap().is_some());
    assert!(repo.get(&TranscriptionId::from_string("z")).await.unwrap().is_none());
}

#[tokio::test]
async fn given_entries_when_clearing_then_list_is_empty() {
    let repo = InMemoryHistoryRepository::new(10);
    repo.append(entry("a")).await.unwrap();

    repo.clear().await.unwrap();

    assert!(repo.list().await.unwrap().is_empty());
}
