use quiz_core::model::EntryId;
use quiz_core::time::fixed_now;
use storage::repository::{NewVocabRecord, SnapshotRepository, Storage, VocabRepository};
use storage::sqlite::SqliteRepository;

fn new_record(word: &str, definition: &str, example: &str) -> NewVocabRecord {
    NewVocabRecord {
        word: word.to_owned(),
        definition: definition.to_owned(),
        example: example.to_owned(),
        created_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_appends_and_lists_entries_in_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_vocab?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let cat = repo
        .append_entry(&new_record("cat", "a feline", "The cat sat."))
        .await
        .unwrap();
    repo.append_entry(&new_record("dog", "a canine", "The dog ran."))
        .await
        .unwrap();

    assert_eq!(cat.id, EntryId::new(1));

    let listed = repo.list_entries().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].word, "cat");
    assert_eq!(listed[0].example, "The cat sat.");
    assert_eq!(listed[0].created_at, fixed_now());
    assert_eq!(listed[1].word, "dog");
    assert!(listed[1].id > listed[0].id);
}

#[tokio::test]
async fn sqlite_snapshot_upsert_load_clear() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_snapshots?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.load_snapshot("quizState").await.unwrap().is_none());

    repo.save_snapshot("quizState", "first", fixed_now())
        .await
        .unwrap();
    repo.save_snapshot("quizState", "second", fixed_now())
        .await
        .unwrap();

    let loaded = repo.load_snapshot("quizState").await.unwrap().unwrap();
    assert_eq!(loaded.key, "quizState");
    assert_eq!(loaded.payload, "second");
    assert_eq!(loaded.saved_at, fixed_now());

    repo.clear_snapshot("quizState").await.unwrap();
    assert!(repo.load_snapshot("quizState").await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_both_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage
        .vocab
        .append_entry(&new_record("bird", "a flying animal", ""))
        .await
        .unwrap();
    storage
        .snapshots
        .save_snapshot("quizState", "{}", fixed_now())
        .await
        .unwrap();

    assert_eq!(storage.vocab.list_entries().await.unwrap().len(), 1);
    assert!(storage.snapshots.load_snapshot("quizState").await.unwrap().is_some());
}
