use quicknotes_core::{
    MemoryStorage, NoteValidationError, NotesStore, Priority, Storage, StoreError, NOTES_KEY,
};

#[test]
fn add_inserts_at_head_with_fresh_metadata() {
    let mut store = NotesStore::load(MemoryStorage::new());

    let first = store.add("Milk", "Buy milk", Priority::High).unwrap();
    let second = store.add("Call", "Call mom", Priority::Low).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.notes()[0].id, second.id);
    assert_eq!(store.notes()[1].id, first.id);
    assert_ne!(first.id, second.id);
    assert!(!first.created_at.is_empty());
}

#[test]
fn add_trims_title_and_content() {
    let mut store = NotesStore::load(MemoryStorage::new());

    let note = store.add("  Milk ", "\tBuy milk\n", Priority::Medium).unwrap();

    assert_eq!(note.title, "Milk");
    assert_eq!(note.content, "Buy milk");
}

#[test]
fn add_rejects_blank_input_and_leaves_state_unchanged() {
    let mut store = NotesStore::load(MemoryStorage::new());

    let title_err = store.add("   ", "body", Priority::Medium).unwrap_err();
    assert!(matches!(
        title_err,
        StoreError::Validation(NoteValidationError::EmptyTitle)
    ));

    let content_err = store.add("title", " \n ", Priority::Medium).unwrap_err();
    assert!(matches!(
        content_err,
        StoreError::Validation(NoteValidationError::EmptyContent)
    ));

    assert!(store.is_empty());
    assert!(store.storage().get(NOTES_KEY).unwrap().is_none());
}

#[test]
fn delete_removes_the_matching_note() {
    let mut store = NotesStore::load(MemoryStorage::new());
    let keep = store.add("Keep", "stays", Priority::Medium).unwrap();
    let gone = store.add("Drop", "goes", Priority::Medium).unwrap();

    assert!(store.delete(&gone.id).unwrap());

    assert_eq!(store.len(), 1);
    assert_eq!(store.notes()[0].id, keep.id);
}

#[test]
fn delete_of_unknown_id_reports_false_without_writing() {
    let mut store = NotesStore::load(MemoryStorage::new());

    assert!(!store.delete("no-such-id").unwrap());
    assert!(store.storage().get(NOTES_KEY).unwrap().is_none());

    store.add("Milk", "Buy milk", Priority::Medium).unwrap();
    let snapshot = store.storage().get(NOTES_KEY).unwrap().unwrap();

    assert!(!store.delete("still-no-such-id").unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.storage().get(NOTES_KEY).unwrap().unwrap(), snapshot);
}

#[test]
fn delete_removes_every_note_sharing_the_id() {
    let mut store = NotesStore::load(MemoryStorage::new());
    let payload = r#"[
        {"id":"dup-1","title":"First","content":"a","createdAt":"2026-08-20T10:00:00.000Z"},
        {"id":"dup-1","title":"Second","content":"b","createdAt":"2026-08-21T10:00:00.000Z"},
        {"id":"other","title":"Third","content":"c","createdAt":"2026-08-22T10:00:00.000Z"}
    ]"#;
    store.import_json(payload).unwrap();

    assert!(store.delete("dup-1").unwrap());

    assert_eq!(store.len(), 1);
    assert_eq!(store.notes()[0].id, "other");
}

#[test]
fn clear_all_reports_prior_count_and_empties_the_store() {
    let mut store = NotesStore::load(MemoryStorage::new());
    store.add("Milk", "Buy milk", Priority::High).unwrap();
    store.add("Call", "Call mom", Priority::Low).unwrap();

    assert_eq!(store.notes()[0].title, "Call");
    assert_eq!(store.notes()[1].title, "Milk");

    assert_eq!(store.clear_all().unwrap(), 2);
    assert!(store.is_empty());
    assert_eq!(store.storage().get(NOTES_KEY).unwrap().unwrap(), "[]");
}

#[test]
fn clear_all_on_empty_store_is_a_reported_noop() {
    let mut store = NotesStore::load(MemoryStorage::new());

    assert_eq!(store.clear_all().unwrap(), 0);
    assert!(store.storage().get(NOTES_KEY).unwrap().is_none());
}

#[test]
fn search_matches_title_and_content_case_insensitively() {
    let mut store = NotesStore::load(MemoryStorage::new());
    store.add("Groceries", "Milk and eggs", Priority::Medium).unwrap();
    store.add("Workout", "Leg day", Priority::Low).unwrap();
    store.add("Call", "ask about MILK price", Priority::High).unwrap();

    let hits = store.search("milk");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|note| {
        note.title.to_lowercase().contains("milk") || note.content.to_lowercase().contains("milk")
    }));

    assert!(store.search("groc").iter().any(|n| n.title == "Groceries"));
    assert!(store.search("zzz").is_empty());
}

#[test]
fn search_with_empty_query_returns_everything() {
    let mut store = NotesStore::load(MemoryStorage::new());
    store.add("One", "first", Priority::Medium).unwrap();
    store.add("Two", "second", Priority::Medium).unwrap();

    assert_eq!(store.search("").len(), 2);
}
