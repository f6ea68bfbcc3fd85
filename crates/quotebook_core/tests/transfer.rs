use quotebook_core::{
    export_to_file, import_from_file, MemoryStore, Quote, QuoteRepository, RepoError,
    TransferError, EXPORT_FILE_NAME,
};

fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

#[test]
fn export_then_import_into_fresh_store_restores_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);

    let mut source = QuoteRepository::load(MemoryStore::new()).unwrap();
    source.add("Test quote", "Wisdom").unwrap();
    assert_eq!(export_to_file(&source, &path).unwrap(), 3);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n"));

    let mut target = QuoteRepository::load(MemoryStore::new()).unwrap();
    let changed = import_from_file(&mut target, &path).unwrap();

    assert_eq!(changed, 1);
    assert_eq!(target.quotes(), source.quotes());
}

#[test]
fn import_of_malformed_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"quotes": []}"#).unwrap();

    let mut repo = QuoteRepository::load(MemoryStore::new()).unwrap();
    let err = import_from_file(&mut repo, &path).unwrap_err();

    assert!(matches!(err, TransferError::Repo(RepoError::Format(_))));
    assert_eq!(repo.len(), 2);
}

#[test]
fn import_of_non_utf8_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.json");
    std::fs::write(&path, [0xff, 0xfe, 0x5b, 0x5d]).unwrap();

    let mut repo = QuoteRepository::load(MemoryStore::new()).unwrap();
    let err = import_from_file(&mut repo, &path).unwrap_err();

    assert!(matches!(err, TransferError::Repo(RepoError::Format(_))));
    assert_eq!(repo.len(), 2);
}

#[test]
fn import_of_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut repo = QuoteRepository::load(MemoryStore::new()).unwrap();

    let err = import_from_file(&mut repo, dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TransferError::Io(_)));
}

#[test]
fn import_appends_new_quotes_after_existing_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.json");
    std::fs::write(&path, r#"[{"text": "New", "category": "Fresh"}]"#).unwrap();

    let mut repo = QuoteRepository::load(MemoryStore::new()).unwrap();
    import_from_file(&mut repo, &path).unwrap();

    assert_eq!(repo.len(), 3);
    assert_eq!(repo.quotes().last(), Some(&quote("New", "Fresh")));
    assert_eq!(repo.categories().last().map(String::as_str), Some("Fresh"));
}
