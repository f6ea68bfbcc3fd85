use quotebook_core::store::QUOTES_KEY;
use quotebook_core::{
    KeyValueStore, MemoryStore, MergeReport, Quote, QuoteRemote, QuoteRepository,
    RemoteQuoteRecord, RepoError, SqliteStore, SyncClient, SyncError, SyncSchedule,
};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn quote(text: &str, category: &str) -> Quote {
    Quote::new(text, category).unwrap()
}

fn record(text: Option<&str>, category: Option<&str>) -> RemoteQuoteRecord {
    RemoteQuoteRecord {
        text: text.map(str::to_string),
        category: category.map(str::to_string),
        title: None,
    }
}

#[derive(Default)]
struct MockRemote {
    records: Vec<RemoteQuoteRecord>,
    fail_with_status: Option<u16>,
    fetch_calls: Arc<AtomicUsize>,
    published: Arc<Mutex<Vec<Quote>>>,
}

impl QuoteRemote for MockRemote {
    async fn fetch_quotes(&self) -> Result<Vec<RemoteQuoteRecord>, SyncError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(code) => Err(SyncError::Status(code)),
            None => Ok(self.records.clone()),
        }
    }

    async fn publish_quote(&self, quote: &Quote) -> Result<serde_json::Value, SyncError> {
        if let Some(code) = self.fail_with_status {
            return Err(SyncError::Status(code));
        }
        self.published.lock().unwrap().push(quote.clone());
        Ok(serde_json::json!({ "id": 101, "text": quote.text }))
    }
}

fn repo_with(quotes: &[Quote]) -> QuoteRepository<Rc<MemoryStore>> {
    let store = Rc::new(MemoryStore::new());
    store
        .set(QUOTES_KEY, &serde_json::to_string(quotes).unwrap())
        .unwrap();
    QuoteRepository::load(store).unwrap()
}

#[tokio::test]
async fn fetch_and_merge_applies_remote_wins_policy() {
    let mut repo = repo_with(&[quote("A", "X"), quote("B", "Y")]);
    let client = SyncClient::new(MockRemote {
        records: vec![record(Some("A"), Some("Z"))],
        ..MockRemote::default()
    });

    let report = client.fetch_and_merge(&mut repo).await.unwrap();

    assert_eq!(
        report,
        MergeReport {
            fetched: 1,
            skipped: 0,
            changed: 1
        }
    );
    assert_eq!(repo.quotes(), [quote("B", "Y"), quote("A", "Z")]);
}

#[tokio::test]
async fn fetch_and_merge_tolerates_foreign_record_shapes() {
    let mut repo = repo_with(&[]);
    let client = SyncClient::new(MockRemote {
        records: vec![
            record(None, Some("Orphan")),
            record(Some("Plain"), None),
            RemoteQuoteRecord {
                title: Some("Titled".to_string()),
                ..RemoteQuoteRecord::default()
            },
        ],
        ..MockRemote::default()
    });

    let report = client.fetch_and_merge(&mut repo).await.unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(repo.quotes(), [quote("Plain", "Server"), quote("Titled", "Server")]);
}

#[tokio::test]
async fn repeated_fetch_is_idempotent() {
    let mut repo = repo_with(&[quote("A", "X")]);
    let client = SyncClient::new(MockRemote {
        records: vec![record(Some("A"), Some("Z")), record(Some("C"), Some("W"))],
        ..MockRemote::default()
    });

    client.fetch_and_merge(&mut repo).await.unwrap();
    let once = repo.quotes().to_vec();
    let second = client.fetch_and_merge(&mut repo).await.unwrap();

    assert_eq!(second.changed, 0);
    assert_eq!(repo.quotes(), once.as_slice());
}

#[tokio::test]
async fn fetch_failure_leaves_collection_untouched() {
    let store = Rc::new(SqliteStore::open_in_memory().unwrap());
    let mut repo = QuoteRepository::load(Rc::clone(&store)).unwrap();
    let client = SyncClient::new(MockRemote {
        fail_with_status: Some(503),
        ..MockRemote::default()
    });

    let err = client.fetch_and_merge(&mut repo).await.unwrap_err();

    assert!(matches!(err, SyncError::Status(503)));
    assert_eq!(err.code(), "http_status");
    assert_eq!(repo.len(), 2);
    assert!(store.get(QUOTES_KEY).unwrap().is_none());
}

#[tokio::test]
async fn publish_sends_quote_once_and_returns_ack() {
    let published = Arc::new(Mutex::new(Vec::new()));
    let client = SyncClient::new(MockRemote {
        published: Arc::clone(&published),
        ..MockRemote::default()
    });

    let mut repo = repo_with(&[]);
    let added = repo.add("Ship it.", "Work").unwrap();
    let ack = client.publish(&added).await.unwrap();

    assert_eq!(ack["id"], 101);
    assert_eq!(published.lock().unwrap().as_slice(), [quote("Ship it.", "Work")]);
}

#[tokio::test]
async fn publish_failure_drops_quote() {
    let published = Arc::new(Mutex::new(Vec::new()));
    let client = SyncClient::new(MockRemote {
        fail_with_status: Some(500),
        published: Arc::clone(&published),
        ..MockRemote::default()
    });

    let err = client.publish(&quote("Lost", "Work")).await.unwrap_err();
    assert!(matches!(err, SyncError::Status(500)));
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn add_and_publish_sends_the_new_quote_once() {
    let published = Arc::new(Mutex::new(Vec::new()));
    let client = SyncClient::new(MockRemote {
        published: Arc::clone(&published),
        ..MockRemote::default()
    });
    let mut repo = repo_with(&[quote("A", "X")]);

    let added = client
        .add_and_publish(&mut repo, "Ship it.", "Work")
        .await
        .unwrap();

    assert_eq!(added, quote("Ship it.", "Work"));
    assert_eq!(repo.quotes(), [quote("A", "X"), quote("Ship it.", "Work")]);
    assert_eq!(published.lock().unwrap().as_slice(), [quote("Ship it.", "Work")]);
}

#[tokio::test]
async fn add_and_publish_rejects_blank_input_without_sending() {
    let published = Arc::new(Mutex::new(Vec::new()));
    let client = SyncClient::new(MockRemote {
        published: Arc::clone(&published),
        ..MockRemote::default()
    });
    let store = Rc::new(MemoryStore::new());
    let mut repo = QuoteRepository::load(Rc::clone(&store)).unwrap();

    let err = client
        .add_and_publish(&mut repo, "   ", "Work")
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Validation(_)));
    assert!(published.lock().unwrap().is_empty());
    assert_eq!(repo.len(), 2);
    assert!(store.get(QUOTES_KEY).unwrap().is_none());
}

#[tokio::test]
async fn add_and_publish_keeps_quote_when_publish_fails() {
    let client = SyncClient::new(MockRemote {
        fail_with_status: Some(503),
        ..MockRemote::default()
    });
    let store = Rc::new(MemoryStore::new());
    let mut repo = QuoteRepository::load(Rc::clone(&store)).unwrap();

    let added = client
        .add_and_publish(&mut repo, "Offline", "Work")
        .await
        .unwrap();

    let stored: Vec<Quote> =
        serde_json::from_str(&store.get(QUOTES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.last(), Some(&added));
    assert_eq!(repo.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn run_periodic_fetches_once_per_period() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = SyncClient::new(MockRemote {
        records: vec![record(Some("A"), Some("Z"))],
        fetch_calls: Arc::clone(&calls),
        ..MockRemote::default()
    });
    let mut repo = repo_with(&[]);
    let mut schedule = SyncSchedule::new(Duration::from_secs(60));
    let mut reports = Vec::new();

    let outcome = tokio::time::timeout(
        Duration::from_secs(185),
        client.run_periodic(&mut repo, &mut schedule, |report| reports.push(*report)),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].changed, 1);
    assert_eq!(reports[2].changed, 0);
    assert_eq!(repo.quotes(), [quote("A", "Z")]);
}

#[tokio::test(start_paused = true)]
async fn run_periodic_keeps_going_after_failures() {
    let calls = Arc::new(AtomicUsize::new(0));
    let client = SyncClient::new(MockRemote {
        fail_with_status: Some(502),
        fetch_calls: Arc::clone(&calls),
        ..MockRemote::default()
    });
    let mut repo = repo_with(&[quote("A", "X")]);
    let mut schedule = SyncSchedule::new(Duration::from_secs(60));
    let mut reports = 0;

    let _ = tokio::time::timeout(
        Duration::from_secs(130),
        client.run_periodic(&mut repo, &mut schedule, |_| reports += 1),
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(reports, 0);
    assert_eq!(repo.quotes(), [quote("A", "X")]);
}

#[tokio::test(start_paused = true)]
async fn schedule_clamps_zero_period() {
    let schedule = SyncSchedule::new(Duration::ZERO);
    assert_eq!(schedule.period(), Duration::from_secs(1));
}
