//! Wiring of core components and the user actions they serve.

use crate::console::ConsoleTarget;
use log::warn;
use quotebook_core::{
    default_log_level, export_to_file, import_from_file, init_logging, ConfigError,
    FilterController, FilterError, FilterState, HttpQuoteRemote, MemoryStore, QuoteRepository,
    QuotebookConfig, RenderTarget, RepoError, SqliteStore, StoreError, SyncClient, SyncError,
    SyncSchedule, ThreadRandom, TransferError, EXPORT_FILE_NAME,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

const ADD_SUCCESS_MESSAGE: &str = "New quote added successfully!";
const ADD_REJECTED_MESSAGE: &str = "Please enter both a quote and a category.";
const IMPORT_SUCCESS_MESSAGE: &str = "Quotes imported successfully!";
const SYNC_CHANGED_MESSAGE: &str = "Quotes synced with server!";

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Io(std::io::Error),
    Store(StoreError),
    Repo(RepoError),
    Filter(FilterError),
    Sync(SyncError),
    Transfer(TransferError),
}

impl CliError {
    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Repo(RepoError::Validation(_)) => ADD_REJECTED_MESSAGE.to_string(),
            Self::Transfer(TransferError::Repo(RepoError::Format(details))) => {
                format!("Import failed: the file is not a JSON array of quotes ({details}).")
            }
            other => other.to_string(),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::Sync(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Filter(err) => Some(err),
            Self::Sync(err) => Some(err),
            Self::Transfer(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<FilterError> for CliError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<SyncError> for CliError {
    fn from(value: SyncError) -> Self {
        Self::Sync(value)
    }
}

impl From<TransferError> for CliError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// One user action, shared by subcommands and the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show,
    Add { text: String, category: String },
    Filter(String),
    Categories,
    List,
    Export(Option<PathBuf>),
    Import(PathBuf),
    Sync,
}

/// Loads configuration and starts file logging.
///
/// Logging failures are reported on stderr and do not stop the program.
pub fn bootstrap(config_path: &Path, level_override: Option<&str>) -> Result<QuotebookConfig, CliError> {
    let config = QuotebookConfig::load(Some(config_path))?;

    let level = level_override
        .map(str::to_string)
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = absolute(&config.logging.dir)?;
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("! logging disabled: {err}");
    }

    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Live application state for one process.
pub struct App {
    pub repo: QuoteRepository<Rc<SqliteStore>>,
    pub filter: FilterController<Rc<SqliteStore>, MemoryStore>,
    pub sync: SyncClient<HttpQuoteRemote>,
    pub sync_interval: Duration,
    pub rng: ThreadRandom,
    pub target: ConsoleTarget,
}

impl App {
    pub fn open(config: &QuotebookConfig) -> Result<Self, CliError> {
        let durable = Rc::new(SqliteStore::open(&config.storage.db_path)?);
        let repo = QuoteRepository::load(Rc::clone(&durable))?;
        let filter = FilterController::restore(durable, MemoryStore::new(), &repo.category_index())?;
        let remote = HttpQuoteRemote::new(config.remote.endpoint.clone(), config.remote.timeout())?;

        Ok(Self {
            repo,
            filter,
            sync: SyncClient::new(remote),
            sync_interval: config.sync.interval(),
            rng: ThreadRandom,
            target: ConsoleTarget,
        })
    }

    /// Runs one action and reports the outcome through the console.
    pub async fn perform(&mut self, action: Action) -> Result<(), CliError> {
        match action {
            Action::Show => {
                self.filter
                    .show_random(self.repo.quotes(), &mut self.rng, &mut self.target)?;
            }
            Action::Add { text, category } => {
                self.sync
                    .add_and_publish(&mut self.repo, &text, &category)
                    .await?;
                self.target.alert(ADD_SUCCESS_MESSAGE);
            }
            Action::Filter(category) => {
                self.filter.select(&category)?;
                self.filter
                    .show_random(self.repo.quotes(), &mut self.rng, &mut self.target)?;
            }
            Action::Categories => self.print_categories(),
            Action::List => {
                for quote in self.repo.quotes() {
                    self.target.render_quote(quote);
                }
            }
            Action::Export(path) => {
                let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
                let count = export_to_file(&self.repo, &path)?;
                self.target
                    .notify(&format!("Exported {count} quotes to {}", path.display()));
            }
            Action::Import(path) => {
                import_from_file(&mut self.repo, &path)?;
                self.target.alert(IMPORT_SUCCESS_MESSAGE);
            }
            Action::Sync => self.sync_once().await,
        }
        Ok(())
    }

    /// One fetch-and-merge pass; failures stay in the log.
    pub async fn sync_once(&mut self) {
        if let Ok(report) = self.sync.fetch_and_merge(&mut self.repo).await {
            notify_report(&mut self.target, report.changed);
        }
    }

    /// Periodic fetch-and-merge until Ctrl-C.
    pub async fn watch(&mut self) {
        let mut schedule = SyncSchedule::new(self.sync_interval);
        let target = &mut self.target;
        tokio::select! {
            _ = self.sync.run_periodic(&mut self.repo, &mut schedule, |report| {
                notify_report(target, report.changed)
            }) => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    warn!("event=signal_wait module=cli status=error error={err}");
                }
            }
        }
    }

    fn print_categories(&mut self) {
        let active = match self.filter.state() {
            FilterState::Unfiltered => None,
            FilterState::Category(category) => Some(category.as_str()),
        };
        let marker = |selected: bool| if selected { '*' } else { ' ' };

        println!("{} all", marker(active.is_none()));
        for category in self.repo.categories() {
            println!("{} {category}", marker(active == Some(category.as_str())));
        }
    }
}

fn notify_report(target: &mut ConsoleTarget, changed: usize) {
    if changed > 0 {
        target.notify(SYNC_CHANGED_MESSAGE);
    }
}
