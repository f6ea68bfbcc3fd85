//! Interactive session: stdin commands interleaved with periodic sync.
//!
//! Everything runs on one task; a sync pass and a user command never overlap.

use crate::commands::{Action, App, CliError};
use log::{info, warn};
use quotebook_core::{RenderTarget, SyncSchedule};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  show                      show a random quote
  add <text> | <category>   add a quote
  filter <category|all>     select the active category
  categories                list categories
  list                      list all quotes
  export [path]             write quotes.json (or path)
  import <path>             import a JSON file
  sync                      fetch from the server now
  help                      this text
  quit                      leave the session";

/// Parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Run(Action),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_line(line: &str) -> ShellInput {
    let line = line.trim();
    if line.is_empty() {
        return ShellInput::Empty;
    }
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match command.to_ascii_lowercase().as_str() {
        "show" | "new" => ShellInput::Run(Action::Show),
        "add" => match rest.split_once('|') {
            Some((text, category)) => ShellInput::Run(Action::Add {
                text: text.trim().to_string(),
                category: category.trim().to_string(),
            }),
            None => ShellInput::Invalid("usage: add <text> | <category>".to_string()),
        },
        "filter" if !rest.is_empty() => ShellInput::Run(Action::Filter(rest.to_string())),
        "filter" => ShellInput::Invalid("usage: filter <category|all>".to_string()),
        "categories" => ShellInput::Run(Action::Categories),
        "list" => ShellInput::Run(Action::List),
        "export" if rest.is_empty() => ShellInput::Run(Action::Export(None)),
        "export" => ShellInput::Run(Action::Export(Some(PathBuf::from(rest)))),
        "import" if !rest.is_empty() => ShellInput::Run(Action::Import(PathBuf::from(rest))),
        "import" => ShellInput::Invalid("usage: import <path>".to_string()),
        "sync" => ShellInput::Run(Action::Sync),
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => ShellInput::Invalid(format!("unknown command `{other}`; try `help`")),
    }
}

pub async fn run(app: &mut App) -> Result<(), CliError> {
    app.filter
        .restore_display(app.repo.quotes(), &mut app.rng, &mut app.target)?;

    let mut schedule = SyncSchedule::new(app.sync_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("event=shell_start module=cli status=ok");
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    ShellInput::Run(action) => {
                        if let Err(err) = app.perform(action).await {
                            app.target.alert(&err.user_message());
                        }
                    }
                    ShellInput::Help => println!("{HELP}"),
                    ShellInput::Quit => break,
                    ShellInput::Empty => {}
                    ShellInput::Invalid(message) => app.target.alert(&message),
                }
                prompt();
            }
            _ = schedule.tick() => app.sync_once().await,
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    warn!("event=signal_wait module=cli status=error error={err}");
                }
                break;
            }
        }
    }

    info!("event=shell_stop module=cli status=ok");
    Ok(())
}

fn prompt() {
    print!("quotebook> ");
    let _ = std::io::stdout().flush();
}
