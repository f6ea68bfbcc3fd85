//! `quotebook` terminal front end.

mod cli;
mod commands;
mod console;
mod shell;

use clap::Parser;
use cli::{Cli, Command};
use commands::{bootstrap, Action, App, CliError};
use quotebook_core::RenderTarget;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut app = match bootstrap(&cli.config, cli.log_level.as_deref())
        .and_then(|config| App::open(&config))
    {
        Ok(app) => app,
        Err(err) => {
            eprintln!("! {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut app, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            app.target.alert(&err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &mut App, command: Command) -> Result<(), CliError> {
    let action = match command {
        Command::Show => Action::Show,
        Command::Add { text, category } => Action::Add { text, category },
        Command::Filter { category } => Action::Filter(category),
        Command::Categories => Action::Categories,
        Command::List => Action::List,
        Command::Export { path } => Action::Export(path),
        Command::Import { path } => Action::Import(path),
        Command::Sync => Action::Sync,
        Command::Watch => {
            app.watch().await;
            return Ok(());
        }
        Command::Shell => return shell::run(app).await,
    };
    app.perform(action).await
}
