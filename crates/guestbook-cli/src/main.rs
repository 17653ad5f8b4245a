//! Guestbook CLI - scriptable client for a guestbook / simple-board backend

mod notifier;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use guestbook_core::{
    Config, DeleteOutcome, EntryId, GuestbookClient, HttpBoardApi, LoadState, Schema,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use notifier::TerminalNotifier;

/// Guestbook CLI - read and write entries on a guestbook backend
#[derive(Parser, Debug)]
#[command(name = "guestbook", author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(short, long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Backend layout: guestbook or board (overrides config and environment)
    #[arg(short, long, global = true)]
    schema: Option<Schema>,

    /// Log requests and responses
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all entries
    List,
    /// Write a new entry
    Post {
        /// Entry text
        #[arg(long)]
        content: String,
        /// Your name (required by the guestbook schema)
        #[arg(long)]
        author: Option<String>,
    },
    /// Delete an entry (board schema)
    Delete {
        /// Id of the entry to delete
        id: EntryId,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show what the backend reports about itself (board schema)
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("guestbook_cli={level}").parse()?)
                .add_directive(format!("guestbook_core={level}").parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(args.config)?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(schema) = args.schema {
        config.schema = schema;
    }
    tracing::info!("Using {} ({} schema)", config.api_url, config.schema);

    let api = HttpBoardApi::new(&config.api_url, config.schema)?;
    let assume_yes = matches!(args.command, Command::Delete { yes: true, .. });
    let mut client = GuestbookClient::new(api, TerminalNotifier::stdio(assume_yes));

    match args.command {
        Command::List => {
            client.load().await;
            if let LoadState::Failed(reason) = client.board().load_state() {
                anyhow::bail!("Could not load entries: {reason}");
            }
        }
        Command::Post { content, author } => {
            let form = client.form_mut();
            form.content = content;
            form.author = author.unwrap_or_default();
            if client.submit_entry().await.is_err() {
                anyhow::bail!("Entry was not submitted");
            }
            if *client.board().load_state() == LoadState::Idle {
                anyhow::bail!("Backend did not respond; entry was not saved");
            }
        }
        Command::Delete { id, .. } => {
            if !config.schema.supports_delete() {
                anyhow::bail!("Delete is not available with the {} schema", config.schema);
            }
            let outcome = client.delete_entry(&id).await;
            ensure_deleted(&id, outcome)?;
        }
        Command::Health => {
            if !config.schema.supports_health() {
                anyhow::bail!(
                    "Health check is not available with the {} schema",
                    config.schema
                );
            }
            client.fetch_backend_health().await;
            println!("{}", client.board().backend_status());
            return Ok(());
        }
    }

    // Nothing to show when no list was fetched, e.g. a declined delete
    if *client.board().load_state() != LoadState::Idle {
        render::print_board(client.board(), &mut std::io::stdout().lock())?;
    }
    Ok(())
}

/// A delete the backend did not accept is a command failure.
fn ensure_deleted(id: &EntryId, outcome: DeleteOutcome) -> Result<()> {
    match outcome {
        DeleteOutcome::Failed => anyhow::bail!("Entry {id} was not deleted"),
        DeleteOutcome::Deleted | DeleteOutcome::Cancelled => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_delete_is_an_error() {
        let id = EntryId::Number(3);

        let err = ensure_deleted(&id, DeleteOutcome::Failed).unwrap_err();
        assert_eq!(err.to_string(), "Entry 3 was not deleted");

        assert!(ensure_deleted(&id, DeleteOutcome::Deleted).is_ok());
        assert!(ensure_deleted(&id, DeleteOutcome::Cancelled).is_ok());
    }
}
