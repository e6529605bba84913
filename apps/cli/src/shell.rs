//! # Interactive Shell
//!
//! The inventory screen as a line-oriented session. Commands mutate or
//! query the catalog; the product list on screen is redrawn by a separate
//! task that listens to the observer channel, not by the command handlers.
//!
//! ## Tasks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin ──► parse_line ──► ShellSession::execute ──► CatalogStore        │
//! │                                   │                      │              │
//! │                             mode_tx (ViewMode)     all / search slots   │
//! │                                   │                      │              │
//! │                                   └────────┬─────────────┘              │
//! │                                            ▼                            │
//! │                                  render_loop ──► Renderer ──► stdout    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank input (an empty name, an empty search) does nothing, the same as
//! pressing a button with an empty text field.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};
use crate::view::{Renderer, ViewMode};
use stockroom_db::{CatalogStore, Snapshot};

pub const HELP: &str = "\
Commands:
  add <name>[, <quantity>]   add a product (bad or missing quantity = 0)
  find <text>                show products whose name contains <text>
  delete <name>              remove every product with exactly this name
  clear                      leave search results, show all products
  list                       reload and show all products
  help                       show this help
  quit                       exit";

// =============================================================================
// Parsing
// =============================================================================

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { name: String, quantity: String },
    Find(String),
    Delete(String),
    Clear,
    List,
    Help,
    Quit,
    /// Input that should be ignored without comment.
    Skip,
    Unknown(String),
}

/// Parses a line of input.
///
/// ## Examples
/// ```text
/// "add Blue Widget, 5"  → Add { name: "Blue Widget", quantity: "5" }
/// "add Widget"          → Add { name: "Widget", quantity: "" }
/// "find  "              → Skip
/// ```
pub fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Skip;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "add" => {
            let (name, quantity) = rest.split_once(',').unwrap_or((rest, ""));
            let name = name.trim();
            if name.is_empty() {
                return ShellCommand::Skip;
            }
            ShellCommand::Add {
                name: name.to_string(),
                quantity: quantity.trim().to_string(),
            }
        }
        "find" | "search" if rest.is_empty() => ShellCommand::Skip,
        "find" | "search" => ShellCommand::Find(rest.to_string()),
        "delete" | "rm" if rest.is_empty() => ShellCommand::Skip,
        "delete" | "rm" => ShellCommand::Delete(rest.to_string()),
        "clear" => ShellCommand::Clear,
        "list" | "ls" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    }
}

// =============================================================================
// Session
// =============================================================================

/// Command execution state for one shell.
#[derive(Debug)]
pub struct ShellSession {
    store: CatalogStore,
    mode_tx: watch::Sender<ViewMode>,
}

impl ShellSession {
    pub fn new(store: CatalogStore) -> Self {
        let (mode_tx, _) = watch::channel(ViewMode::AllProducts);
        ShellSession { store, mode_tx }
    }

    /// Subscribes to view mode changes.
    pub fn subscribe_mode(&self) -> watch::Receiver<ViewMode> {
        self.mode_tx.subscribe()
    }

    /// Current view mode.
    pub fn mode(&self) -> ViewMode {
        *self.mode_tx.borrow()
    }

    /// Runs one command. Returns a status line to print, if any.
    pub async fn execute(&self, command: ShellCommand) -> CliResult<Option<String>> {
        match command {
            ShellCommand::Add { name, quantity } => {
                let product = self.store.insert_from_input(&name, &quantity).await?;
                self.mode_tx.send_replace(ViewMode::AllProducts);
                Ok(Some(format!("Added {}", product)))
            }
            ShellCommand::Find(text) => {
                let hits = self.store.find_by_name(&text).await?;
                self.mode_tx.send_replace(ViewMode::SearchResults);
                Ok(Some(format!("{} match(es) for '{}'", hits.len(), text)))
            }
            ShellCommand::Delete(name) => {
                let removed = self.store.delete_by_name(&name).await?;
                self.mode_tx.send_replace(ViewMode::AllProducts);
                Ok(Some(format!("Removed {} product(s) named '{}'", removed, name)))
            }
            ShellCommand::Clear => {
                self.mode_tx.send_replace(ViewMode::AllProducts);
                self.store.clear_search();
                Ok(None)
            }
            ShellCommand::List => {
                self.mode_tx.send_replace(ViewMode::AllProducts);
                self.store.refresh().await?;
                Ok(None)
            }
            ShellCommand::Help => Ok(Some(HELP.to_string())),
            ShellCommand::Unknown(word) => {
                Ok(Some(format!("Unknown command '{}'. Type 'help'.", word)))
            }
            ShellCommand::Skip | ShellCommand::Quit => {
                debug!(?command, "Nothing to execute");
                Ok(None)
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Redraws the product list whenever a slot or the view mode changes.
///
/// Returns once any of the channels closes, after drawing the final state.
pub async fn render_loop<F>(
    mut all_rx: watch::Receiver<Snapshot>,
    mut search_rx: watch::Receiver<Snapshot>,
    mut mode_rx: watch::Receiver<ViewMode>,
    mut emit: F,
) where
    F: FnMut(String),
{
    let mut renderer = Renderer::new();

    loop {
        let frame = {
            let mode = *mode_rx.borrow_and_update();
            let all = all_rx.borrow_and_update().clone();
            let search = search_rx.borrow_and_update().clone();
            renderer.frame(mode, &all, &search)
        };
        if let Some(frame) = frame {
            emit(frame);
        }

        let closed = tokio::select! {
            r = all_rx.changed() => r.is_err(),
            r = search_rx.changed() => r.is_err(),
            r = mode_rx.changed() => r.is_err(),
        };

        if closed {
            let mode = *mode_rx.borrow();
            let all = all_rx.borrow().clone();
            let search = search_rx.borrow().clone();
            if let Some(frame) = renderer.frame(mode, &all, &search) {
                emit(frame);
            }
            break;
        }
    }
}

/// Runs the interactive shell on stdin/stdout until `quit` or EOF.
pub async fn run(store: CatalogStore) -> CliResult<()> {
    let session = ShellSession::new(store.clone());

    let renderer = tokio::spawn(render_loop(
        store.subscribe_all(),
        store.subscribe_search(),
        session.subscribe_mode(),
        |frame| println!("{}", frame),
    ));

    println!("{}", HELP);
    info!("Shell started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = parse_line(&line);
        if command == ShellCommand::Quit {
            break;
        }

        match session.execute(command).await {
            Ok(Some(message)) => println!("{}", message),
            Ok(None) => {}
            Err(err) => eprintln!("error: {}", err.user_message()),
        }
    }

    info!("Shell finished");
    renderer.abort();
    match renderer.await {
        Err(err) if !err.is_cancelled() => Err(CliError::Io(std::io::Error::other(err))),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use stockroom_db::{Database, DbConfig};

    async fn store() -> CatalogStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogStore::open(db).await.unwrap()
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse_line("add Blue Widget, 5"),
            ShellCommand::Add {
                name: "Blue Widget".to_string(),
                quantity: "5".to_string()
            }
        );
        assert_eq!(
            parse_line("  ADD Widget  "),
            ShellCommand::Add {
                name: "Widget".to_string(),
                quantity: String::new()
            }
        );
        assert_eq!(parse_line("add , 5"), ShellCommand::Skip);
        assert_eq!(parse_line("add"), ShellCommand::Skip);
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(parse_line(""), ShellCommand::Skip);
        assert_eq!(parse_line("find Wid"), ShellCommand::Find("Wid".to_string()));
        assert_eq!(parse_line("search   "), ShellCommand::Skip);
        assert_eq!(
            parse_line("delete Blue Widget"),
            ShellCommand::Delete("Blue Widget".to_string())
        );
        assert_eq!(parse_line("rm"), ShellCommand::Skip);
        assert_eq!(parse_line("clear"), ShellCommand::Clear);
        assert_eq!(parse_line("ls"), ShellCommand::List);
        assert_eq!(parse_line("q"), ShellCommand::Quit);
        assert_eq!(parse_line("frobnicate"), ShellCommand::Unknown("frobnicate".to_string()));
    }

    #[tokio::test]
    async fn test_session_switches_view_mode() {
        let session = ShellSession::new(store().await);

        session.execute(parse_line("add Widget, 10")).await.unwrap();
        assert_eq!(session.mode(), ViewMode::AllProducts);

        let msg = session.execute(parse_line("find Wid")).await.unwrap();
        assert_eq!(msg.as_deref(), Some("1 match(es) for 'Wid'"));
        assert_eq!(session.mode(), ViewMode::SearchResults);

        session.execute(ShellCommand::Clear).await.unwrap();
        assert_eq!(session.mode(), ViewMode::AllProducts);
    }

    #[tokio::test]
    async fn test_session_coerces_quantity_and_reports_errors() {
        let store = store().await;
        let session = ShellSession::new(store.clone());

        session.execute(parse_line("add Widget, many")).await.unwrap();
        assert_eq!(store.list_all().await.unwrap()[0].quantity, 0);

        let err = session
            .execute(ShellCommand::Add {
                name: " ".to_string(),
                quantity: "1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_render_loop_draws_final_state() {
        let store = store().await;
        let session = ShellSession::new(store.clone());
        let frames = Arc::new(Mutex::new(Vec::<String>::new()));

        let sink = Arc::clone(&frames);
        let task = tokio::spawn(render_loop(
            store.subscribe_all(),
            store.subscribe_search(),
            session.subscribe_mode(),
            move |frame| sink.lock().unwrap().push(frame),
        ));

        session.execute(parse_line("add Widget, 10")).await.unwrap();
        session.execute(parse_line("add Gadget, 5")).await.unwrap();
        session.execute(parse_line("find Gad")).await.unwrap();
        session.execute(ShellCommand::Clear).await.unwrap();

        drop(session);
        drop(store);
        task.await.unwrap();

        let frames = frames.lock().unwrap();
        let last = frames.last().unwrap();
        assert!(last.starts_with("── All products ──"));
        assert!(last.contains("Widget"));
        assert!(last.contains("Gadget"));
    }
}
