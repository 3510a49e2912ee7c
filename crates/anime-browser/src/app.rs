//! Application context and event loop.
//!
//! The loop owns every screen and the favorites store. The catalog fetch
//! runs on a spawned task and its outcome comes back over a channel, so all
//! state changes happen on the loop itself.

use crate::commands::{Command, HELP};
use crate::render;
use crate::screens::{DiscoverScreen, FetchTicket, MyListScreen};
use anyhow::{Context, Result};
use jikan_client::{CatalogSource, FetchError};
use shared::{AnimeRecord, AnimeRow, FavoritesStore};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const PROMPT: &str = "> ";

/// Completed fetch on its way back to the loop
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<AnimeRecord>, FetchError>,
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Result of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub flow: Flow,
    pub text: String,
}

impl Reply {
    fn show(text: impl Into<String>) -> Self {
        Self {
            flow: Flow::Continue,
            text: text.into(),
        }
    }

    fn quit() -> Self {
        Self {
            flow: Flow::Quit,
            text: "Bye.".to_string(),
        }
    }
}

pub struct App<S> {
    source: Arc<S>,
    limit: u32,
    favorites: FavoritesStore,
    discover: DiscoverScreen,
    /// Present while My List is the visible screen
    my_list: Option<MyListScreen>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
}

impl<S: CatalogSource + 'static> App<S> {
    pub fn new(source: Arc<S>, limit: u32, favorites: FavoritesStore) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            source,
            limit,
            discover: DiscoverScreen::new(favorites.clone()),
            favorites,
            my_list: None,
            fetch_tx,
            fetch_rx,
            in_flight: None,
        }
    }

    /// Start a catalog fetch in the background, abandoning any running one
    pub fn start_fetch(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Aborting in-flight catalog fetch");
            handle.abort();
        }

        let ticket = self.discover.begin_fetch();
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();
        let limit = self.limit;

        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch_top_anime(limit).await;
            if tx.send(FetchOutcome { ticket, result }).is_err() {
                debug!("Catalog fetch finished after the app closed");
            }
        }));
    }

    /// Wait for the next fetch outcome
    pub async fn next_fetch(&mut self) -> Option<FetchOutcome> {
        self.fetch_rx.recv().await
    }

    /// Apply a fetch outcome. Returns true when the visible screen changed.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        let applied = self.discover.finish_fetch(outcome.ticket, outcome.result);
        if applied {
            self.in_flight = None;
        }
        applied && self.my_list.is_none()
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        debug!(command = ?command, "Handling command");

        match command {
            Command::Help => Reply::show(HELP),
            Command::Quit => Reply::quit(),
            Command::List => Reply::show(self.render()),
            Command::Favorite(position) => self.favorite(position),
            Command::Show(position) => match self.row_at(position) {
                Some(row) => Reply::show(render::render_details(row)),
                None => Reply::show(format!("There is no entry {}.", position)),
            },
            Command::MyList => {
                if self.my_list.is_some() {
                    return Reply::show("You are already on My List.");
                }
                info!("Opening My List");
                self.my_list = Some(self.discover.open_my_list());
                Reply::show(self.render())
            }
            Command::Back => {
                if self.my_list.take().is_none() {
                    return Reply::show("You are already on Discover.");
                }
                info!("Returning to Discover");
                self.discover.resume();
                Reply::show(self.render())
            }
            command if self.my_list.is_some() => Reply::show(format!(
                "'{}' works on Discover; type 'back' first.",
                command_name(&command)
            )),
            Command::Search(query) => {
                self.discover.set_query(&query);
                Reply::show(self.render())
            }
            Command::Genre(genre) => {
                let wanted = genre.to_lowercase();
                let known = self
                    .discover
                    .available_genres()
                    .iter()
                    .any(|g| g.to_lowercase() == wanted);
                if !known && !self.discover.is_genre_selected(&genre) {
                    return Reply::show(format!(
                        "Unknown genre '{}'. Type 'genres' to see the choices.",
                        genre
                    ));
                }
                self.discover.toggle_genre(&genre);
                Reply::show(self.render())
            }
            Command::Genres => Reply::show(render::render_genres(&self.discover)),
            Command::Clear => {
                self.discover.clear_genres();
                Reply::show(self.render())
            }
            Command::Reload => {
                info!("Reloading catalog");
                self.start_fetch();
                Reply::show(self.render())
            }
        }
    }

    fn favorite(&mut self, position: usize) -> Reply {
        let Some(row) = self.row_at(position) else {
            return Reply::show(format!("There is no entry {}.", position));
        };
        let id = row.id().to_string();
        let title = row.record.title.clone();

        let message = match self.my_list.as_mut() {
            Some(my_list) => {
                my_list.unfavorite(&id);
                format!("Removed '{}' from favorites.", title)
            }
            None => match self.discover.toggle_favorite(&id) {
                Some(true) => format!("Added '{}' to favorites.", title),
                Some(false) => format!("Removed '{}' from favorites.", title),
                None => format!("'{}' is no longer in the catalog.", title),
            },
        };

        Reply::show(format!("{}\n{}", message, self.render()))
    }

    fn row_at(&self, position: usize) -> Option<&AnimeRow> {
        match &self.my_list {
            Some(my_list) => my_list.rows().at_position(position),
            None => self.discover.rows().at_position(position),
        }
    }

    /// The visible screen as text
    pub fn render(&self) -> String {
        match &self.my_list {
            Some(my_list) => render::render_my_list(my_list),
            None => render::render_discover(&self.discover),
        }
    }

    pub fn discover(&self) -> &DiscoverScreen {
        &self.discover
    }

    pub fn my_list(&self) -> Option<&MyListScreen> {
        self.my_list.as_ref()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Abort a fetch that is still running
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Search(_) => "search",
        Command::Genre(_) => "genre",
        Command::Genres => "genres",
        Command::Clear => "clear",
        Command::Reload => "reload",
        Command::Favorite(_) => "fav",
        Command::Show(_) => "show",
        Command::List => "list",
        Command::MyList => "mylist",
        Command::Back => "back",
        Command::Help => "help",
        Command::Quit => "quit",
    }
}

fn write_block(out: &mut impl Write, text: &str) -> Result<()> {
    writeln!(out, "{}", text).context("Failed to write output")?;
    write!(out, "{}", PROMPT).context("Failed to write prompt")?;
    out.flush().context("Failed to flush output")
}

/// Run the prompt until `quit` or end of input
pub async fn run<S, R, W>(app: &mut App<S>, input: R, out: &mut W) -> Result<()>
where
    S: CatalogSource + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    app.start_fetch();
    write_block(out, &format!("{}\n\n{}", app.render(), "Type 'help' for commands."))?;

    loop {
        tokio::select! {
            outcome = app.next_fetch() => {
                if let Some(outcome) = outcome {
                    if app.apply_fetch(outcome) {
                        write_block(out, &format!("\n{}", app.render()))?;
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    write!(out, "{}", PROMPT).context("Failed to write prompt")?;
                    out.flush().context("Failed to flush output")?;
                    continue;
                }

                let reply = match line.parse::<Command>() {
                    Ok(command) => app.handle(command),
                    Err(e) => {
                        warn!(input = %line, error = %e, "Invalid command");
                        Reply::show(e.to_string())
                    }
                };

                if reply.flow == Flow::Quit {
                    writeln!(out, "{}", reply.text).context("Failed to write output")?;
                    break;
                }
                write_block(out, &reply.text)?;
            }
        }
    }

    app.shutdown();
    info!(favorites = app.favorites().len(), "Session ended");
    Ok(())
}
