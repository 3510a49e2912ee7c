//! Anime Browser - browse the top anime listing from the terminal.
//!
//! Two screens share one favorites store: Discover shows the fetched
//! catalog with search and genre filters, My List shows the favorites taken
//! from a snapshot of that catalog.

pub mod app;
pub mod commands;
pub mod list;
pub mod render;
pub mod screens;

pub use app::{run, App, Flow, Reply};
pub use commands::Command;
pub use screens::{DiscoverScreen, DiscoverState, FetchTicket, MyListScreen};
