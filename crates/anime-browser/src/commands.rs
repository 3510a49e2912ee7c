//! Prompt commands.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the title search; empty text clears it
    Search(String),
    /// Toggle a genre chip
    Genre(String),
    /// List genre chips
    Genres,
    /// Deselect all genre chips
    Clear,
    /// Toggle (Discover) or remove (My List) the favorite at a 1-based position
    Favorite(usize),
    /// Details of the entry at a 1-based position
    Show(usize),
    List,
    MyList,
    Back,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a list position")]
    BadPosition(String),
}

pub const HELP: &str = "\
Commands:
  search <text>   filter by title (no text clears the search)
  genre <name>    toggle a genre chip
  genres          list genre chips
  clear           deselect all genre chips
  fav <n>         add/remove entry n from favorites
  show <n>        show details of entry n
  list            redraw the current screen
  mylist          open My List
  back            return to Discover
  reload          fetch the catalog again
  help            show this help
  quit            exit";

fn position(name: &'static str, arg: &str) -> Result<usize, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(name));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseError::BadPosition(arg.to_string())),
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(ParseError::Empty),
            "search" | "s" | "/" => Ok(Command::Search(arg.to_string())),
            "genre" | "g" => {
                if arg.is_empty() {
                    Err(ParseError::MissingArgument("genre"))
                } else {
                    Ok(Command::Genre(arg.to_string()))
                }
            }
            "genres" => Ok(Command::Genres),
            "clear" => Ok(Command::Clear),
            "fav" | "f" => position("fav", arg).map(Command::Favorite),
            "show" => position("show", arg).map(Command::Show),
            "list" | "ls" => Ok(Command::List),
            "mylist" | "my" => Ok(Command::MyList),
            "back" | "discover" => Ok(Command::Back),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}
