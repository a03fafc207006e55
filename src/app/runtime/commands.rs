use super::session::Tab;

/// Line command typed in the browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// Switch the shown tab.
    Tab(Tab),
    /// Load the next page of the shown tab.
    More,
    /// Reload the shown tab from the first page.
    Refresh,
    /// Search listings; empty text clears the search.
    Search(String),
    /// Open a conversation's messages.
    Open(String),
    /// Mark a listing as favorite.
    Favorite(String),
    /// Remove a listing from favorites.
    Unfavorite(String),
    /// Print the command summary.
    Help,
    /// Leave the browser.
    Quit,
    /// Anything else, kept for the error message.
    Unknown(String),
}

/// What: Parse one input line.
///
/// Inputs:
/// - `line`: Raw line from stdin
///
/// Output:
/// - Parsed command; missing required arguments yield `Unknown`.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));
    match (word.to_ascii_lowercase().as_str(), rest) {
        ("tab" | "t", name) => Tab::from_name(name)
            .map_or_else(|| Command::Unknown(line.to_string()), Command::Tab),
        ("more" | "n" | "next", _) => Command::More,
        ("refresh" | "r", _) => Command::Refresh,
        ("search" | "s" | "/", text) => Command::Search(text.to_string()),
        ("open" | "o", id) if !id.is_empty() => Command::Open(id.to_string()),
        ("fav", id) if !id.is_empty() => Command::Favorite(id.to_string()),
        ("unfav", id) if !id.is_empty() => Command::Unfavorite(id.to_string()),
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Tab::from_name(line)
            .map_or_else(|| Command::Unknown(line.to_string()), Command::Tab),
    }
}
