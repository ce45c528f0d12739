//! Text output for the command line
//!
//! Plain functions over values. Colouring is decided per call by a
//! [`Palette`], there is no process-wide colour state.

use crate::simulation::Turn;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Whether to wrap text in ANSI colour codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn highlight(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    /// `Error: <message>` line for stderr
    pub fn error(&self, message: &str) -> String {
        format!("{} {}", self.paint(RED, "Error:"), self.highlight(message))
    }
}

/// `Paths found:` followed by one `Path n: a -> b -> c` line per path
pub fn format_paths(paths: &[Vec<String>], palette: Palette) -> String {
    let mut text = palette.heading("Paths found:");
    text.push('\n');
    for (i, path) in paths.iter().enumerate() {
        text.push_str(&format!(
            "{} {}\n",
            palette.heading(&format!("Path {}:", i + 1)),
            path.join(" -> ")
        ));
    }
    text
}

/// `Turn n: T1-b T2-d` for a single turn
pub fn format_turn(turn: &Turn, palette: Palette) -> String {
    let moves: Vec<String> = turn.moves.iter().map(ToString::to_string).collect();
    format!(
        "{} {}",
        palette.highlight(&format!("Turn {}:", turn.number)),
        moves.join(" ")
    )
}

/// `Train movement:` followed by one line per turn
pub fn format_turns(turns: &[Turn], palette: Palette) -> String {
    let mut text = palette.heading("Train movement:");
    text.push('\n');
    for turn in turns {
        text.push_str(&format_turn(turn, palette));
        text.push('\n');
    }
    text
}
