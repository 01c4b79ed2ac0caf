//! Command-line interface for crossword_games.

use clap::{Parser, Subcommand};
use crossword_engine::MatcherKind;
use std::path::PathBuf;

/// Crossword Games - letter placement game engine and scorer
#[derive(Parser, Debug)]
#[command(name = "crossword_games")]
#[command(about = "Crossword game engine and board scorer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dictionary file, overriding config and environment
    #[arg(short, long, global = true)]
    pub dictionary: Option<PathBuf>,

    /// Matcher implementation (trie or substring)
    #[arg(short, long, global = true)]
    pub matcher: Option<MatcherKind>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score a board file and print the result as JSON
    Score {
        /// Board file: one row per line, `.` or space for empty squares
        #[arg(short, long)]
        board: PathBuf,
    },

    /// Play a TOML replay script and print the final state as JSON
    Replay {
        /// Path to the replay script
        #[arg(short, long)]
        script: PathBuf,
    },

    /// Load the dictionary and report its size
    CheckDictionary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "crossword_games",
            "score",
            "--board",
            "b.txt",
            "--matcher",
            "substring",
        ])
        .unwrap();
        assert_eq!(cli.matcher, Some(MatcherKind::Substring));
        assert!(matches!(cli.command, Command::Score { ref board } if board == &PathBuf::from("b.txt")));
    }

    #[test]
    fn test_rejects_unknown_matcher() {
        assert!(Cli::try_parse_from(["crossword_games", "-m", "regex", "check-dictionary"]).is_err());
    }
}
