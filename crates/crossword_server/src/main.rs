//! Crossword Games - Unified CLI
//!
//! Scores boards, replays scripted games and checks dictionaries.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use crossword_engine::Board;
use crossword_server::{GameManager, ReplayScript, ServerConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Score { board } => run_score(&config, &board),
        Command::Replay { script } => run_replay(&config, &script),
        Command::CheckDictionary => run_check_dictionary(&config),
    }
}

/// Layers config file, environment and flags.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<ServerConfig> {
    let config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    let mut config = config.with_env()?;
    if let Some(path) = &cli.dictionary {
        config.set_dictionary_path(path.clone());
    }
    if let Some(matcher) = cli.matcher {
        config.set_matcher(matcher);
    }
    Ok(config)
}

/// Score a single board file.
#[instrument(skip(config), fields(board = %path.display()))]
fn run_score(config: &ServerConfig, path: &Path) -> Result<()> {
    let board = read_board(path)?;
    let scorer = config.build_scorer()?;
    let result = scorer.score_board(&board);
    info!(total_score = result.total_score(), "Board scored");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Play a replay script through a fresh manager.
#[instrument(skip(config), fields(script = %path.display()))]
fn run_replay(config: &ServerConfig, path: &Path) -> Result<()> {
    let script = ReplayScript::load(path)?;
    let scorer = Arc::new(config.build_scorer()?);
    let manager = GameManager::in_memory(scorer, *config.max_board_dimension());
    let report = script
        .run(&manager, *config.default_board_dimension())
        .context("Replay failed")?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load the dictionary and print its size.
#[instrument(skip(config))]
fn run_check_dictionary(config: &ServerConfig) -> Result<()> {
    let dictionary = config.load_dictionary()?;
    println!(
        "{} words, longest {} letters",
        dictionary.len(),
        dictionary.longest_word()
    );
    Ok(())
}

/// Reads a board file, ignoring trailing zero-length lines.
///
/// A line of spaces is a row of empty squares and is kept.
fn read_board(path: &Path) -> Result<Board> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file '{}'", path.display()))?;
    let mut rows: Vec<&str> = content.lines().collect();
    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    Board::from_rows(rows.as_slice()).with_context(|| format!("Invalid board in '{}'", path.display()))
}
