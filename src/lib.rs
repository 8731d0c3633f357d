pub mod grid;
pub mod outcome;
pub mod path;
pub mod search;
pub mod sim;
pub mod unit;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use grid::{Cell, Grid, Position, Scenario, Spawn};
pub use outcome::Outcome;
pub use path::{find_route, Route};
pub use search::{PowerSearch, SearchResult, DEFAULT_MAX_ATTACK, DEFAULT_MIN_ATTACK};
pub use sim::{Battle, BattleConfig, RoundReport, DEFAULT_MAX_ROUNDS};
pub use unit::{Faction, Unit, UnitId, UNIT_DEFAULT_ATTACK, UNIT_DEFAULT_HEALTH};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid character({c}) for map at {position}.")]
    InvalidMapCharacter { c: char, position: Position },
    #[error("Expect {expected} column(s) in each row, given {given}.")]
    InconsistentRow { expected: usize, given: usize },
    #[error("No row found in given map.")]
    EmptyMap,
    #[error("Row {row} of map follows a blank line, expect rows to be contiguous.")]
    RowAfterBlankLine { row: usize },
    #[error("No unit found in given map, expect at least one.")]
    NoUnits,
    #[error("Unit can't move to {position}, it's not open.")]
    InvalidMoveTarget { position: Position },
    #[error("No faction is wiped out after {rounds} full round(s).")]
    NoWinnerWithinBound { rounds: u32 },
    #[error("Attack power({attack}) must be at least 1.")]
    InvalidAttackPower { attack: i32 },
    #[error("No attack power in [{min}, {max}] wins without losses.")]
    PowerNotFound { min: i32, max: i32 },
}

#[derive(Debug, Parser)]
pub struct Part1CLIArgs {
    pub input_path: PathBuf,
    #[arg(long, default_value_t = UNIT_DEFAULT_ATTACK, value_parser = clap::value_parser!(i32).range(1..))]
    pub elf_attack: i32,
    #[arg(long, default_value_t = UNIT_DEFAULT_ATTACK, value_parser = clap::value_parser!(i32).range(1..))]
    pub goblin_attack: i32,
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: u32,
}

#[derive(Debug, Parser)]
pub struct Part2CLIArgs {
    pub input_path: PathBuf,
    #[arg(long, default_value_t = DEFAULT_MIN_ATTACK, value_parser = clap::value_parser!(i32).range(1..))]
    pub min_attack: i32,
    #[arg(long, default_value_t = DEFAULT_MAX_ATTACK, value_parser = clap::value_parser!(i32).range(1..))]
    pub max_attack: i32,
    #[arg(long, default_value_t = UNIT_DEFAULT_ATTACK, value_parser = clap::value_parser!(i32).range(1..))]
    pub goblin_attack: i32,
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: u32,
    /// Try every attack power in order instead of binary searching.
    #[arg(long)]
    pub linear: bool,
}

/// Logs go to stderr, filtered by `RUST_LOG` (`info` if unset).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn read_scenario<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = grid::ScenarioBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} in given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_row(line.as_str())
            .with_context(|| format!("Failed to parse line {} of map.", ind + 1))?;
    }

    Ok(builder.build()?)
}
