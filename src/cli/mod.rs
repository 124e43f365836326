//! Command-line interface for secret-santa.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **draw**: Assign everyone a gift recipient and notify them
//! - **check**: Report whether a roster admits a complete assignment
//!
//! ## Usage
//!
//! ```text
//! # Preview the messages without sending anything
//! secret-santa draw family.json --dry-run
//!
//! # Reproducible draw with an extra couple excluded
//! secret-santa draw family.tsv --exclude johan:louise --seed 2024
//!
//! # Can this roster work at all?
//! secret-santa check family.json --format json
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::roster::Roster;
use crate::core::types::ExclusionPair;
use crate::matching::engine::EngineConfig;
use crate::parsing;

pub mod check;
pub mod draw;

#[derive(Parser)]
#[command(name = "secret-santa")]
#[command(version)]
#[command(about = "Draw secret santa assignments that respect couples and other exclusions")]
#[command(
    long_about = "secret-santa assigns every participant exactly one other participant to give a gift to.\n\nNobody draws themselves, and members of an exclusion pair (for example a couple) never draw each other. Assignments are found with a maximum bipartite matching, so a draw only fails when the exclusions make a complete assignment impossible."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw assignments and notify every participant
    Draw(draw::DrawArgs),

    /// Check whether a roster admits a complete assignment
    Check(check::CheckArgs),
}

/// Roster input shared by all commands
#[derive(clap::Args)]
pub struct RosterArgs {
    /// Roster file (JSON, TSV, or CSV)
    #[arg(required = true)]
    pub roster: PathBuf,

    /// Additional pair who must not draw each other, as NAME:NAME (repeatable)
    #[arg(short = 'x', long = "exclude", value_parser = parse_exclusion)]
    pub exclusions: Vec<ExclusionPair>,

    /// Stop the matching search after this many augmentation phases
    #[arg(long)]
    pub max_phases: Option<usize>,

    /// Seed for candidate shuffling; omit for a fresh random draw
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RosterArgs {
    /// Load the roster file and merge in exclusions given on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the roster file cannot be read or parsed.
    pub fn load(&self) -> anyhow::Result<Roster> {
        let roster = parsing::parse_roster_file(&self.roster)
            .with_context(|| format!("Failed to load roster {}", self.roster.display()))?;
        Ok(roster.with_exclusions(self.exclusions.iter().cloned()))
    }

    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_phases: self.max_phases,
        }
    }

    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn parse_exclusion(s: &str) -> Result<ExclusionPair, String> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:NAME, got '{s}'"))?;
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(format!("expected NAME:NAME, got '{s}'"));
    }
    ExclusionPair::new(a, b).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
