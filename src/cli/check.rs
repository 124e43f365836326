use clap::Args;

use crate::cli::{OutputFormat, RosterArgs};
use crate::core::types::Participant;
use crate::matching::cycles::{self, CycleReport};
use crate::matching::engine::EngineOutcome;
use crate::matching::pipeline;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub roster: RosterArgs,
}

/// Result of checking a roster, without revealing any assignment
struct Feasibility {
    participants: usize,
    matched: usize,
    /// Participants nobody could be assigned to give to
    uncovered: Vec<Participant>,
    report: Option<CycleReport>,
}

impl Feasibility {
    fn from_outcome(outcome: &EngineOutcome, participants: &[Participant]) -> Self {
        let uncovered = participants
            .iter()
            .filter(|p| outcome.matching.giver_of(p).is_none())
            .cloned()
            .collect();
        Self {
            participants: participants.len(),
            matched: outcome.matching.len(),
            uncovered,
            report: cycles::validate(&outcome.matching, participants).ok(),
        }
    }

    fn is_feasible(&self) -> bool {
        self.report.is_some()
    }
}

/// Execute check subcommand
///
/// # Errors
///
/// Returns an error if the roster is invalid or admits no complete assignment.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CheckArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = args.roster.load()?;
    let mut rng = args.roster.rng();
    let outcome = pipeline::solve_roster(&roster, args.roster.engine_config(), &mut rng)?;

    if verbose {
        eprintln!(
            "Engine ran {} phases, {} augmenting paths",
            outcome.phases, outcome.augmentations
        );
        if outcome.truncated {
            eprintln!("Warning: phase limit reached; result may not be maximum");
        }
    }

    let feasibility = Feasibility::from_outcome(&outcome, &roster.participants());

    match format {
        OutputFormat::Text => print_text_check(&feasibility),
        OutputFormat::Json => print_json_check(&feasibility)?,
        OutputFormat::Tsv => print_tsv_check(&feasibility),
    }

    if !feasibility.is_feasible() {
        anyhow::bail!(
            "No complete assignment: only {} of {} participants can be matched",
            feasibility.matched,
            feasibility.participants
        );
    }
    Ok(())
}

fn print_text_check(feasibility: &Feasibility) {
    println!("Roster Check");
    println!("{}", "=".repeat(60));
    println!("  Participants: {}", feasibility.participants);
    println!("  Matched: {}", feasibility.matched);

    if let Some(report) = &feasibility.report {
        println!("  Feasible: yes");
        println!("  Example cycle lengths: {:?}", report.lengths());
    } else {
        println!("  Feasible: no");
        let names: Vec<&str> = feasibility.uncovered.iter().map(Participant::as_str).collect();
        println!("  Left without a giver: {}", names.join(", "));
        println!("\nTry removing exclusion pairs involving these participants.");
    }
}

fn print_json_check(feasibility: &Feasibility) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "participants": feasibility.participants,
        "matched": feasibility.matched,
        "feasible": feasibility.is_feasible(),
        "uncovered": feasibility.uncovered,
        "cycle_lengths": feasibility.report.as_ref().map(CycleReport::lengths),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_check(feasibility: &Feasibility) {
    println!("participants\tmatched\tfeasible");
    println!(
        "{}\t{}\t{}",
        feasibility.participants,
        feasibility.matched,
        feasibility.is_feasible()
    );
}
