use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{OutputFormat, RosterArgs};
use crate::matching::pipeline::{self, Draw};
use crate::notify::{self, Notifier, PreviewNotifier, SendmailNotifier, DEFAULT_SENDMAIL_PATH};

#[derive(Args)]
pub struct DrawArgs {
    #[command(flatten)]
    pub roster: RosterArgs,

    /// Print the messages instead of sending them (to stdout for text
    /// output, stderr otherwise)
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the sendmail binary
    #[arg(long, default_value = DEFAULT_SENDMAIL_PATH)]
    pub sendmail: PathBuf,
}

/// Execute draw subcommand
///
/// # Errors
///
/// Returns an error if the roster is invalid, no complete assignment exists,
/// or a message cannot be delivered.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DrawArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let roster = args.roster.load()?;

    if verbose {
        eprintln!(
            "Loaded {} participants and {} exclusion pairs",
            roster.len(),
            roster.exclusions.len()
        );
    }

    let mut rng = args.roster.rng();
    let result = pipeline::draw(&roster, args.roster.engine_config(), &mut rng)?;

    if verbose {
        eprintln!(
            "Matching found after {} phases ({} from greedy seed, {} augmenting paths)",
            result.outcome.phases, result.outcome.seed_size, result.outcome.augmentations
        );
    }

    let mut notifier: Box<dyn Notifier> = match (args.dry_run, format) {
        (true, OutputFormat::Text) => Box::new(PreviewNotifier::new(std::io::stdout())),
        (true, _) => Box::new(PreviewNotifier::new(std::io::stderr())),
        (false, _) => Box::new(SendmailNotifier::new(args.sendmail.clone())),
    };
    let sent = notify::notify_all(result.matching(), &roster, notifier.as_mut())?;
    drop(notifier);

    match format {
        OutputFormat::Text => print_text_summary(&result, sent, args.dry_run),
        OutputFormat::Json => print_json_summary(&result, sent, args.dry_run)?,
        OutputFormat::Tsv => print_tsv_summary(&result, sent),
    }
    std::io::stdout().flush()?;

    Ok(())
}

fn print_text_summary(result: &Draw, sent: usize, dry_run: bool) {
    println!("Secret Santa Draw");
    println!("{}", "=".repeat(60));
    println!("  Participants: {}", result.report.total());
    for cycle in &result.report.cycles {
        println!("  Cycle with {} people", cycle.len());
    }
    if result.report.swap_count() > 0 {
        println!("  Direct swaps: {}", result.report.swap_count());
    }
    if dry_run {
        println!("\nDry run: {sent} messages previewed, none sent.");
    } else {
        println!("\n{sent} messages sent.");
    }
}

fn print_json_summary(result: &Draw, sent: usize, dry_run: bool) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "participants": result.report.total(),
        "cycle_lengths": result.report.lengths(),
        "swaps": result.report.swap_count(),
        "phases": result.outcome.phases,
        "augmentations": result.outcome.augmentations,
        "messages": sent,
        "dry_run": dry_run,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(result: &Draw, sent: usize) {
    println!("participants\tcycles\tlongest_cycle\tswaps\tmessages");
    println!(
        "{}\t{}\t{}\t{}\t{}",
        result.report.total(),
        result.report.cycles.len(),
        result.report.longest(),
        result.report.swap_count(),
        sent
    );
}
