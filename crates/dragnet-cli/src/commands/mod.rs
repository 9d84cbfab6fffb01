//! CLI command implementations.

pub mod cloud;
pub mod stack;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use dragnet_env::lifecycle::InvocationReport;

/// Print one line per phase plus its diagnostics.
pub(crate) fn print_report(report: &InvocationReport) {
    for phase in &report.phases {
        if phase.ok {
            println!("{} {}", "✓".green().bold(), phase.phase);
        } else {
            println!("{} {}", "✗".red().bold(), phase.phase);
        }
        for note in &phase.notes {
            println!("    {}", note);
        }
    }
}

/// Ask the operator to confirm a destructive phase, unless `--yes` was given.
pub(crate) fn confirm_destructive(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Cancelled".yellow());
    }
    Ok(confirmed)
}

/// Standard notice when an invocation requests no phases.
pub(crate) fn nothing_requested() {
    println!(
        "{} No lifecycle phases requested; see --help for the available flags",
        "!".yellow().bold()
    );
}
