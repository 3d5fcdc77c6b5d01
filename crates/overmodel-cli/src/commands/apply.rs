//! Apply command implementation

use colored::Colorize;

use overmodel_core::apply::{CharDiff, DiffTag};
use overmodel_core::{ApplyGuard, ApplyOptions, ApplyReport, FileFailure};
use overmodel_fs::{ConfigLayout, NormalizedPath};

use crate::cli::ApplyArgs;
use crate::error::{CliError, Result};

/// Run the apply command
///
/// Compiles the models, then renders every template under
/// `<config-dir>/files` onto its target. Per-file failures are printed and
/// turn into [`CliError::ApplyFailed`] once every file has been attempted.
pub fn run_apply(args: &ApplyArgs) -> Result<()> {
    if !args.json {
        println!(
            "{} Compiling {} model director{}...",
            "=>".blue().bold(),
            args.model.model_dirs.len(),
            if args.model.model_dirs.len() == 1 { "y" } else { "ies" }
        );
    }
    let config = args.model.compiler().compile()?;

    let layout = ConfigLayout::new(
        NormalizedPath::new(&args.config_dir),
        NormalizedPath::new(&args.target_root),
    );
    let options = ApplyOptions {
        accept: args.accept.iter().collect(),
        dry_run: args.dry_run,
    };
    let report = ApplyGuard::new(layout).apply(&config, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::ApplyFailed {
            failed: report.failures.len(),
        })
    }
}

fn print_report(report: &ApplyReport) {
    for applied in &report.applied {
        let marker = if applied.written {
            "OK".green().bold()
        } else {
            "WOULD WRITE".cyan().bold()
        };
        let accepted = if applied.accepted { " accepted" } else { "" };
        println!(
            "{} {} ({}{})",
            marker,
            applied.file.cyan(),
            applied.state.to_string().dimmed(),
            accepted.dimmed()
        );
    }

    for failure in &report.failures {
        match failure {
            FileFailure::UnresolvedVariable { file, variables } => {
                println!("{} {}", "UNRESOLVED".yellow().bold(), file.cyan());
                for variable in variables {
                    println!("   {} {{{{{}}}}}", "-".yellow(), variable);
                }
            }
            FileFailure::DriftConflict { file, diff } => {
                println!(
                    "{} {} was modified since the last apply:",
                    "DRIFTED".red().bold(),
                    file.cyan()
                );
                println!("{}", colored_diff(diff));
            }
            FileFailure::Io { file, message } => {
                println!("{} {}: {}", "ERROR".red().bold(), file.cyan(), message);
            }
        }
    }

    println!();
    if report.is_success() {
        let verb = if report.dry_run { "would be applied" } else { "applied" };
        println!(
            "{} {} file(s) {}.",
            "OK".green().bold(),
            report.applied.len(),
            verb
        );
    } else {
        println!(
            "{} {} applied, {} failed.",
            "FAILED".red().bold(),
            report.applied.len(),
            report.failures.len()
        );
        if report
            .failures
            .iter()
            .any(|f| matches!(f, FileFailure::DriftConflict { .. }))
        {
            println!(
                "Keep local edits by updating the templates, or re-run with {} to overwrite.",
                "--accept <path>".cyan()
            );
        }
    }
}

/// Inline diff: deletions red, insertions green, unchanged text dimmed.
fn colored_diff(diff: &CharDiff) -> String {
    diff.parts
        .iter()
        .map(|part| match part.tag {
            DiffTag::Equal => part.text.dimmed().to_string(),
            DiffTag::Delete => part.text.red().strikethrough().to_string(),
            DiffTag::Insert => part.text.green().underline().to_string(),
        })
        .collect()
}
