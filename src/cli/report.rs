//! Human-readable and JSON reports

use std::path::Path;

use colored::Colorize;

use crate::common::Result;
use crate::testing::{ExecutionResult, SuiteResult};

/// Print every file's results followed by the overall summary
pub fn print_suite(suite: &SuiteResult) {
    for file in &suite.files {
        print_file(file);
    }

    for error in &suite.errors {
        println!(
            "\n{} {}\n  {}",
            "Broken Test File:".red().bold(),
            error.file.white().bold(),
            error.message.dimmed()
        );
    }

    let summary = format!(
        "{} passed, {} failed, {} ignored, {} file error(s)",
        suite.passed(),
        suite.failed(),
        suite.ignored(),
        suite.errors.len()
    );

    if suite.is_success() {
        println!("\n{} {}\n", "✓".green().bold(), summary.green());
    } else {
        println!("\n{} {}\n", "✗".red().bold(), summary.red());
    }
}

fn print_file(result: &ExecutionResult) {
    println!(
        "\n{} {}",
        "Test File:".blue().bold(),
        result.file.white().bold()
    );

    for (name, passed) in &result.outcomes {
        if *passed {
            println!("  {} {}", "✓".green(), name);
            continue;
        }
        println!("  {} {}", "✗".red(), name);
        if let Some(failure) = result.failures.get(name) {
            println!("      {}", failure.to_string().dimmed());
        }
    }

    for name in &result.duplicates {
        println!(
            "  {} scenario name '{}' is used more than once; only the last result is shown",
            "!".yellow(),
            name
        );
    }

    let mut counts = format!("  {} passed, {} failed", result.passed(), result.failed());
    if result.ignored > 0 {
        counts.push_str(&format!(", {} ignored", result.ignored));
    }
    if result.filtered > 0 {
        counts.push_str(&format!(", {} filtered out", result.filtered));
    }
    println!("{}", counts.dimmed());
}

/// Write the suite result as pretty JSON
pub fn write_report(suite: &SuiteResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(suite)?;
    std::fs::write(path, json)?;
    Ok(())
}
