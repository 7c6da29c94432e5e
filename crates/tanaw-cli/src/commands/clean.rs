//! Clean command - clean a raw file and write the canonical CSV.

use std::path::PathBuf;

use colored::Colorize;
use tanaw::{Cleaner, CleanerConfig, RepairKind, SanitizerConfig};

pub fn run(
    file: PathBuf,
    output_dir: Option<PathBuf>,
    max_per_cell: Option<i64>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut config = CleanerConfig {
        output_dir,
        ..CleanerConfig::default()
    };
    if let Some(max) = max_per_cell {
        config.sanitizer = SanitizerConfig { max_per_cell: max };
    }

    if !json {
        println!(
            "{} {}",
            "Cleaning".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let outcome = Cleaner::with_config(config).clean(&file)?;
    let cleaned = &outcome.cleaned;

    if json {
        let payload = serde_json::json!({
            "output_path": outcome.output_path,
            "source": cleaned.source,
            "report": cleaned.report,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Detected layout: {}",
        cleaned.layout.label().yellow().bold()
    );
    println!(
        "{} rows in, {} rows out, {} columns",
        cleaned.report.rows_in.to_string().white().bold(),
        cleaned.report.rows_out.to_string().white().bold(),
        cleaned.report.columns_out.to_string().white().bold()
    );

    let dropped = cleaned.report.rows_dropped();
    if dropped > 0 {
        println!(
            "{} {} implausible row(s)",
            "Dropped".red().bold(),
            dropped.to_string().white()
        );
    }

    let duplicates = cleaned.table.duplicate_names();
    if !duplicates.is_empty() {
        println!(
            "{} duplicate column name(s): {}",
            "Warning:".yellow().bold(),
            duplicates.join(", ")
        );
    }

    if verbose && !cleaned.report.repairs.is_empty() {
        println!();
        println!("{}", "Repairs:".yellow().bold());
        for repair in &cleaned.report.repairs {
            let scope = match (&repair.column, repair.row) {
                (Some(col), Some(row)) => format!("{col} row {row}"),
                (Some(col), None) => col.clone(),
                (None, Some(row)) => format!("row {row}"),
                (None, None) => String::new(),
            };
            println!("  {:22} {:28} {}", repair.kind.label(), scope, repair.detail);
        }
    } else if !cleaned.report.repairs.is_empty() {
        let unmapped = cleaned.report.count(RepairKind::UnmappedHeader);
        println!(
            "Applied {} repair(s){} (run with -v for details)",
            cleaned.report.repairs.len().to_string().white().bold(),
            if unmapped > 0 {
                format!(", {unmapped} header(s) unmapped")
            } else {
                String::new()
            }
        );
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        outcome.output_path.display().to_string().white()
    );

    Ok(())
}
