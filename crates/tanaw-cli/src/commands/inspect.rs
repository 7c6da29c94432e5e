//! Inspect command - detect the layout and preview the cleaned table.

use std::path::PathBuf;

use colored::Colorize;
use tanaw::Cleaner;

pub fn run(
    file: PathBuf,
    rows: usize,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let cleaned = Cleaner::new().analyze(&file)?;

    if json {
        let payload = serde_json::json!({
            "source": cleaned.source,
            "layout": cleaned.layout,
            "headers": cleaned.table.headers,
            "preview": cleaned.table.rows.iter().take(rows).collect::<Vec<_>>(),
            "repairs": cleaned.report.repairs,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "{} {} ({}, {} bytes)",
        "File".cyan().bold(),
        cleaned.source.file.white(),
        cleaned.source.format,
        cleaned.source.size_bytes
    );
    match cleaned.layout {
        tanaw::HeaderLayout::AlreadyCanonical => {
            println!("Layout: {}", cleaned.layout.label().yellow().bold());
        }
        tanaw::HeaderLayout::SchoolLevelRaw { header_row }
        | tanaw::HeaderLayout::RegionLevelRaw { header_row } => {
            println!(
                "Layout: {} (header at row {})",
                cleaned.layout.label().yellow().bold(),
                header_row + 1
            );
        }
    }
    if verbose {
        println!("Hash:   {}", cleaned.source.hash);
    }

    println!();
    println!("{}", "Headers:".yellow().bold());
    for (i, header) in cleaned.table.headers.iter().enumerate() {
        println!("  {:3} {}", i + 1, header);
    }

    println!();
    println!(
        "{} (first {} of {}):",
        "Rows".yellow().bold(),
        rows.min(cleaned.table.rows.len()),
        cleaned.table.rows.len()
    );
    for row in cleaned.table.rows.iter().take(rows) {
        println!("  {}", row.join(" | "));
    }

    if !cleaned.report.repairs.is_empty() {
        println!();
        println!(
            "{} repair(s) would be applied",
            cleaned.report.repairs.len().to_string().white().bold()
        );
    }

    Ok(())
}
