//! Summary command - clean in memory and print enrollment aggregates.

use std::path::PathBuf;

use colored::Colorize;
use tanaw::{Cleaner, EnrollmentSummary};

pub fn run(file: PathBuf, json: bool, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let cleaned = Cleaner::new().analyze(&file)?;
    let summary = EnrollmentSummary::from_table(&cleaned.table);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Summary for".cyan().bold(),
        cleaned.source.file.white()
    );
    println!("Layout: {}", cleaned.layout.label().yellow());
    println!();

    println!(
        "Total enrollment: {}",
        summary.total_enrollment.to_string().white().bold()
    );
    println!(
        "  Male: {}   Female: {}",
        summary.total_male.to_string().white(),
        summary.total_female.to_string().white()
    );
    if let Some(schools) = summary.school_count {
        println!("Schools: {}", schools.to_string().white().bold());
    }

    if !summary.by_region.is_empty() {
        println!();
        println!("{}", "By region:".yellow().bold());
        for (region, total) in &summary.by_region {
            println!("  {:20} {:>12}", region, total);
        }
    }

    if verbose {
        println!();
        println!("{}", "By year level:".yellow().bold());
        for (level, total) in &summary.by_year_level {
            println!("  {:20} {:>12}", level, total);
        }

        println!();
        println!("{}", "By strand:".yellow().bold());
        for (strand, total) in &summary.by_strand {
            println!("  {:20} {:>12}", strand, total);
        }
    }

    Ok(())
}
