//! Ingest command - validate a case file and optionally upload it.

use std::path::PathBuf;

use colored::Colorize;

use super::{display_value, Connection};

/// Cases shown as a preview in verbose mode.
const PREVIEW_ROWS: usize = 5;

pub fn run(
    conn: &Connection,
    file: PathBuf,
    project_id: &str,
    upload: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.project_session(project_id)?;
    let batch = session.ingest(&file)?;

    println!("{} {}", "Ingested".cyan().bold(), file.display().to_string().white());
    if let Some(source) = &batch.source {
        println!("  Cases:   {}", source.row_count.to_string().white().bold());
        println!("  Columns: {}", source.column_count);
        println!("  Size:    {} bytes", source.size_bytes);
        println!("  Hash:    {}", source.hash.dimmed());
    }

    if verbose {
        println!();
        println!("  {}", batch.column_heads.join(" | ").bold());
        for case in batch.data.iter().take(PREVIEW_ROWS) {
            let row: Vec<String> = case.values().map(display_value).collect();
            println!("  {}", row.join(" | "));
        }
        if batch.len() > PREVIEW_ROWS {
            println!("  {}", format!("... {} more", batch.len() - PREVIEW_ROWS).dimmed());
        }
    }

    if upload {
        session.save_casebase(&batch)?;
    } else {
        println!();
        println!("{}", "Run again with --upload to add these cases.".dimmed());
    }
    Ok(())
}
