//! Retrieve command - query a project's casebase for similar cases.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use colored::Colorize;
use clood::query::{explanation_series, export_best_k, features_from_values};

use super::{display_value, parse_assignments, Connection};

pub fn run(
    conn: &Connection,
    project_id: &str,
    topk: usize,
    explain: bool,
    export: Option<PathBuf>,
    json_output: bool,
    values: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let session = conn.project_session(project_id)?;
    let project = session.project().ok_or("No project selected")?;

    let features = features_from_values(&project.attributes, parse_assignments(values)?)?;
    let response = session.retrieve(features, topk, explain)?;

    if let Some(path) = &export {
        let file = File::create(path)
            .map_err(|e| format!("Could not create {}: {}", path.display(), e))?;
        export_best_k(BufWriter::new(file), &project.attributes, &response.best_k)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.recommended.is_empty() {
        println!("{}", "Recommended".cyan().bold());
        for (name, value) in &response.recommended {
            println!("  {:<20} {}", name, display_value(value).white());
        }
        println!();
    }

    println!(
        "{} {}",
        "Best".cyan().bold(),
        format!("{} of {}", response.best_k.len(), topk).dimmed()
    );
    for (rank, case) in response.best_k.iter().enumerate() {
        println!();
        println!(
            "  {} score {}",
            format!("#{}", rank + 1).white().bold(),
            format!("{:.4}", case.score).green()
        );
        for attribute in &project.attributes {
            let value = case
                .fields
                .get(&attribute.name)
                .map(display_value)
                .unwrap_or_default();
            println!("    {:<20} {}", attribute.name, value);
        }
        if explain {
            println!("    {}", "similarity by attribute".dimmed());
            for (field, similarity) in explanation_series(case) {
                println!("      {:<20} {:.4}", field, similarity);
            }
        }
    }

    if let Some(path) = export {
        println!();
        println!("{} {}", "Exported to".cyan().bold(), path.display());
    }
    Ok(())
}
