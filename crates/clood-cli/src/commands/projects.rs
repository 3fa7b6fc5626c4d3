//! Projects command - list, create, delete, export and import projects.

use std::path::PathBuf;

use colored::Colorize;
use clood::Project;

use super::Connection;

pub fn list(conn: &Connection, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = conn.session()?;
    let projects = session.projects()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    if projects.is_empty() {
        println!("{}", "No projects.".dimmed());
        return Ok(());
    }

    println!("{}", "Projects".cyan().bold());
    println!();
    for project in &projects {
        let casebase = if project.has_casebase {
            "casebase".green()
        } else {
            "no casebase".yellow()
        };
        println!(
            "  {}  {}  {} attributes, {}",
            project.id.as_deref().unwrap_or("-").white().bold(),
            project.name,
            project.attributes.len(),
            casebase
        );
        if !project.description.is_empty() {
            println!("      {}", project.description.dimmed());
        }
    }
    Ok(())
}

pub fn create(
    conn: &Connection,
    name: String,
    description: String,
    retain_duplicates: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.session()?;
    let project = Project::new(name)
        .with_description(description)
        .with_duplicates(retain_duplicates);
    let created = session.create_project(&project)?;

    println!(
        "{} {}",
        "Project id:".cyan().bold(),
        created.id.as_deref().unwrap_or("-").white()
    );
    Ok(())
}

pub fn delete(conn: &Connection, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.session()?;
    session.delete_project(id)?;
    Ok(())
}

pub fn export(conn: &Connection, id: &str, dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.session()?;
    let project = session.select_project(id)?;
    let path = project.export_to(&dir)?;

    println!("{} {}", "Exported to".cyan().bold(), path.display());
    Ok(())
}

pub fn import(conn: &Connection, file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let project = Project::import(&file)?;
    let mut session = conn.session()?;
    let created = session.create_project(&project)?;

    println!(
        "{} {} ({} attributes)",
        "Imported as".cyan().bold(),
        created.id.as_deref().unwrap_or("-").white(),
        created.attributes.len()
    );
    Ok(())
}
