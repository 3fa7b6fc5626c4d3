//! Mapping command - create the casebase index for a project.

use colored::Colorize;

use super::Connection;

pub fn run(conn: &Connection, project_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.project_session(project_id)?;
    if session.project().is_some_and(|p| p.has_casebase) {
        println!(
            "{}",
            "Project already has a casebase.".yellow()
        );
    }
    session.create_index_mapping()?;
    Ok(())
}
