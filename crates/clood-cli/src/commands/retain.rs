//! Retain command - add one case to a project's casebase.

use clood::Case;

use super::{parse_assignments, Connection};

pub fn run(
    conn: &Connection,
    project_id: &str,
    values: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let session = conn.project_session(project_id)?;
    let project = session.project().ok_or("No project selected")?;

    let case: Case = parse_assignments(values)?.into_iter().collect();
    if let Some(unknown) = case.keys().find(|name| !project.has_attribute(name)) {
        return Err(format!("Unknown attribute '{}'", unknown).into());
    }

    session.retain(case)?;
    Ok(())
}
