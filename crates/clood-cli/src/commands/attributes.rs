//! Attributes command - list, add, remove and configure a project's attributes.

use colored::Colorize;
use clood::{
    Attribute, AttributeType, Catalog, ParameterEditor, ParameterForm, SchemaEditor, Session,
    Similarity,
};

use crate::cli::ParamArgs;

use super::Connection;

pub fn list(
    conn: &Connection,
    project_id: &str,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = conn.project_session(project_id)?;
    let project = session.project().ok_or("No project selected")?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&project.attributes)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Attributes of".cyan().bold(),
        project.name.white()
    );
    println!();
    if project.attributes.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for attribute in &project.attributes {
        println!(
            "  {:<20} {:<18} {}",
            attribute.name.white().bold(),
            attribute.attr_type.to_string(),
            attribute.similarity.to_string().cyan()
        );
        if let Some(options) = &attribute.options {
            println!("  {:<20} {}", "", serde_json::to_string(options)?.dimmed());
        }
    }
    Ok(())
}

pub fn add(
    conn: &Connection,
    project_id: &str,
    name: String,
    attr_type: AttributeType,
    similarity: Similarity,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.project_session(project_id)?;
    let mut editor = schema_editor(&mut session)?;

    editor.add_attribute(&Attribute::new(name, attr_type, similarity))?;
    session.update_project(editor.into_project())?;
    Ok(())
}

pub fn remove(
    conn: &Connection,
    project_id: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.project_session(project_id)?;
    let mut editor = schema_editor(&mut session)?;

    editor
        .remove_attribute(name)
        .ok_or_else(|| format!("No attribute named '{}'", name))?;
    session.update_project(editor.into_project())?;
    Ok(())
}

pub fn configure(
    conn: &Connection,
    project_id: &str,
    name: &str,
    params: ParamArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = conn.project_session(project_id)?;
    let mut editor = schema_editor(&mut session)?;

    let index = editor
        .project()
        .attributes
        .iter()
        .position(|a| a.name == name)
        .ok_or_else(|| format!("No attribute named '{}'", name))?;
    let staged = editor.select_attribute(index)?;

    let mut parameters = ParameterEditor::open(&staged);
    apply_params(&mut parameters, &params)?;
    let edited = parameters.save()?;

    editor.change_attribute(index, &edited)?;
    session.update_project(editor.into_project())?;
    Ok(())
}

/// Schema editor over the session's active project, checked against the
/// server catalog or the built-in one when the server has none.
fn schema_editor(session: &mut Session) -> Result<SchemaEditor, Box<dyn std::error::Error>> {
    let catalog = session
        .load_catalog()
        .cloned()
        .unwrap_or_else(|_| Catalog::builtin());
    let project = session
        .project()
        .cloned()
        .ok_or("No project selected")?;
    Ok(SchemaEditor::new(project).with_catalog(catalog))
}

/// Apply the flags that fit the attribute's parameter form.
fn apply_params(
    parameters: &mut ParameterEditor,
    params: &ParamArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let similarity = parameters.attribute().similarity;
    match parameters.form_mut() {
        ParameterForm::Bounds(bounds) => {
            if let Some(min) = params.min {
                bounds.min = min;
            }
            if let Some(max) = params.max {
                bounds.max = max;
            }
            if params.jump.is_some() {
                bounds.jump = params.jump;
            }
        }
        ParameterForm::NumberDecay(decay) => {
            if let Some(scale) = &params.scale {
                decay.scale = scale
                    .trim()
                    .parse()
                    .map_err(|_| format!("Scale must be a number, got '{}'", scale))?;
            }
            if let Some(rate) = params.decay {
                decay.decay = rate;
            }
        }
        ParameterForm::DateDecay(decay) => {
            if let Some(scale) = &params.scale {
                decay.scale = scale.clone();
            }
            if let Some(rate) = params.decay {
                decay.decay = rate;
            }
        }
        ParameterForm::LocationDecay(decay) => {
            if let Some(scale) = &params.scale {
                decay.scale = scale.clone();
            }
            if let Some(rate) = params.decay {
                decay.decay = rate;
            }
        }
        ParameterForm::Table(table) => {
            for value in &params.values {
                table.add_value(value.as_str())?;
            }
            for value in &params.drop_values {
                table.remove_value(value)?;
            }
            table.update_grid();
            if let Some(symmetric) = params.symmetric {
                table.set_symmetric(symmetric);
            }
            for cell in &params.cells {
                let (query, case, score) = parse_cell(cell)?;
                // Symmetric tables edit the lower triangle; either order names the same pair.
                if let Err(e) = table.set_cell(query, case, score) {
                    if !table.is_symmetric() || query == case {
                        return Err(e.into());
                    }
                    table.set_cell(case, query, score)?;
                }
            }
        }
        ParameterForm::Enum(values) => {
            for value in &params.values {
                values.add(value.as_str())?;
            }
            for value in &params.drop_values {
                values.remove(value)?;
            }
        }
        ParameterForm::Ontology(ontology) => {
            if let Some(name) = &params.ontology {
                ontology.name = name.clone();
            }
            for source in &params.sources {
                ontology.add_source(source.as_str());
            }
        }
        ParameterForm::Vector(vector) => {
            if let Some(dimension) = params.dimension {
                vector.dimension = dimension;
            }
        }
        ParameterForm::Unset => {
            return Err(format!("Similarity '{}' takes no parameters", similarity).into());
        }
    }
    Ok(())
}

/// Parse `QUERY:CASE=SCORE`.
fn parse_cell(cell: &str) -> Result<(&str, &str, f64), String> {
    let invalid = || format!("Expected QUERY:CASE=SCORE, got '{}'", cell);
    let (pair, score) = cell.rsplit_once('=').ok_or_else(invalid)?;
    let (query, case) = pair.split_once(':').ok_or_else(invalid)?;
    let score = score.trim().parse().map_err(|_| invalid())?;
    Ok((query.trim(), case.trim(), score))
}
