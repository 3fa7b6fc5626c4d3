//! Catalog command - show the similarity options per attribute type.

use colored::Colorize;
use clood::Catalog;

use super::Connection;

pub fn run(
    conn: &Connection,
    offline: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = if offline {
        Catalog::builtin()
    } else {
        conn.session()?.load_catalog()?.clone()
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let source = if offline { "built-in" } else { "server" };
    println!(
        "{} {}",
        "Similarity catalog".cyan().bold(),
        format!("({})", source).dimmed()
    );
    for option in &catalog.attribute_options {
        println!();
        println!("  {}", option.type_name.white().bold());
        println!("    similarity: {}", option.similarity_types.join(", "));
        if !option.reuse_strategy.is_empty() {
            println!("    reuse:      {}", option.reuse_strategy.join(", "));
        }
    }
    Ok(())
}
