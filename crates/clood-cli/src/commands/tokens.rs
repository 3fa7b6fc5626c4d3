//! Tokens command - list, create and delete API tokens.

use colored::Colorize;
use clood::{Token, TokenLifetime};

use super::Connection;

pub fn list(conn: &Connection, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = conn.session()?.tokens()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
        return Ok(());
    }

    if tokens.is_empty() {
        println!("{}", "No tokens.".dimmed());
        return Ok(());
    }

    println!("{}", "Tokens".cyan().bold());
    println!();
    for token in &tokens {
        let expiry = if token.is_expired() {
            format!("expired {}", token.expiry_display()).red()
        } else {
            format!("expires {}", token.expiry_display()).normal()
        };
        println!(
            "  {}  {}  {}",
            token.id.as_deref().unwrap_or("-").white().bold(),
            token.name,
            expiry
        );
        if let Some(description) = &token.description {
            println!("      {}", description.dimmed());
        }
    }
    Ok(())
}

pub fn create(
    conn: &Connection,
    name: String,
    lifetime: TokenLifetime,
    description: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut token = Token::new(name, lifetime);
    if let Some(description) = description {
        token = token.with_description(description);
    }
    let created = conn.session()?.create_token(&token)?;

    println!(
        "{} {}",
        "Token id:".cyan().bold(),
        created.id.as_deref().unwrap_or("-").white()
    );
    println!("{} {}", "Expires:".cyan().bold(), created.expiry_display());
    if let Some(secret) = &created.token {
        println!("{} {}", "Secret:".cyan().bold(), secret.white().bold());
        println!("{}", "Copy it now; it will not be shown again.".yellow());
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    conn.session()?.delete_token(id)?;
    Ok(())
}
