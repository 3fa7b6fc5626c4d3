//! Clood CLI - case-base configuration, ingestion and query toolkit.

mod cli;
mod commands;
mod console;

use clap::Parser;
use cli::{AttributeAction, Cli, Commands, ProjectAction, TokenAction};
use commands::Connection;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let conn = Connection {
        api_url: cli.api_url,
        token: cli.token,
    };

    let result = match cli.command {
        Commands::Projects { action } => match action {
            ProjectAction::List { json } => commands::projects::list(&conn, json),
            ProjectAction::Create {
                name,
                description,
                retain_duplicates,
            } => commands::projects::create(&conn, name, description, retain_duplicates),
            ProjectAction::Delete { id } => commands::projects::delete(&conn, &id),
            ProjectAction::Export { id, dir } => commands::projects::export(&conn, &id, dir),
            ProjectAction::Import { file } => commands::projects::import(&conn, file),
        },

        Commands::Attributes { action } => match action {
            AttributeAction::List { project, json } => {
                commands::attributes::list(&conn, &project, json)
            }
            AttributeAction::Add {
                project,
                name,
                attr_type,
                similarity,
            } => commands::attributes::add(&conn, &project, name, attr_type, similarity),
            AttributeAction::Remove { project, name } => {
                commands::attributes::remove(&conn, &project, &name)
            }
            AttributeAction::Configure {
                project,
                name,
                params,
            } => commands::attributes::configure(&conn, &project, &name, params),
        },

        Commands::Catalog { offline, json } => commands::catalog::run(&conn, offline, json),

        Commands::Ingest {
            file,
            project,
            upload,
        } => commands::ingest::run(&conn, file, &project, upload, cli.verbose),

        Commands::Mapping { project } => commands::mapping::run(&conn, &project),

        Commands::Retrieve {
            project,
            topk,
            explain,
            export,
            json,
            values,
        } => commands::retrieve::run(&conn, &project, topk, explain, export, json, &values),

        Commands::Retain { project, values } => commands::retain::run(&conn, &project, &values),

        Commands::Tokens { action } => match action {
            TokenAction::List { json } => commands::tokens::list(&conn, json),
            TokenAction::Create {
                name,
                lifetime,
                description,
            } => commands::tokens::create(&conn, name, lifetime, description),
            TokenAction::Delete { id } => commands::tokens::delete(&conn, &id),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "clood=debug" } else { "clood=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
