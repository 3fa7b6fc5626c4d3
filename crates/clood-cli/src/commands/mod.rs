//! CLI command implementations.

pub mod attributes;
pub mod catalog;
pub mod ingest;
pub mod mapping;
pub mod projects;
pub mod retain;
pub mod retrieve;
pub mod tokens;

use serde_json::Value;

use clood::{ClientConfig, CloodClient, Session};

use crate::console::ConsoleNotifier;

/// Connection flags; unset ones fall back to the `CLOOD_*` environment.
pub struct Connection {
    pub api_url: Option<String>,
    pub token: Option<String>,
}

impl Connection {
    fn config(&self) -> clood::Result<ClientConfig> {
        let mut config = match &self.api_url {
            Some(url) => {
                let mut config = ClientConfig::new(url);
                if let Ok(token) = std::env::var("CLOOD_TOKEN") {
                    if !token.is_empty() {
                        config.token = Some(token);
                    }
                }
                config
            }
            None => ClientConfig::from_env()?,
        };
        if let Some(token) = &self.token {
            config.token = Some(token.clone());
        }
        Ok(config)
    }

    /// A fresh session reporting to the terminal.
    pub fn session(&self) -> clood::Result<Session> {
        let client = CloodClient::new(self.config()?)?;
        Ok(Session::new(client, Box::new(ConsoleNotifier)))
    }

    /// A session with the project `id` active.
    pub fn project_session(&self, id: &str) -> clood::Result<Session> {
        let mut session = self.session()?;
        session.select_project(id)?;
        Ok(session)
    }
}

/// Parse `name=value` arguments; values are JSON literals or plain text.
pub fn parse_assignments(args: &[String]) -> Result<Vec<(String, Value)>, String> {
    args.iter()
        .map(|arg| {
            let (name, raw) = arg
                .split_once('=')
                .ok_or_else(|| format!("Expected NAME=VALUE, got '{}'", arg))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("Missing attribute name in '{}'", arg));
            }
            let value = serde_json::from_str(raw.trim())
                .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
            Ok((name.to_string(), value))
        })
        .collect()
}

/// Render a value for a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
