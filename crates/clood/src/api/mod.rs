//! Remote CBR API access.

mod client;
mod config;
mod token;

pub use client::CloodClient;
pub use config::ClientConfig;
pub use token::{format_expiry, Token, TokenLifetime};
