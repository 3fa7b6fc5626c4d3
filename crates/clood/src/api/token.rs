//! API access tokens.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A programmatic-access token as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "id__", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expiry as epoch milliseconds.
    pub expiry: i64,
    /// The secret; only present right after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Token {
    /// A token request expiring `lifetime` from now.
    pub fn new(name: impl Into<String>, lifetime: TokenLifetime) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            expiry: lifetime.expiry_from(Utc::now()),
            token: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_expired(&self) -> bool {
        self.expiry <= Utc::now().timestamp_millis()
    }

    /// Expiry in local time, e.g. `9:05:00 3/7/2024`.
    pub fn expiry_display(&self) -> String {
        format_expiry(self.expiry, &Local)
    }
}

/// Creation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLifetime {
    NinetyMinutes,
    OneDay,
    SevenDays,
    ThirtyDays,
}

impl TokenLifetime {
    pub const ALL: [TokenLifetime; 4] = [
        TokenLifetime::NinetyMinutes,
        TokenLifetime::OneDay,
        TokenLifetime::SevenDays,
        TokenLifetime::ThirtyDays,
    ];

    pub fn duration(&self) -> Duration {
        match self {
            TokenLifetime::NinetyMinutes => Duration::minutes(90),
            TokenLifetime::OneDay => Duration::days(1),
            TokenLifetime::SevenDays => Duration::days(7),
            TokenLifetime::ThirtyDays => Duration::days(30),
        }
    }

    /// Expiry in epoch milliseconds counted from `now`.
    pub fn expiry_from(&self, now: DateTime<Utc>) -> i64 {
        (now + self.duration()).timestamp_millis()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenLifetime::NinetyMinutes => "90m",
            TokenLifetime::OneDay => "1d",
            TokenLifetime::SevenDays => "7d",
            TokenLifetime::ThirtyDays => "30d",
        }
    }
}

impl fmt::Display for TokenLifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenLifetime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenLifetime::ALL
            .iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown token lifetime: {} (use 90m, 1d, 7d or 30d)", s))
    }
}

/// Format epoch milliseconds as `H:MM:00 D/M/YYYY` in `tz`.
pub fn format_expiry<Tz: TimeZone>(millis: i64, tz: &Tz) -> String {
    match tz.timestamp_millis_opt(millis).single() {
        Some(dt) => format!(
            "{}:{:02}:00 {}/{}/{}",
            dt.hour(),
            dt.minute(),
            dt.day(),
            dt.month(),
            dt.year()
        ),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lifetimes() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let start = now.timestamp_millis();
        assert_eq!(
            TokenLifetime::NinetyMinutes.expiry_from(now) - start,
            90 * 60 * 1000
        );
        assert_eq!(
            TokenLifetime::ThirtyDays.expiry_from(now) - start,
            30 * 24 * 60 * 60 * 1000
        );
        assert_eq!("7D".parse::<TokenLifetime>(), Ok(TokenLifetime::SevenDays));
        assert!("1y".parse::<TokenLifetime>().is_err());
    }

    #[test]
    fn test_format_expiry() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(format_expiry(dt.timestamp_millis(), &Utc), "9:05:00 7/3/2024");
    }

    #[test]
    fn test_wire_shape() {
        let token: Token = serde_json::from_value(json!({
            "id__": "t1", "name": "ci", "expiry": 1700000000000i64
        }))
        .unwrap();
        assert_eq!(token.id.as_deref(), Some("t1"));
        assert!(token.token.is_none());
        assert!(token.is_expired());

        let fresh = Token::new("ci", TokenLifetime::OneDay);
        assert!(!fresh.is_expired());
        let body = serde_json::to_value(&fresh).unwrap();
        assert!(body.get("id__").is_none());
    }
}
