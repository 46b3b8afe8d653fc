use std::{str::FromStr, time::Duration};

use crate::{
    error::{BotError, Result},
    format::Locale,
};

pub const DEFAULT_BALANCE_URL: &str = "https://status.joystream.org/cashout/balance";
pub const DEFAULT_STATUS_URL: &str = "https://status.joystream.org/status";
pub const DEFAULT_SCORING_URL: &str =
    "https://raw.githubusercontent.com/Joystream/founding-members/main/data/fm-info.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    // Parsed for compatibility with existing deployments; nothing listens on it.
    pub port: u16,
    pub locale: Locale,
    pub balance_url: String,
    pub status_url: String,
    pub scoring_url: String,
    pub poll_interval: Duration,
    pub reply_ttl: Duration,
    pub scoring_refresh: Duration,
}

impl Config {
    /// Reads the configuration from the process environment. A `.env` file,
    /// when present, has already been loaded by `main`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("TG_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| BotError::Config("TG_API_KEY must be set".to_owned()))?;

        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            api_key,
            port: parse_or(&lookup, "PORT", 3000)?,
            locale: parse_or(&lookup, "BOT_LOCALE", Locale::Ru)?,
            balance_url: string_or("BALANCE_URL", DEFAULT_BALANCE_URL),
            status_url: string_or("STATUS_URL", DEFAULT_STATUS_URL),
            scoring_url: string_or("SCORING_URL", DEFAULT_SCORING_URL),
            poll_interval: Duration::from_secs(parse_or(&lookup, "POLL_INTERVAL_SECS", 60)?),
            reply_ttl: Duration::from_secs(parse_or(&lookup, "REPLY_TTL_SECS", 60)?),
            scoring_refresh: Duration::from_secs(parse_or(&lookup, "SCORING_REFRESH_SECS", 3600)?),
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BotError::Config(format!("{key} has invalid value {raw:?}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("TG_API_KEY", "token")])).unwrap();
        assert_eq!(config.api_key, "token");
        assert_eq!(config.port, 3000);
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(config.balance_url, DEFAULT_BALANCE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.reply_ttl, Duration::from_secs(60));
        assert_eq!(config.scoring_refresh, Duration::from_secs(3600));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TG_API_KEY", "token"),
            ("BOT_LOCALE", "en"),
            ("REPLY_TTL_SECS", "10"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.reply_ttl, Duration::from_secs(10));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_key_and_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[])),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("TG_API_KEY", "t"), ("POLL_INTERVAL_SECS", "soon")])),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("TG_API_KEY", "t"), ("BOT_LOCALE", "de")])),
            Err(BotError::Config(_))
        ));
    }
}
