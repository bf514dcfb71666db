use std::{env, time::Duration};

use thiserror::Error;

use topic_utils::{embed::DEFAULT_EMBED_COLOR, pagination::DEFAULT_SESSION_TTL_SECS};

/// Longest accepted `SESSION_TTL_SECS` (one day).
pub const MAX_SESSION_TTL_SECS: u64 = 60 * 60 * 24;

/// Errors raised while reading the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),
    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime settings for the bot process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub discord_token: String,
    /// PostgreSQL connection string; settings stay in memory when unset.
    pub database_url: Option<String>,
    /// Accent color applied to rendered views.
    pub embed_color: u32,
    /// Idle lifetime of a pagination session.
    pub session_ttl: Duration,
}

impl BotConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_token =
            non_empty("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let database_url = non_empty("DATABASE_URL");

        let embed_color = match non_empty("EMBED_COLOR") {
            Some(raw) => parse_hex_color(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "EMBED_COLOR",
                reason: format!("`{raw}` is not a 24-bit hex color"),
            })?,
            None => DEFAULT_EMBED_COLOR,
        };

        let ttl_secs = match non_empty("SESSION_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| (1..=MAX_SESSION_TTL_SECS).contains(secs))
                .ok_or_else(|| ConfigError::Invalid {
                    name: "SESSION_TTL_SECS",
                    reason: format!("`{raw}` is not between 1 and {MAX_SESSION_TTL_SECS} seconds"),
                })?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self {
            discord_token,
            database_url,
            embed_color,
            session_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

/// Parse `#RRGGBB`, `0xRRGGBB`, or `RRGGBB`.
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        BotConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(config_from(&[]), Err(ConfigError::Missing("DISCORD_TOKEN")));
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "  ")]),
            Err(ConfigError::Missing("DISCORD_TOKEN"))
        );
    }

    #[test]
    fn defaults_apply() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.embed_color, DEFAULT_EMBED_COLOR);
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DATABASE_URL", "postgres://localhost/topics"),
            ("EMBED_COLOR", "#00ff7f"),
            ("SESSION_TTL_SECS", "300"),
        ])
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/topics"));
        assert_eq!(config.embed_color, 0x00_ff_7f);
        assert_eq!(config.session_ttl, Duration::from_secs(300));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("EMBED_COLOR", "purple")]),
            Err(ConfigError::Invalid { name: "EMBED_COLOR", .. })
        ));
        assert!(matches!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("SESSION_TTL_SECS", "0")]),
            Err(ConfigError::Invalid { name: "SESSION_TTL_SECS", .. })
        ));
    }

    #[test]
    fn session_ttl_is_capped() {
        let max = MAX_SESSION_TTL_SECS.to_string();
        let config =
            config_from(&[("DISCORD_TOKEN", "abc"), ("SESSION_TTL_SECS", max.as_str())]).unwrap();
        assert_eq!(config.session_ttl, Duration::from_secs(MAX_SESSION_TTL_SECS));

        let over = (MAX_SESSION_TTL_SECS + 1).to_string();
        let huge = u64::MAX.to_string();
        for raw in [over.as_str(), huge.as_str()] {
            assert!(matches!(
                config_from(&[("DISCORD_TOKEN", "abc"), ("SESSION_TTL_SECS", raw)]),
                Err(ConfigError::Invalid { name: "SESSION_TTL_SECS", .. })
            ));
        }
    }

    #[test]
    fn hex_color_formats() {
        assert_eq!(parse_hex_color("0x905430"), Some(0x90_54_30));
        assert_eq!(parse_hex_color("905430"), Some(0x90_54_30));
        assert_eq!(parse_hex_color("#FFFFFF"), Some(0xff_ff_ff));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#1234567"), None);
        assert_eq!(parse_hex_color("#"), None);
        assert_eq!(parse_hex_color("+12345"), None);
    }
}
