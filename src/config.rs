use std::{path::PathBuf, time::Duration};

use crate::error::{config::ConfigError, AppError};

/// Grace period before an emptied party channel is re-checked and removed.
const DEFAULT_PARTY_GRACE_PERIOD_MS: u64 = 500;
/// Category new game categories are positioned after.
const DEFAULT_GAMES_ANCHOR_CATEGORY: &str = "🎮 [Jeux]";
/// Role the colour roles are placed under.
const DEFAULT_COLOR_ANCHOR_ROLE: &str = "==COULEURS HABITUÉS==";
/// Party reconciliation runs every ten minutes by default.
const DEFAULT_RECONCILE_CRON: &str = "0 */10 * * * *";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOGS_PATH: &str = "logs";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub main_guild_id: u64,
    pub habitue_role_id: u64,

    pub party_grace_period: Duration,
    pub games_anchor_category: String,
    pub color_anchor_role: String,
    pub reconcile_cron: String,
    pub log_level: String,
    /// Directory holding the `events` and `issues` log folders.
    pub logs_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here with `std::env::var`; tests pass a map instead
    /// of mutating the process environment.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, or `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let main_guild_id = parse_snowflake("MAIN_GUILD_ID", required("MAIN_GUILD_ID")?)?;
        let habitue_role_id = parse_snowflake("HABITUE_ROLE_ID", required("HABITUE_ROLE_ID")?)?;

        let party_grace_period = match lookup("PARTY_GRACE_PERIOD_MS") {
            Some(value) => {
                let ms = value.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    name: "PARTY_GRACE_PERIOD_MS".to_string(),
                    reason: e.to_string(),
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_PARTY_GRACE_PERIOD_MS),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            main_guild_id,
            habitue_role_id,
            party_grace_period,
            games_anchor_category: lookup("GAMES_ANCHOR_CATEGORY")
                .unwrap_or_else(|| DEFAULT_GAMES_ANCHOR_CATEGORY.to_string()),
            color_anchor_role: lookup("COLOR_ANCHOR_ROLE")
                .unwrap_or_else(|| DEFAULT_COLOR_ANCHOR_ROLE.to_string()),
            reconcile_cron: lookup("RECONCILE_CRON")
                .unwrap_or_else(|| DEFAULT_RECONCILE_CRON.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            logs_path: PathBuf::from(
                lookup("LOGS_PATH").unwrap_or_else(|| DEFAULT_LOGS_PATH.to_string()),
            ),
        })
    }
}

/// Discord ids of zero are placeholders left in an unconfigured `.env`.
fn parse_snowflake(name: &str, value: String) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: "must be configured (cannot be 0)".to_string(),
        }),
        Ok(id) => Ok(id),
        Err(e) => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
