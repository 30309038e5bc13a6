use holdem_engine::game::{MAX_SEATS, Stakes};
use holdem_engine::player::STARTING_STACK;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const SEED_ENV: &str = "HOLDEM_SEED";
pub const PLAYERS_ENV: &str = "HOLDEM_PLAYERS";
pub const POLICY_ENV: &str = "HOLDEM_POLICY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub players: usize,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub seed: Option<u64>,
    pub policy: String,
}

impl Config {
    pub fn stakes(&self) -> Stakes {
        Stakes {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub seed: ValueSource,
    pub policy: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            seed: ValueSource::Default,
            policy: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let stakes = Stakes::default();
        Self {
            players: 6,
            starting_stack: STARTING_STACK,
            small_blind: stakes.small_blind,
            big_blind: stakes.big_blind,
            seed: None,
            policy: "passive".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then the
/// `HOLDEM_*` variables. Command-line flags are applied by the caller.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.policy {
            cfg.policy = v;
            sources.policy = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(players) = std::env::var(PLAYERS_ENV)
        && !players.is_empty()
    {
        cfg.players = players
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid players: {}", players)))?;
        sources.players = ValueSource::Env;
    }
    if let Ok(policy) = std::env::var(POLICY_ENV)
        && !policy.is_empty()
    {
        cfg.policy = policy;
        sources.policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    policy: Option<String>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.small_blind == 0 || cfg.big_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: blinds must be >0".into(),
        ));
    }
    if cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must not exceed big_blind".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    validate_players(cfg.players)?;
    if !is_known_policy(&cfg.policy) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown policy '{}' (expected one of: {})",
            cfg.policy,
            holdem_ai::POLICY_NAMES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_players(players: usize) -> Result<(), ConfigError> {
    if !(2..=MAX_SEATS).contains(&players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be between 2 and {} (got {})",
            MAX_SEATS, players
        )));
    }
    Ok(())
}

pub fn is_known_policy(name: &str) -> bool {
    holdem_ai::POLICY_NAMES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.stakes(), Stakes::default());
        assert_eq!(cfg.starting_stack, STARTING_STACK);
    }

    #[test]
    fn rejects_zero_blinds() {
        let cfg = Config {
            big_blind: 0,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_small_blind_above_big_blind() {
        let cfg = Config {
            small_blind: 50,
            big_blind: 20,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("small_blind"));
    }

    #[test]
    fn rejects_zero_stack_and_bad_seat_counts() {
        let zero = Config {
            starting_stack: 0,
            ..Config::default()
        };
        assert!(validate(&zero).is_err());
        for players in [0, 1, MAX_SEATS + 1] {
            let cfg = Config {
                players,
                ..Config::default()
            };
            assert!(validate(&cfg).is_err(), "players={players}");
        }
        assert!(validate_players(2).is_ok());
        assert!(validate_players(MAX_SEATS).is_ok());
    }

    #[test]
    fn policy_names_are_case_insensitive() {
        assert!(is_known_policy("Random"));
        assert!(is_known_policy("PASSIVE"));
        assert!(!is_known_policy("shark"));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        let parsed: Result<FileConfig, _> = toml::from_str("level = 3\n");
        assert!(parsed.is_err());
        let ok: FileConfig = toml::from_str("players = 4\nbig_blind = 50\n").unwrap();
        assert_eq!(ok.players, Some(4));
        assert_eq!(ok.big_blind, Some(50));
        assert!(ok.seed.is_none());
    }
}
