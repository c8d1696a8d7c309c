//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::deck::http::DEFAULT_DECK_API_URL;
use crate::error::AppError;

const DEFAULT_GAME_KEY: &str = "game";
const DEFAULT_DECK_TIMEOUT_MS: u64 = 5000;

/// Where decks are shuffled and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckSourceKind {
    /// The deck-of-cards HTTP API.
    Remote,
    /// In-process decks.
    Local,
}

impl FromStr for DeckSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(DeckSourceKind::Remote),
            "local" => Ok(DeckSourceKind::Local),
            other => Err(format!("DECK_SOURCE must be 'remote' or 'local', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Shared document
    /// When unset the document lives in process memory.
    pub redis_url: Option<String>,
    pub game_key: String,

    // Card source
    pub deck_source: DeckSourceKind,
    pub deck_api_url: String,
    pub deck_api_timeout: Duration,
    pub deck_seed: Option<u64>,

    // Browser origins allowed by CORS
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            redis_url: None,
            game_key: DEFAULT_GAME_KEY.to_string(),
            deck_source: DeckSourceKind::Remote,
            deck_api_url: DEFAULT_DECK_API_URL.to_string(),
            deck_api_timeout: Duration::from_millis(DEFAULT_DECK_TIMEOUT_MS),
            deck_seed: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Config::default();

        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = parse_var("BACKEND_PORT", "a valid port number")?.unwrap_or(defaults.port);

        let redis_url = non_empty_var("REDIS_URL");
        let game_key = non_empty_var("SEQUENCE_GAME_KEY").unwrap_or(defaults.game_key);

        let deck_source = match non_empty_var("DECK_SOURCE") {
            Some(raw) => raw.parse::<DeckSourceKind>().map_err(|detail| AppError::Config {
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    detail.clone(),
                )),
                detail,
            })?,
            None => defaults.deck_source,
        };
        let deck_api_url = non_empty_var("DECK_API_URL").unwrap_or(defaults.deck_api_url);
        let deck_api_timeout = parse_var::<u64>("DECK_API_TIMEOUT_MS", "a number of milliseconds")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.deck_api_timeout);
        let deck_seed = parse_var::<u64>("DECK_SEED", "an unsigned 64-bit integer")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Config {
            host,
            port,
            redis_url,
            game_key,
            deck_source,
            deck_api_url,
            deck_api_timeout,
            deck_seed,
            cors_allowed_origins,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, expected: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = non_empty_var(name) else {
        return Ok(None);
    };
    raw.trim().parse::<T>().map(Some).map_err(|e| AppError::Config {
        detail: format!("{name} must be {expected}, got '{raw}'"),
        source: Box::new(e),
    })
}
