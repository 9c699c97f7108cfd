//! Layered configuration for the bot.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use hypepulse_cache::ResultCacheConfig;
use hypepulse_error::{ConfigError, HypePulseError, HypePulseResult};
use hypepulse_format::{FormatConfig, PaginationConfig};
use hypepulse_upstream::UpstreamConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../hypepulse.toml");

/// Prefix of environment overrides, e.g. `HYPEPULSE_CACHE__MAX_SIZE=500`.
pub const ENV_PREFIX: &str = "HYPEPULSE";

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    level: String,

    /// Emit JSON lines instead of human-readable logs
    #[serde(default)]
    json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Complete bot configuration, one section per service.
///
/// Secrets are not part of it: the Discord token and the stats API key come
/// from the command line or the environment.
///
/// # Example
///
/// ```no_run
/// use hypepulse::HypePulseConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HypePulseConfig::load(None)?;
/// println!("Retries: {}", config.upstream().max_attempts());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct HypePulseConfig {
    /// Identity and stats service clients
    #[serde(default)]
    upstream: UpstreamConfig,

    /// Result cache
    #[serde(default)]
    cache: ResultCacheConfig,

    /// Stat formatting
    #[serde(default)]
    format: FormatConfig,

    /// Paginated reply timeouts
    #[serde(default)]
    pagination: PaginationConfig,

    /// Log output
    #[serde(default)]
    logging: LoggingConfig,
}

impl HypePulseConfig {
    /// Load configuration from a single file, without defaults or overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> HypePulseResult<Self> {
        debug!("Loading configuration from file");

        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                HypePulseError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;
        deserialize(settings)
    }

    /// Load configuration with precedence, later sources winning:
    ///
    /// 1. Bundled defaults (`hypepulse.toml` shipped with the binary)
    /// 2. `~/.config/hypepulse/hypepulse.toml`
    /// 3. `explicit` if given (must exist), otherwise `./hypepulse.toml`
    /// 4. `HYPEPULSE_<SECTION>__<KEY>` environment variables
    ///
    /// Optional files are skipped silently when missing.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> HypePulseResult<Self> {
        Self::layered(explicit, environment())
    }

    fn layered(explicit: Option<&Path>, env: Environment) -> HypePulseResult<Self> {
        debug!("Loading configuration: env > file > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/hypepulse/hypepulse.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("hypepulse").required(false)),
        };

        let settings = builder.add_source(env).build().map_err(|e| {
            HypePulseError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;
        deserialize(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn deserialize(settings: Config) -> HypePulseResult<HypePulseConfig> {
    settings.try_deserialize().map_err(|e| {
        HypePulseError::from(ConfigError::new(format!(
            "Failed to parse configuration: {}",
            e
        )))
    })
}
