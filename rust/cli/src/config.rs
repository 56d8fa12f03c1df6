use serde::{Deserialize, Serialize};
use setgame_ai::{AI_NAMES, ComputerTiming};
use setgame_engine::game::SessionConfig;
use std::fs;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub initial_deal_size: usize,
    pub play_area_max: usize,
    pub seed: Option<u64>,
    pub ai: String,
    pub computer_interval_secs: u64,
    pub computer_think_secs: u64,
    pub computer_reveal_secs: u64,
}

impl Config {
    pub fn session_config(&self, seed: Option<u64>) -> SessionConfig {
        SessionConfig {
            initial_deal_size: self.initial_deal_size,
            play_area_max: self.play_area_max,
            seed: seed.or(self.seed),
        }
    }

    pub fn computer_timing(&self) -> ComputerTiming {
        ComputerTiming {
            interval: Duration::from_secs(self.computer_interval_secs),
            think: Duration::from_secs(self.computer_think_secs),
            reveal: Duration::from_secs(self.computer_reveal_secs),
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
    pub initial_deal_size: ValueSource,
    pub play_area_max: ValueSource,
    pub seed: ValueSource,
    pub ai: ValueSource,
    pub computer_interval_secs: ValueSource,
    pub computer_think_secs: ValueSource,
    pub computer_reveal_secs: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            initial_deal_size: ValueSource::Default,
            play_area_max: ValueSource::Default,
            seed: ValueSource::Default,
            ai: ValueSource::Default,
            computer_interval_secs: ValueSource::Default,
            computer_think_secs: ValueSource::Default,
            computer_reveal_secs: ValueSource::Default,
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
        let session = SessionConfig::default();
        let timing = ComputerTiming::default();
        Self {
            initial_deal_size: session.initial_deal_size,
            play_area_max: session.play_area_max,
            seed: None,
            ai: "baseline".into(),
            computer_interval_secs: timing.interval.as_secs(),
            computer_think_secs: timing.think.as_secs(),
            computer_reveal_secs: timing.reveal.as_secs(),
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

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("SETGAME_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(&path)?;
        let f: FileConfig = toml::from_str(&s)?;
        tracing::debug!(path = %path, "loaded config file");
        if let Some(v) = f.initial_deal_size {
            cfg.initial_deal_size = v;
            sources.initial_deal_size = ValueSource::File;
        }
        if let Some(v) = f.play_area_max {
            cfg.play_area_max = v;
            sources.play_area_max = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.computer_interval_secs {
            cfg.computer_interval_secs = v;
            sources.computer_interval_secs = ValueSource::File;
        }
        if let Some(v) = f.computer_think_secs {
            cfg.computer_think_secs = v;
            sources.computer_think_secs = ValueSource::File;
        }
        if let Some(v) = f.computer_reveal_secs {
            cfg.computer_reveal_secs = v;
            sources.computer_reveal_secs = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("SETGAME_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("SETGAME_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }
    if let Ok(initial) = std::env::var("SETGAME_INITIAL_DEAL")
        && !initial.is_empty()
    {
        cfg.initial_deal_size = initial
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid initial deal size".into()))?;
        sources.initial_deal_size = ValueSource::Env;
    }
    if let Ok(max) = std::env::var("SETGAME_PLAY_AREA_MAX")
        && !max.is_empty()
    {
        cfg.play_area_max = max
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid play area maximum".into()))?;
        sources.play_area_max = ValueSource::Env;
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
    initial_deal_size: Option<usize>,
    #[serde(default)]
    play_area_max: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    computer_interval_secs: Option<u64>,
    #[serde(default)]
    computer_think_secs: Option<u64>,
    #[serde(default)]
    computer_reveal_secs: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.session_config(None)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if !AI_NAMES.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of: {})",
            cfg.ai,
            AI_NAMES.join(", ")
        )));
    }
    if cfg.computer_interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: computer_interval_secs must be >0".into(),
        ));
    }
    Ok(())
}
