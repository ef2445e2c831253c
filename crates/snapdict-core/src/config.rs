//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys use `__`, e.g. `APP_CACHE__SHARDS`). `Settings` is the typed
//! view; relative paths in it are resolved against the config directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::TraversalLimits;

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Loads from the current directory, picking the environment from `RUST_ENV`.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base_dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base_dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// The full typed settings tree; absent sections take their defaults.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.lexicon.wordnet_dir = resolve_with_base(&self.base_dir, settings.lexicon.wordnet_dir.to_string_lossy());
        if let Some(dir) = settings.tagger.model_dir.take() {
            settings.tagger.model_dir = Some(resolve_with_base(&self.base_dir, dir.to_string_lossy()));
        }
        settings.validate()?;
        Ok(settings)
    }

    fn validate_for_env(&self, env: &str) -> Result<()> {
        match env {
            "dev" | "development" => {}
            "prod" | "production" => {}
            "test" | "testing" => {}
            other => warn!("Unknown RUST_ENV '{}', using config.toml only", other),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lexicon: LexiconSettings,
    pub tagger: TaggerSettings,
    pub cache: CacheSettings,
    pub traversal: TraversalLimits,
}

impl Settings {
    fn validate(&self) -> Result<()> {
        if self.cache.lemma_capacity == 0 || self.cache.document_capacity == 0 {
            return Err(Error::InvalidConfig("cache capacities must be non-zero".into()));
        }
        if self.cache.shards == 0 {
            return Err(Error::InvalidConfig("cache.shards must be non-zero".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconSettings {
    pub wordnet_dir: PathBuf,
}

impl Default for LexiconSettings {
    fn default() -> Self {
        Self { wordnet_dir: PathBuf::from("data/wordnet") }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerSettings {
    /// Directory holding the perceptron JSON model. `None` selects the suffix tagger.
    pub model_dir: Option<PathBuf>,
    pub prefix: String,
}

impl Default for TaggerSettings {
    fn default() -> Self {
        Self { model_dir: None, prefix: "averaged_perceptron_tagger_eng".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub lemma_capacity: usize,
    pub document_capacity: usize,
    pub shards: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { lemma_capacity: 10_000, document_capacity: 256, shards: 16 }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
