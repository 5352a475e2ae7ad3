use crate::models::RenameOptions;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Settings slot used when none is given
pub const DEFAULT_SETTINGS_SLOT: &str = "layer-namer";

/// Prefix of environment variables overriding persisted options
/// (e.g. `LAYER_NAMER_HIDDEN=true`)
pub const DEFAULT_ENV_PREFIX: &str = "LAYER_NAMER";

/// Persists the rename options as one flat record under a named slot.
///
/// The slot maps to `<config_dir>/<slot>.yaml`. Loading layers three sources,
/// later ones winning:
/// 1. Defaults (every option off)
/// 2. The slot file, if present
/// 3. Environment variables `<PREFIX>_<OPTION>`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new ConfigManager using the default slot.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding the settings file; created if missing
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        Self::with_slot(config_dir, DEFAULT_SETTINGS_SLOT)
    }

    /// Create a new ConfigManager storing options under `slot`
    pub fn with_slot<P: AsRef<Utf8Path>>(config_dir: P, slot: &str) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(format!("{}.yaml", slot)),
            config_dir,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        })
    }

    /// Read environment overrides from `<prefix>_<OPTION>` instead
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load the persisted options.
    ///
    /// # Returns
    /// The merged options, or defaults if nothing was saved yet
    pub fn load_options(&self) -> Result<RenameOptions> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::new(self.settings_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix(&self.env_prefix).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let options: RenameOptions = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(options)
    }

    /// Save the options to the slot file.
    pub fn save_options(&self, options: &RenameOptions) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(options).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the slot file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
