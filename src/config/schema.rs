use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    pub api_key: Option<String>,
    pub default_provider: Option<String>,
    pub default_model: Option<String>,
    pub default_temperature: f64,

    /// Working root all generated files land under. Relative paths are
    /// resolved against the current directory at startup.
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: PathBuf,
}

fn default_workspace_dir() -> PathBuf {
    PathBuf::from("code")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            default_provider: Some("openai".to_string()),
            default_model: Some("gpt-4o-mini".to_string()),
            default_temperature: 0.7,
            workspace_dir: default_workspace_dir(),
        }
    }
}

impl Config {
    /// Load `~/.codeloom/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_or_init_at(&home.join(".codeloom"))
    }

    pub fn load_or_init_at(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join("config.toml");

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).context("Failed to create .codeloom directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self {
                config_path,
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            anyhow::bail!(
                "default_temperature must be within 0.0..=2.0, got {}",
                self.default_temperature
            );
        }
        Ok(())
    }

    /// Apply environment variable overrides to config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("CODELOOM_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }

        if let Ok(provider) =
            std::env::var("CODELOOM_PROVIDER").or_else(|_| std::env::var("PROVIDER"))
        {
            if !provider.is_empty() {
                self.default_provider = Some(provider);
            }
        }

        if let Ok(model) = std::env::var("CODELOOM_MODEL") {
            if !model.is_empty() {
                self.default_model = Some(model);
            }
        }

        if let Ok(workspace) = std::env::var("CODELOOM_WORKSPACE") {
            if !workspace.is_empty() {
                self.workspace_dir = PathBuf::from(workspace);
            }
        }

        if let Ok(temp_str) = std::env::var("CODELOOM_TEMPERATURE") {
            if let Ok(temp) = temp_str.parse::<f64>() {
                if (0.0..=2.0).contains(&temp) {
                    self.default_temperature = temp;
                }
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
