use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const CONFIG_DIR: &str = "taskify";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_CHART_WINDOW_DAYS: u16 = 7;

/// Top-level configuration loaded from the user's `taskify/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Storage location overrides.
    #[serde(default)]
    pub store: StoreConfig,
    /// Chart rendering defaults.
    #[serde(default)]
    pub charts: ChartsConfig,
}

impl AppConfig {
    /// Load configuration from `path` when given, otherwise from the
    /// platform config directory. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read, parsed,
    /// or validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(explicit) => explicit.to_path_buf(),
            None => match default_config_path() {
                Some(found) => found,
                None => return Ok(Self::default()),
            },
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Directory the task data lives under, honoring precedence: the CLI
    /// flag, then the config file, then the platform data directory.
    ///
    /// # Errors
    /// Returns an error when no platform data directory can be determined
    /// and nothing was given.
    pub fn resolve_data_dir(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = flag {
            return Ok(dir);
        }
        if let Some(dir) = &self.store.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|base| base.join(CONFIG_DIR))
            .context("could not determine a data directory, pass --data-dir")
    }

    fn validate(&self) -> Result<()> {
        if self.charts.window_days == 0 {
            bail!("charts.window_days must be at least 1");
        }
        Ok(())
    }
}

/// Storage configuration block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    /// Directory holding the task documents.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Chart configuration block.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    /// Days covered by the daily activity series.
    #[serde(default = "default_window_days")]
    pub window_days: u16,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_CHART_WINDOW_DAYS,
        }
    }
}

const fn default_window_days() -> u16 {
    DEFAULT_CHART_WINDOW_DAYS
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, body).unwrap_or_else(|err| panic!("must write config: {err}"));
        path
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig::load(Some(&dir.path().join("nope.toml")))?;
        assert!(config.store.data_dir.is_none());
        assert_eq!(config.charts.window_days, 7);
        Ok(())
    }

    #[test]
    fn parses_both_sections() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(
            &dir,
            r#"
[store]
data_dir = "/tmp/taskify-data"

[charts]
window_days = 14
"#,
        );
        let config = AppConfig::load(Some(&path))?;
        assert_eq!(
            config.store.data_dir.as_deref(),
            Some(Path::new("/tmp/taskify-data"))
        );
        assert_eq!(config.charts.window_days, 14);
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, "[charts]\nwindow_days = 3\n");
        let config = AppConfig::load(Some(&path))?;
        assert!(config.store.data_dir.is_none());
        assert_eq!(config.charts.window_days, 3);
        Ok(())
    }

    #[test]
    fn zero_window_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, "[charts]\nwindow_days = 0\n");
        let err = match AppConfig::load(Some(&path)) {
            Ok(_) => panic!("zero window must be rejected"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("window_days"));
        Ok(())
    }

    #[test]
    fn unparseable_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, "charts = nonsense");
        assert!(AppConfig::load(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn data_dir_precedence_prefers_the_flag() -> Result<()> {
        let config = AppConfig {
            store: StoreConfig {
                data_dir: Some(PathBuf::from("/from/config")),
            },
            charts: ChartsConfig::default(),
        };

        let from_flag = config.resolve_data_dir(Some(PathBuf::from("/from/flag")))?;
        assert_eq!(from_flag, Path::new("/from/flag"));

        let from_config = config.resolve_data_dir(None)?;
        assert_eq!(from_config, Path::new("/from/config"));
        Ok(())
    }
}
