use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{BurstError, BurstResult};

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "burst.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Play the animation back to front (implode instead of explode).
    pub reverse: bool,
    /// Appended to the input path when no output path is given.
    pub output_suffix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            reverse: false,
            output_suffix: "_out.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Generate frames on the rayon thread pool.
    pub parallel: bool,
    /// Directory of PNG frames replacing the built-in decorative set.
    pub decor_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            decor_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String, // "error" | "warn" | "info" | "debug" | "trace"
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BurstConfig {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl BurstConfig {
    pub fn load_from_file(path: &Path) -> BurstResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|e| BurstError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn save_to_file(&self, path: &Path) -> BurstResult<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| BurstError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load `explicit` if given, else `burst.toml` in the working directory
    /// if it exists, else the defaults.
    pub fn discover(explicit: Option<&Path>) -> BurstResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from_file(local);
        }
        Ok(Self::default())
    }

    /// Output path used when the caller did not name one: the input path
    /// with the configured suffix appended.
    pub fn default_output_for(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_os_string();
        name.push(&self.export.output_suffix);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BurstConfig::default();
        assert!(!config.export.reverse);
        assert_eq!(config.export.output_suffix, "_out.png");
        assert!(config.render.parallel);
        assert!(config.render.decor_dir.is_none());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BurstConfig::from_toml("[export]\nreverse = true\n").unwrap();
        assert!(config.export.reverse);
        assert_eq!(config.export.output_suffix, "_out.png");
        assert!(config.render.parallel);
    }

    #[test]
    fn test_full_toml() {
        let config = BurstConfig::from_toml(
            r#"
            [export]
            output_suffix = "_boom.gif"

            [render]
            parallel = false
            decor_dir = "assets/decor"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.export.output_suffix, "_boom.gif");
        assert!(!config.render.parallel);
        assert_eq!(config.render.decor_dir, Some(PathBuf::from("assets/decor")));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let path = std::env::temp_dir().join("burst_test_bad_config.toml");
        std::fs::write(&path, "[export\nreverse = ").unwrap();
        let err = BurstConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, BurstError::Config(_)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("burst_test_config.toml");
        let mut config = BurstConfig::default();
        config.export.reverse = true;
        config.save_to_file(&path).unwrap();
        let loaded = BurstConfig::load_from_file(&path).unwrap();
        assert!(loaded.export.reverse);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_default_output_appends_suffix() {
        let config = BurstConfig::default();
        assert_eq!(
            config.default_output_for(Path::new("photos/cat.jpg")),
            PathBuf::from("photos/cat.jpg_out.png")
        );
    }
}
