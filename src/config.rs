use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional user configuration, read from `~/.ticklist/config.toml`.
///
/// Every section and field is optional; a missing or unreadable file falls
/// back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct TicklistConfig {
    pub app: Option<AppConfig>,
    pub list: Option<ListConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    pub high_contrast: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListConfig {
    /// Titles the checklist starts out with. The id counter starts one past
    /// the last seed item.
    pub seed: Option<Vec<String>>,
}

impl TicklistConfig {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                None
            }
        }
    }

    #[must_use]
    pub fn high_contrast(&self) -> bool {
        self.app
            .as_ref()
            .and_then(|app| app.high_contrast)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn seed_titles(&self) -> &[String] {
        self.list
            .as_ref()
            .and_then(|list| list.seed.as_deref())
            .unwrap_or(&[])
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ticklist").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_full_config() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
[app]
high_contrast = true

[list]
seed = ["Learn the keys", "Add a task"]
"#
        )
        .expect("write config");

        let config = TicklistConfig::load_from(file.path()).expect("parsed config");
        assert!(config.high_contrast());
        assert_eq!(config.seed_titles(), ["Learn the keys", "Add a task"]);
    }

    #[test]
    fn invalid_toml_falls_back_to_none() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not [valid toml").expect("write config");

        assert!(TicklistConfig::load_from(file.path()).is_none());
    }

    #[test]
    fn defaults_when_sections_missing() {
        let config = TicklistConfig::default();
        assert!(!config.high_contrast());
        assert!(config.seed_titles().is_empty());
    }
}
