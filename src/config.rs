use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) input_folder: Option<PathBuf>,
    #[serde(default)]
    pub(crate) output_folder: Option<PathBuf>,
    #[serde(default)]
    pub(crate) paths_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) json: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) debug: bool,
}

/// A loaded config plus what happened while looking for it.
///
/// Logging is not set up yet while the config is read, so the notes are
/// replayed once it is.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) source: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

impl LoadedConfig {
    pub(crate) fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
        if let Some(path) = &self.source {
            tracing::debug!("Loaded config from {}", path.display());
        }
    }
}

impl Config {
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from(&Self::get_config_paths())
    }

    /// First existing, parseable file wins; unparseable ones are noted and skipped
    pub(crate) fn load_from(paths: &[PathBuf]) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        for path in paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        loaded.config = config;
                        loaded.source = Some(path.clone());
                        return loaded;
                    }
                    Err(e) => {
                        loaded
                            .warnings
                            .push(format!("Failed to parse {}: {}", path.display(), e));
                    }
                }
            }
        }

        loaded
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/sheetsplit/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("sheetsplit").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("sheetsplit").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.sheetsplit.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".sheetsplit.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_paths_are_not_empty() {
        assert!(!Config::get_config_paths().is_empty() || dirs::home_dir().is_none());
    }

    #[test]
    fn loads_first_parseable_file() {
        let tmp = TempDir::new().unwrap();
        let broken = tmp.path().join("broken.toml");
        let good = tmp.path().join("good.toml");
        fs::write(&broken, "json = [").unwrap();
        fs::write(
            &good,
            "input_folder = \"/data/in\"\njson = true\ncolor = \"never\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&[tmp.path().join("missing.toml"), broken, good.clone()]);
        assert_eq!(loaded.source, Some(good));
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.config.json);
        assert_eq!(loaded.config.color, Some(ConfigColorMode::Never));
        assert_eq!(loaded.config.input_folder, Some(PathBuf::from("/data/in")));
        assert!(loaded.config.output_folder.is_none());
    }

    #[test]
    fn no_files_gives_defaults() {
        let loaded = Config::load_from(&[]);
        assert!(loaded.source.is_none());
        assert!(!loaded.config.debug);
    }
}
