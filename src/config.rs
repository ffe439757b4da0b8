use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::CityMap;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Directory the city CSVs live in; the `--data-dir` flag wins over this.
    #[serde(default)]
    pub(crate) data_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// Overrides or additions to the built-in city table; relative paths
    /// resolve against the data directory.
    #[serde(default)]
    pub(crate) cities: BTreeMap<String, PathBuf>,
}

const DEFAULT_CITIES: [(&str, &str); 3] = [
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/bikestats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("bikestats").join("config.toml"));
        }

        // 2. Platform config dir (macOS Application Support etc.)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("bikestats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.bikestats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".bikestats.toml"));
        }

        paths
    }

    /// Resolve the immutable city-to-file mapping handed to the loader.
    /// `base` is the already-merged data directory (flag over config file).
    pub(crate) fn city_map(&self, base: Option<&Path>) -> CityMap {
        let base = base.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        let mut entries: BTreeMap<String, PathBuf> = DEFAULT_CITIES
            .iter()
            .map(|(city, file)| (city.to_string(), base.join(file)))
            .collect();
        for (city, path) in &self.cities {
            let resolved = if path.is_absolute() {
                path.clone()
            } else {
                base.join(path)
            };
            entries.insert(city.to_ascii_lowercase(), resolved);
        }
        CityMap::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_exist() {
        assert!(!Config::get_config_paths().is_empty());
    }

    #[test]
    fn default_city_map() {
        let map = Config::default().city_map(Some(Path::new("/data")));
        let cities: Vec<&str> = map.cities().collect();
        assert_eq!(cities, ["chicago", "new york city", "washington"]);
        assert!(map.contains("chicago"));
        assert!(!map.contains("boston"));
    }

    #[test]
    fn cities_table_overrides_and_extends() {
        let config: Config = toml::from_str(
            "[cities]\n\
             chicago = \"/elsewhere/chi.csv\"\n\
             Boston = \"boston.csv\"\n",
        )
        .unwrap();
        let map = config.city_map(Some(Path::new("/data")));
        let cities: Vec<&str> = map.cities().collect();
        assert_eq!(cities, ["boston", "chicago", "new york city", "washington"]);
    }

    #[test]
    fn data_dir_parses_from_toml() {
        let config: Config = toml::from_str("data_dir = \"/srv/bikeshare\"\n").unwrap();
        assert_eq!(config.data_dir.as_deref(), Some(Path::new("/srv/bikeshare")));
        assert!(config.cities.is_empty());
    }

    #[test]
    fn color_mode_parses_lowercase() {
        let config: Config = toml::from_str("color = \"never\"\n").unwrap();
        assert!(matches!(config.color, Some(ConfigColorMode::Never)));
    }
}
