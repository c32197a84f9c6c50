// Configuration: read once from the environment at startup, with defaults
// that match the local stylization backend.

use std::path::PathBuf;

use crate::style::Style;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/stylize/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Full URL of the stylize endpoint.
    pub endpoint: String,
    /// Directory downloads are written to.
    pub download_dir: PathBuf,
    /// Style preselected when the app starts.
    pub default_style: Style,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            download_dir: default_download_dir(),
            default_style: Style::default(),
        }
    }
}

impl Config {
    /// Create a Config from `STYLER_ENDPOINT`, `STYLER_DOWNLOAD_DIR` and
    /// `STYLER_DEFAULT_STYLE`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(endpoint) = lookup("STYLER_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(dir) = lookup("STYLER_DOWNLOAD_DIR").filter(|v| !v.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(style) = lookup("STYLER_DEFAULT_STYLE") {
            match style.parse::<Style>() {
                Ok(style) => config.default_style = style,
                Err(err) => log::warn!("{err}, keeping {}", config.default_style),
            }
        }
        config
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_style, Style::Ghibli);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("STYLER_ENDPOINT", "http://styler.lan/stylize/"),
            ("STYLER_DOWNLOAD_DIR", "/tmp/out"),
            ("STYLER_DEFAULT_STYLE", "pixar"),
        ]));
        assert_eq!(config.endpoint, "http://styler.lan/stylize/");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.default_style, Style::Pixar);
    }

    #[test]
    fn unknown_style_and_blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("STYLER_ENDPOINT", "   "),
            ("STYLER_DEFAULT_STYLE", "vaporwave"),
        ]));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.default_style, Style::Ghibli);
    }
}
