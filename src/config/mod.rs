use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::editor::tools::ShapeStyle;
use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "gallery-annotator";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub default_color: String,
    pub default_stroke_width: f64,
    pub debug_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let style = ShapeStyle::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_color: style.color.to_hex(),
            default_stroke_width: style.stroke_width,
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Initial drawing style; an unparsable color falls back to the default red.
    pub fn default_style(&self) -> ShapeStyle {
        let color = Color::from_hex(&self.default_color).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid default_color in config.json; using default");
            ShapeStyle::default().color
        });
        ShapeStyle::new(color, self.default_stroke_width)
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "gallery-annotator-config-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join(APP_DIR)).expect("create config dir");
        root
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/gallery-annotator/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/home/.config/gallery-annotator/config.json")
        );
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path(APP_DIR, APP_CONFIG_FILE, None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_app_config_with(Some(Path::new("/nonexistent/gallery")), None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.default_color, "#FF0000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let root = temp_config_root("partial");
        std::fs::write(
            root.join(APP_DIR).join(APP_CONFIG_FILE),
            r##"{"api_base_url": "https://gallery.example", "default_stroke_width": 40, "default_color": "#00ff00"}"##,
        )
        .expect("write config");

        let config = load_app_config_with(Some(root.as_path()), None);
        assert_eq!(config.api_base_url, "https://gallery.example");
        assert_eq!(config.request_timeout_secs, 30);
        let style = config.default_style();
        assert_eq!(style.color, Color::new(0, 255, 0));
        assert_eq!(style.stroke_width, 20.0);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let root = temp_config_root("broken");
        std::fs::write(root.join(APP_DIR).join(APP_CONFIG_FILE), "{ not json")
            .expect("write config");

        assert_eq!(load_app_config_with(Some(root.as_path()), None), AppConfig::default());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn invalid_color_keeps_default_red() {
        let config = AppConfig {
            default_color: "red".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.default_style().color, Color::new(255, 0, 0));
    }
}
