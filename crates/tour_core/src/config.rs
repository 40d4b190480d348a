use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CSS_PREFIX: &str = "tour";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid boolean '{value}' for {var}")]
    InvalidBool { var: String, value: String },
    #[error("flowUrl is required")]
    MissingFlowUrl,
}

/// Raw markup used as button labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonHtml {
    pub next: String,
    pub prev: String,
    pub exit: String,
}

impl Default for ButtonHtml {
    fn default() -> Self {
        Self {
            next: "Next".into(),
            prev: "Back".into(),
            exit: "Exit".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TourConfig {
    pub flow_url: String,
    pub auto_scroll: bool,
    pub key_events: bool,
    pub css_prefix: Option<String>,
    pub button_html: ButtonHtml,
    pub click_overlay_closes_tour: bool,
    pub overlay: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            flow_url: String::new(),
            auto_scroll: true,
            key_events: false,
            css_prefix: None,
            button_html: ButtonHtml::default(),
            click_overlay_closes_tour: false,
            overlay: true,
        }
    }
}

impl TourConfig {
    pub fn new(flow_url: impl Into<String>) -> Self {
        Self {
            flow_url: flow_url.into(),
            ..Self::default()
        }
    }

    pub fn prefix(&self) -> &str {
        self.css_prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(DEFAULT_CSS_PREFIX)
    }

    /// Prefixed class name, e.g. `tour-slide`.
    pub fn class(&self, name: &str) -> String {
        format!("{}-{name}", self.prefix())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flow_url.trim().is_empty() {
            return Err(ConfigError::MissingFlowUrl);
        }
        Ok(())
    }
}

/// Reads an optional TOML file, applies `TOUR_*` environment overrides and
/// validates the result.
pub fn load_config(path: Option<&Path>) -> Result<TourConfig, ConfigError> {
    load_config_with_flow(path, None)
}

/// Like [`load_config`], with an explicit flow location that wins over both
/// the file and the environment.
pub fn load_config_with_flow(
    path: Option<&Path>,
    flow_url: Option<&str>,
) -> Result<TourConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config_file(path)?,
        None => TourConfig::default(),
    };
    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    if let Some(flow_url) = flow_url {
        config.flow_url = flow_url.to_string();
    }
    config.validate()?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<TourConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

fn apply_env_overrides(
    config: &mut TourConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("TOUR_FLOW_URL") {
        config.flow_url = v;
    }
    if let Some(v) = lookup("TOUR_CSS_PREFIX") {
        config.css_prefix = Some(v);
    }
    if let Some(v) = lookup("TOUR_AUTO_SCROLL") {
        config.auto_scroll = parse_bool("TOUR_AUTO_SCROLL", &v)?;
    }
    if let Some(v) = lookup("TOUR_KEY_EVENTS") {
        config.key_events = parse_bool("TOUR_KEY_EVENTS", &v)?;
    }
    if let Some(v) = lookup("TOUR_OVERLAY") {
        config.overlay = parse_bool("TOUR_OVERLAY", &v)?;
    }
    if let Some(v) = lookup("TOUR_CLICK_OVERLAY_CLOSES") {
        config.click_overlay_closes_tour = parse_bool("TOUR_CLICK_OVERLAY_CLOSES", &v)?;
    }
    Ok(())
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
