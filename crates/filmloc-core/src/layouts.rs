//! Registry of known "locations listing" page layouts.
//!
//! A layout names the hosts and URL path it applies to plus the CSS
//! selectors of the container that holds the list and of its items. Layouts
//! ship built in and can be replaced wholesale by a YAML file.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    /// Host suffixes this layout applies to. Empty means any host.
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Regex matched against the URL path.
    pub path_pattern: Option<String>,
    #[serde(default)]
    pub container_selectors: Vec<String>,
    /// Item selectors in addition to `li`.
    #[serde(default)]
    pub item_selectors: Vec<String>,
}

impl LayoutConfig {
    /// `true` when `host` equals or is a subdomain of one of the layout's hosts.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        let host = host.to_ascii_lowercase();
        self.hosts.iter().any(|h| {
            let h = h.to_ascii_lowercase();
            host == h || host.ends_with(&format!(".{h}"))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LayoutsFile {
    pub layouts: Vec<LayoutConfig>,
}

/// Layouts used when no layouts file is configured.
#[must_use]
pub fn builtin_layouts() -> Vec<LayoutConfig> {
    vec![
        LayoutConfig {
            name: "imdb-locations".to_string(),
            hosts: vec!["imdb.com".to_string()],
            path_pattern: Some(r"^/title/tt\d+/locations/?$".to_string()),
            container_selectors: vec![
                "#filming_locations".to_string(),
                r#"[data-testid="sub-section-flmg_locations"]"#.to_string(),
            ],
            item_selectors: vec![
                ".ipc-metadata-list-item__label".to_string(),
                ".soda dt a".to_string(),
                ".location-name".to_string(),
            ],
        },
        LayoutConfig {
            name: "generic-locations-list".to_string(),
            hosts: vec![],
            path_pattern: Some(r"(?i)/(?:filming-)?locations/?$".to_string()),
            container_selectors: vec![
                ".filming-locations".to_string(),
                ".locations-list".to_string(),
            ],
            item_selectors: vec![".location-name".to_string()],
        },
    ]
}

/// Load and validate layouts from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_layouts(path: &Path) -> Result<LayoutsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LayoutsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let layouts_file: LayoutsFile = serde_yaml::from_str(&content)?;
    validate_layouts(&layouts_file.layouts)?;

    Ok(layouts_file)
}

/// Load layouts from `path` when given, otherwise return [`builtin_layouts`].
///
/// # Errors
///
/// Returns `ConfigError` if a configured file cannot be loaded.
pub fn load_layouts_or_builtin(path: Option<&Path>) -> Result<Vec<LayoutConfig>, ConfigError> {
    match path {
        Some(p) => Ok(load_layouts(p)?.layouts),
        None => Ok(builtin_layouts()),
    }
}

fn validate_layouts(layouts: &[LayoutConfig]) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for layout in layouts {
        if layout.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "layout name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(layout.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate layout name: '{}'",
                layout.name
            )));
        }

        if layout.path_pattern.is_none() && layout.container_selectors.is_empty() {
            return Err(ConfigError::Validation(format!(
                "layout '{}' needs a path_pattern or at least one container selector",
                layout.name
            )));
        }

        if let Some(pattern) = &layout.path_pattern {
            Regex::new(pattern).map_err(|e| {
                ConfigError::Validation(format!(
                    "layout '{}' has invalid path_pattern: {e}",
                    layout.name
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "layouts_test.rs"]
mod tests;
