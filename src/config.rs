use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::Location;
use crate::color::ColorScheme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub animation: AnimationConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color_scheme: ColorScheme,
    pub map_detail: MapDetail,
    /// Show fares next to destination names in the list
    pub show_prices: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Straight segments per route arc. Resolution only — more segments
    /// means a smoother curve and a longer flight, never a different shape.
    pub segments: u32,
    /// Milliseconds between animation steps
    pub tick_ms: u64,
}

/// Locations override for the built-in fare catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub locations: Vec<Location>,
}

/// Landmass detail of the background map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MapDetail {
    Low,
    #[default]
    High,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig {
                color_scheme: ColorScheme::Skyline,
                map_detail: MapDetail::High,
                show_prices: true,
            },
            animation: AnimationConfig {
                segments: 200,
                tick_ms: 100,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/skyfare/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skyfare").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}\nUsing defaults.",
                        path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write the config template
        let template = Self::generate_config_template();
        std::fs::write(&path, template)?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# Skyfare Configuration
# This file is auto-generated. Edit as needed.

[display]
# Route color scheme: "skyline", "sunset", "ocean", "aurora", "ember", "monochrome"
color_scheme = "skyline"
# Background map detail: "low" or "high"
map_detail = "high"
# Show fares next to destination names
show_prices = true

[animation]
# Straight segments per route arc (more = smoother and slower)
segments = 200
# Milliseconds between animation steps
tick_ms = 100

# Optional catalog override. Leave out to use the built-in fares.
# Exactly one location must have price 0 — that is the origin.
#
# [[catalog.locations]]
# code = "MEL"
# name = "Melbourne"
# lat = -37.8136
# lon = 144.9631
# price = 0
#
# [[catalog.locations]]
# code = "SYD"
# name = "Sydney"
# lat = -33.8688
# lon = 151.2093
# price = 129
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back_to_the_defaults() {
        let config: Config = toml::from_str(&Config::generate_config_template()).unwrap();
        assert_eq!(config.display.color_scheme, ColorScheme::Skyline);
        assert_eq!(config.animation.segments, 200);
        assert_eq!(config.animation.tick_ms, 100);
        assert!(config.catalog.locations.is_empty());
    }

    #[test]
    fn catalog_override_entries_parse() {
        let config: Config = toml::from_str(
            r#"
            [display]
            color_scheme = "ocean"
            map_detail = "low"
            show_prices = false

            [animation]
            segments = 50
            tick_ms = 40

            [[catalog.locations]]
            code = "WLG"
            name = "Wellington"
            lat = -41.2866
            lon = 174.7756
            price = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.locations.len(), 1);
        let wlg = &config.catalog.locations[0];
        assert_eq!(wlg.code, "WLG");
        assert_eq!(wlg.coordinates.lat, -41.2866);
        assert!(wlg.is_origin());
    }

    #[test]
    fn missing_catalog_section_defaults_to_empty() {
        let config: Config = toml::from_str(
            r#"
            [display]
            color_scheme = "skyline"
            map_detail = "high"
            show_prices = true

            [animation]
            segments = 200
            tick_ms = 100
            "#,
        )
        .unwrap();
        assert!(config.catalog.locations.is_empty());
    }
}
