//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use anyhow::{Context, anyhow};

use super::setting;
use super::validation::{parse_hex_color, validate_setting};

/// Runtime configuration populated from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub resources_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jpeg_quality: u8,
    pub background: [u8; 3],
    pub image_host_url: String,
    pub upload_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resources_dir: "resources".into(),
            output_dir: "output".into(),
            jpeg_quality: board_image::DEFAULT_JPEG_QUALITY,
            background: board_image::DEFAULT_BACKGROUND,
            image_host_url: String::new(),
            upload_enabled: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset keys. Every value is validated.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let def = setting(key).ok_or_else(|| anyhow!("unknown setting key: {key}"))?;
            let value = lookup(key)
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| def.default.to_string());
            validate_setting(key, &value)
                .map_err(|e| anyhow!("invalid {key}={value:?} ({}): {e}", def.description))?;
            Ok(value)
        };

        let background = g("BOARD_BACKGROUND")?;
        Ok(Self {
            resources_dir: g("BOARD_RESOURCES_DIR")?.into(),
            output_dir: g("BOARD_OUTPUT_DIR")?.into(),
            jpeg_quality: g("BOARD_JPEG_QUALITY")?
                .parse()
                .context("BOARD_JPEG_QUALITY")?,
            background: parse_hex_color(&background)
                .ok_or_else(|| anyhow!("invalid BOARD_BACKGROUND={background:?}"))?,
            image_host_url: g("IMAGE_HOST_URL")?,
            upload_enabled: g("UPLOAD_ENABLED")? == "true",
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, anyhow::Error> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_from(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = load(&[
            ("BOARD_RESOURCES_DIR", "/srv/cards"),
            ("BOARD_OUTPUT_DIR", "/tmp/board"),
            ("BOARD_JPEG_QUALITY", "75"),
            ("BOARD_BACKGROUND", "#000000"),
            ("IMAGE_HOST_URL", "https://img.example/upload"),
            ("UPLOAD_ENABLED", "true"),
        ])
        .unwrap();

        assert_eq!(config.resources_dir, PathBuf::from("/srv/cards"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.background, [0, 0, 0]);
        assert_eq!(config.image_host_url, "https://img.example/upload");
        assert!(config.upload_enabled);
    }

    #[test]
    fn test_invalid_value_names_the_key() {
        let err = load(&[("BOARD_JPEG_QUALITY", "0")]).unwrap_err();
        assert!(err.to_string().contains("BOARD_JPEG_QUALITY"));

        let err = load(&[("UPLOAD_ENABLED", "yes")]).unwrap_err();
        assert!(err.to_string().contains("UPLOAD_ENABLED"));
    }
}
