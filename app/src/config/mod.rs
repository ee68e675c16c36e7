//! Configuration management: defaults, validation, loading from the environment.

pub mod app_config;
pub mod validation;

pub use app_config::AppConfig;

/// A single setting definition.
#[derive(Debug, Clone, Copy)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Every setting the app reads, with its default.
pub const SETTINGS: &[SettingDef] = &[
    SettingDef {
        key: "BOARD_RESOURCES_DIR",
        default: "resources",
        description: "Directory holding <card>.jpeg assets",
    },
    SettingDef {
        key: "BOARD_OUTPUT_DIR",
        default: "output",
        description: "Directory receiving flop/turn/river.jpeg",
    },
    SettingDef {
        key: "BOARD_JPEG_QUALITY",
        default: "90",
        description: "JPEG quality of written artifacts (1-100)",
    },
    SettingDef {
        key: "BOARD_BACKGROUND",
        default: "#ffffff",
        description: "Canvas fill colour as #rrggbb",
    },
    SettingDef {
        key: "IMAGE_HOST_URL",
        default: "",
        description: "Upload endpoint for composed boards",
    },
    SettingDef {
        key: "UPLOAD_ENABLED",
        default: "false",
        description: "Upload every composed board",
    },
];

/// Look up a setting definition by key.
pub fn setting(key: &str) -> Option<&'static SettingDef> {
    SETTINGS.iter().find(|d| d.key == key)
}
