//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap());
static RE_HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+([/?#]\S*)?$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "BOARD_RESOURCES_DIR" | "BOARD_OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "BOARD_JPEG_QUALITY" => validate_int_range(value, 1, 100)?,
        "BOARD_BACKGROUND" => {
            if !RE_HEX_COLOR.is_match(value) {
                return Err("must be a hex colour like #ffffff".into());
            }
        }
        "IMAGE_HOST_URL" => {
            if !value.is_empty() && !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "UPLOAD_ENABLED" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Parse a validated `#rrggbb` colour.
pub fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let caps = RE_HEX_COLOR.captures(value)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
    Some([channel(1)?, channel(2)?, channel(3)?])
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boolean() {
        assert!(validate_setting("UPLOAD_ENABLED", "true").is_ok());
        assert!(validate_setting("UPLOAD_ENABLED", "false").is_ok());
        assert!(validate_setting("UPLOAD_ENABLED", "yes").is_err());
    }

    #[test]
    fn test_valid_quality() {
        assert!(validate_setting("BOARD_JPEG_QUALITY", "1").is_ok());
        assert!(validate_setting("BOARD_JPEG_QUALITY", "100").is_ok());
        assert!(validate_setting("BOARD_JPEG_QUALITY", "0").is_err());
        assert!(validate_setting("BOARD_JPEG_QUALITY", "101").is_err());
        assert!(validate_setting("BOARD_JPEG_QUALITY", "high").is_err());
    }

    #[test]
    fn test_valid_background() {
        assert!(validate_setting("BOARD_BACKGROUND", "#ffffff").is_ok());
        assert!(validate_setting("BOARD_BACKGROUND", "00FF7f").is_ok());
        assert!(validate_setting("BOARD_BACKGROUND", "#fff").is_err());
        assert!(validate_setting("BOARD_BACKGROUND", "white").is_err());
    }

    #[test]
    fn test_valid_image_host_url() {
        assert!(validate_setting("IMAGE_HOST_URL", "").is_ok()); // empty is ok
        assert!(validate_setting("IMAGE_HOST_URL", "https://img.example/upload").is_ok());
        assert!(validate_setting("IMAGE_HOST_URL", "http://localhost:8080").is_ok());
        assert!(validate_setting("IMAGE_HOST_URL", "ftp://img.example").is_err());
        assert!(validate_setting("IMAGE_HOST_URL", "img.example/upload").is_err());
    }

    #[test]
    fn test_dirs_must_not_be_empty() {
        assert!(validate_setting("BOARD_OUTPUT_DIR", "output").is_ok());
        assert!(validate_setting("BOARD_OUTPUT_DIR", " ").is_err());
        assert!(validate_setting("BOARD_RESOURCES_DIR", "").is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("10a0Ff"), Some([0x10, 0xa0, 0xff]));
        assert_eq!(parse_hex_color("#12345"), None);
    }
}
