//! Typed entity settings.
//!
//! Settings are stored as JSONB but parsed into this structure exactly
//! once, at the repository boundary. Unknown historical fields are
//! dropped on read; every field is optional with an explicit default so
//! rows written by older versions still parse.

use serde::{Deserialize, Serialize};

fn default_schema_version() -> u32 {
    1
}

/// Per-entity display and branding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySettings {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoSettings>,
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            display: DisplaySettings::default(),
            logo: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Named color scheme for the mobile client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,

    #[serde(default)]
    pub show_logo: bool,
}

/// Logo object plus optional render hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoSettings {
    /// Key relative to the entity's storage prefix.
    pub object_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses_to_defaults() {
        let settings: EntitySettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, EntitySettings::default());
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let settings: EntitySettings =
            serde_json::from_str(r#"{"legacy_theme": "dark", "display": {"show_logo": true}}"#)
                .unwrap();

        assert!(settings.display.show_logo);
        assert!(settings.logo.is_none());
    }

    #[test]
    fn logo_round_trips() {
        let settings = EntitySettings {
            logo: Some(LogoSettings {
                object_key: "branding/logo.png".to_string(),
                width: Some(240),
                height: None,
            }),
            ..EntitySettings::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: EntitySettings = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, settings);
    }
}
