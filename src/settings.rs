//! Game settings and preferences
//!
//! Gameplay itself is fixed by `consts`; these only affect presentation
//! and audio. Nothing is persisted, so `load` always yields the defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Short sound cues
    pub sfx_enabled: bool,
    /// Background loop
    pub music_enabled: bool,

    // === HUD ===
    /// Animate the score counter instead of jumping to the new value
    pub show_score_ticker: bool,
    /// Show the current level next to score and lives
    pub show_level: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            music_enabled: true,
            show_score_ticker: true,
            show_level: true,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        let settings = Self::default();
        log::debug!("Using default settings: {:?}", settings);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_everything() {
        let s = Settings::load();
        assert!(s.sfx_enabled);
        assert!(s.music_enabled);
        assert!(s.show_score_ticker);
        assert!(s.show_level);
    }

    #[test]
    fn test_serde_roundtrip_keeps_fields() {
        let s = Settings {
            music_enabled: false,
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"music_enabled\":false"));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
