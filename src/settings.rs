//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Next preset in the Low, Medium, High cycle
    pub fn next(self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum particles drawn for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 200,
            QualityPreset::High => 1000,
        }
    }

    /// Share of the starfield drawn (1.0 = every star)
    pub fn star_density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether the player and current stair get a glow halo
    pub fn glow_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on combos and death
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,
    /// Twinkling background stars
    pub starfield: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, no twinkle)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            screen_shake: true,
            particles: true,
            starfield: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective star twinkle (respects reduced_motion)
    pub fn effective_twinkle(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Number of stars to draw out of `total`
    pub fn visible_stars(&self, total: usize) -> usize {
        if !self.starfield {
            return 0;
        }
        ((total as f32 * self.quality.star_density()).round() as usize).min(total)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "infinite_stairs_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_twinkle());
    }

    #[test]
    fn test_particles_off_caps_at_zero() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_visible_stars_by_preset() {
        assert_eq!(Settings::from_preset(QualityPreset::High).visible_stars(100), 100);
        assert_eq!(Settings::from_preset(QualityPreset::Low).visible_stars(100), 25);
        let off = Settings {
            starfield: false,
            ..Settings::default()
        };
        assert_eq!(off.visible_stars(100), 0);
    }

    #[test]
    fn test_roundtrip_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::Low);
        assert!(settings.screen_shake);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_default_draws_full_scene() {
        let settings = Settings::default();
        assert_eq!(settings.visible_stars(100), 100);
        assert_eq!(settings.max_particles(), 1000);
        assert!(settings.effective_screen_shake());
    }

    #[test]
    fn test_quality_cycles_through_presets() {
        let mut quality = QualityPreset::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            quality = quality.next();
            seen.push(quality);
        }
        assert_eq!(
            seen,
            vec![QualityPreset::Low, QualityPreset::Medium, QualityPreset::High]
        );
    }
}
