//! Print settings chosen on the custom-print form.

use serde::{Deserialize, Serialize};

use crate::material::{MaterialKind, SupportMode};

/// Layer height the storefront preselects, in millimetres.
pub const DEFAULT_LAYER_HEIGHT_MM: f64 = 0.2;

/// Infill the storefront preselects, in percent.
pub const DEFAULT_INFILL_PERCENT: u8 = 20;

/// The user's print configuration.
///
/// `infill_percent` is expected in `[0, 100]`; values coming from a UI
/// control should go through [`PrintConfig::with_infill_clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintConfig {
    pub material: MaterialKind,
    pub infill_percent: u8,
    pub layer_height_mm: f64,
    #[serde(default)]
    pub supports: SupportMode,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            material: MaterialKind::Pla,
            infill_percent: DEFAULT_INFILL_PERCENT,
            layer_height_mm: DEFAULT_LAYER_HEIGHT_MM,
            supports: SupportMode::None,
        }
    }
}

impl PrintConfig {
    pub fn new(material: MaterialKind, infill_percent: u8, layer_height_mm: f64) -> Self {
        Self {
            material,
            infill_percent,
            layer_height_mm,
            supports: SupportMode::None,
        }
    }

    /// Copy of this config with infill taken from a raw UI value, clamped to `[0, 100]`.
    pub fn with_infill_clamped(self, raw_percent: i64) -> Self {
        Self {
            infill_percent: raw_percent.clamp(0, 100) as u8,
            ..self
        }
    }

    pub fn with_material(self, material: MaterialKind) -> Self {
        Self { material, ..self }
    }

    pub fn with_layer_height(self, layer_height_mm: f64) -> Self {
        Self {
            layer_height_mm,
            ..self
        }
    }

    pub fn with_supports(self, supports: SupportMode) -> Self {
        Self { supports, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_storefront_preselection() {
        let cfg = PrintConfig::default();
        assert_eq!(cfg.material, MaterialKind::Pla);
        assert_eq!(cfg.infill_percent, 20);
        assert_eq!(cfg.layer_height_mm, 0.2);
        assert_eq!(cfg.supports, SupportMode::None);
    }

    #[test]
    fn infill_is_clamped() {
        let cfg = PrintConfig::default();
        assert_eq!(cfg.with_infill_clamped(-15).infill_percent, 0);
        assert_eq!(cfg.with_infill_clamped(55).infill_percent, 55);
        assert_eq!(cfg.with_infill_clamped(250).infill_percent, 100);
    }

    #[test]
    fn supports_default_when_missing_from_json() {
        let cfg: PrintConfig = serde_json::from_str(
            r#"{"material":"tpu","infill_percent":40,"layer_height_mm":0.12}"#,
        )
        .unwrap();
        assert_eq!(cfg.material, MaterialKind::Tpu);
        assert_eq!(cfg.supports, SupportMode::None);
    }
}
