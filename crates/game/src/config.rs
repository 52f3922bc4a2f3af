//! Simulation tuning (drag, hazards, explosions, completion). Loaded from config.ron at startup.

use crate::hazard::CompatibilityTable;
use physics::{Layer, LayerMask};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Pointer drag and throw tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Multiplier from pointer velocity to release velocity.
    pub throw_force_scale: f32,
    /// Rotation speed while a rotate key is held, degrees per second.
    pub rotation_speed: f32,
    /// Gap kept between a held item and the wall it was dragged into.
    pub skin_margin: f32,
    /// Layers a held item cannot be dragged through.
    pub wall_layers: LayerMask,
    /// Layers the pointer can pick items from.
    pub pickable_layers: LayerMask,
    /// Layers holding sticky zones.
    pub sticky_layers: LayerMask,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            throw_force_scale: 15.0,
            rotation_speed: 120.0,
            skin_margin: 0.01,
            wall_layers: Layer::Wall.into(),
            pickable_layers: Layer::Item.into(),
            sticky_layers: Layer::Sticky.into(),
        }
    }
}

/// Proximity hazard tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Distance under which incompatible items start a countdown.
    pub detection_radius: f32,
    /// Seconds an incompatible pair must stay close before it explodes.
    pub explosion_delay: f32,
    /// Layers scanned for other items.
    pub scan_layers: LayerMask,
    /// Kind pairs that react when close.
    pub incompatible: CompatibilityTable,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            detection_radius: 2.0,
            explosion_delay: 3.0,
            scan_layers: LayerMask::from_layers(&[Layer::Item, Layer::Dragging]),
            incompatible: CompatibilityTable::default(),
        }
    }
}

/// Explosion and collision-suppression tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub radius: f32,
    pub force: f32,
    /// Added to the Y of the push direction before renormalising.
    pub upward_bias: f32,
    /// Bodies closer than this to the centre are skipped.
    pub min_distance: f32,
    /// Layers whose bodies get pushed.
    pub affected_layers: LayerMask,
    /// Layer pushed bodies stop colliding with for a short while.
    pub suppressed_layer: Layer,
    /// Seconds the suppression lasts.
    pub suppression_duration: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            force: 8.0,
            upward_bias: 0.6,
            min_distance: 0.001,
            affected_layers: LayerMask::ALL,
            suppressed_layer: Layer::Shelf,
            suppression_duration: 0.2,
        }
    }
}

/// Level completion tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Items slower than this count as resting.
    pub settle_speed: f32,
    /// Items whose origin is inside these layers are not placed.
    pub floor_layers: LayerMask,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            settle_speed: 0.1,
            floor_layers: Layer::Floor.into(),
        }
    }
}

/// Persistent simulation settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub hazard: HazardConfig,
    #[serde(default)]
    pub explosion: ExplosionConfig,
    #[serde(default)]
    pub stability: StabilityConfig,
}

impl SimConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be zero or more",
                })
            }
        }

        positive("hazard.detection_radius", self.hazard.detection_radius)?;
        non_negative("hazard.explosion_delay", self.hazard.explosion_delay)?;
        positive("explosion.radius", self.explosion.radius)?;
        non_negative("explosion.force", self.explosion.force)?;
        non_negative("explosion.min_distance", self.explosion.min_distance)?;
        non_negative("explosion.suppression_duration", self.explosion.suppression_duration)?;
        non_negative("drag.throw_force_scale", self.drag.throw_force_scale)?;
        non_negative("drag.skin_margin", self.drag.skin_margin)?;
        non_negative("stability.settle_speed", self.stability.settle_speed)?;
        Ok(())
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::ItemKind;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SimConfig::from_ron_str("()").expect("defaults parse");
        assert_eq!(config.hazard.detection_radius, 2.0);
        assert_eq!(config.hazard.explosion_delay, 3.0);
        assert_eq!(config.explosion.suppressed_layer, Layer::Shelf);
        assert!(config.hazard.scan_layers.contains(Layer::Dragging));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SimConfig::from_ron_str(
            "(hazard: (explosion_delay: 1.5, incompatible: [(Blue, Red)]), drag: (wall_layers: [Wall, Shelf]))",
        )
        .expect("valid config");
        assert_eq!(config.hazard.explosion_delay, 1.5);
        assert_eq!(config.hazard.detection_radius, 2.0);
        assert!(config.hazard.incompatible.is_incompatible(ItemKind::Red, ItemKind::Blue));
        assert!(!config.hazard.incompatible.is_incompatible(ItemKind::Blue, ItemKind::Blue));
        assert!(config.drag.wall_layers.contains(Layer::Shelf));
        assert_eq!(config.drag.throw_force_scale, 15.0);
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = SimConfig::from_ron_str("(hazard: (detection_radius: 0.0))").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "hazard.detection_radius",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_ron() {
        assert!(matches!(
            SimConfig::from_ron_str("(hazard: "),
            Err(ConfigError::Parse(_))
        ));
    }
}
