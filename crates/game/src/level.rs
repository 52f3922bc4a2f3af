//! Level descriptions: static geometry, sticky zones, the items and the intro dialogue.
//!
//! Levels are plain RON files; [`LevelDesc::demo`] is the built-in cave level.

use std::path::Path;

use engine_core::{ItemKind, Pose2, Vec2};
use hecs::World;
use physics::{ItemShape, Layer, PhysicsWorld};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::{item_bundle, BodyIndex, Item};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not read level: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse level: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid level: {0}")]
    Invalid(String),
}

/// An axis-aligned box, optionally rotated around its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDesc {
    pub center: Vec2,
    pub half_extents: Vec2,
    #[serde(default)]
    pub angle: f32,
}

impl BoxDesc {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
            angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeDesc {
    Box { half_extents: Vec2 },
    Ball { radius: f32 },
}

impl Default for ShapeDesc {
    fn default() -> Self {
        ShapeDesc::Box {
            half_extents: Vec2::splat(0.4),
        }
    }
}

impl From<ShapeDesc> for ItemShape {
    fn from(shape: ShapeDesc) -> Self {
        match shape {
            ShapeDesc::Box { half_extents } => ItemShape::Box { half_extents },
            ShapeDesc::Ball { radius } => ItemShape::Ball { radius },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDesc {
    #[serde(default)]
    pub kind: ItemKind,
    pub position: Vec2,
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub shape: ShapeDesc,
    #[serde(default)]
    pub stickable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    pub name: String,
    #[serde(default)]
    pub intro_lines: Vec<String>,
    #[serde(default)]
    pub walls: Vec<BoxDesc>,
    #[serde(default)]
    pub shelves: Vec<BoxDesc>,
    /// Zones that count as the floor. Items resting with their origin inside are not placed.
    #[serde(default)]
    pub floors: Vec<BoxDesc>,
    #[serde(default)]
    pub sticky_zones: Vec<BoxDesc>,
    #[serde(default)]
    pub items: Vec<ItemDesc>,
}

impl LevelDesc {
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_ron_str(&data)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, LevelError> {
        let level: Self = ron::from_str(data)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        let boxes = self
            .walls
            .iter()
            .chain(&self.shelves)
            .chain(&self.floors)
            .chain(&self.sticky_zones);
        for (i, b) in boxes.enumerate() {
            if b.half_extents.x <= 0.0 || b.half_extents.y <= 0.0 {
                return Err(LevelError::Invalid(format!("box {i} has a non-positive half extent")));
            }
        }
        for (i, item) in self.items.iter().enumerate() {
            let valid = match item.shape {
                ShapeDesc::Box { half_extents } => half_extents.x > 0.0 && half_extents.y > 0.0,
                ShapeDesc::Ball { radius } => radius > 0.0,
            };
            if !valid {
                return Err(LevelError::Invalid(format!("item {i} has a degenerate shape")));
            }
        }
        Ok(())
    }

    /// Create colliders and item entities. Returns the body index for the new items.
    pub fn build(&self, world: &mut World, physics: &mut PhysicsWorld) -> BodyIndex {
        for (boxes, layer) in [(&self.walls, Layer::Wall), (&self.shelves, Layer::Shelf)] {
            for b in boxes {
                physics.add_static_box(b.center, b.half_extents, b.angle, layer);
            }
        }
        for (zones, layer) in [(&self.floors, Layer::Floor), (&self.sticky_zones, Layer::Sticky)] {
            for zone in zones {
                physics.add_sensor_box(zone.center, zone.half_extents, layer);
            }
        }

        for desc in &self.items {
            let body = physics.add_item(Pose2::new(desc.position, desc.angle), desc.shape.into());
            let mut item = Item::new(desc.kind);
            if desc.stickable {
                item = item.stickable();
            }
            world.spawn(item_bundle(item, body));
        }
        physics.update_query_pipeline();

        log::info!(
            "Built level '{}': {} items, {} shelves, {} sticky zones",
            self.name,
            self.items.len(),
            self.shelves.len(),
            self.sticky_zones.len()
        );
        BodyIndex::build(world)
    }

    /// The small cave: two shelves, a sticky ledge, two blues, a red and a pebble.
    pub fn demo() -> Self {
        let item = |kind, x: f32, y: f32| ItemDesc {
            kind,
            position: Vec2::new(x, y),
            angle: 0.0,
            shape: ShapeDesc::default(),
            stickable: false,
        };
        Self {
            name: "Small Cave".to_string(),
            intro_lines: vec![
                "Something rumbles deep in the cave.".to_string(),
                "Put every crystal up on a shelf.".to_string(),
                "Keep the blue ones apart. The red ones too.".to_string(),
            ],
            walls: vec![
                BoxDesc::new(Vec2::new(0.0, -4.5), Vec2::new(9.0, 0.5)),
                BoxDesc::new(Vec2::new(-8.5, 0.0), Vec2::new(0.5, 5.0)),
                BoxDesc::new(Vec2::new(8.5, 0.0), Vec2::new(0.5, 5.0)),
            ],
            shelves: vec![
                BoxDesc::new(Vec2::new(-4.0, 0.0), Vec2::new(2.0, 0.2)),
                BoxDesc::new(Vec2::new(4.0, 1.0), Vec2::new(2.0, 0.2)),
            ],
            floors: vec![BoxDesc::new(Vec2::new(0.0, -3.0), Vec2::new(8.0, 1.0))],
            sticky_zones: vec![BoxDesc::new(Vec2::new(0.0, 3.5), Vec2::new(1.0, 0.5))],
            items: vec![
                item(ItemKind::Blue, -6.0, -3.6),
                item(ItemKind::Blue, -1.0, -3.6),
                item(ItemKind::Red, 2.0, -3.6),
                ItemDesc {
                    stickable: true,
                    shape: ShapeDesc::Ball { radius: 0.3 },
                    ..item(ItemKind::Normal, 5.0, -3.7)
                },
            ],
        }
    }
}
