//! Proximity hazards: incompatible items that stay close for too long explode.
//!
//! Each unordered pair of incompatible items gets at most one countdown. The
//! countdown is cancelled as soon as the pair separates or either item goes
//! away, and detonates at the pair's midpoint when its timer runs out.

use std::collections::{BTreeMap, BTreeSet};

use engine_core::{ItemKind, Timer, Vec2};
use hecs::{Entity, World};
use physics::{PhysicsBody, PhysicsHost};
use serde::{Deserialize, Serialize};

use crate::config::HazardConfig;
use crate::item::{BodyIndex, Item};
use crate::presentation::Presentation;

/// Unordered set of kind pairs that react when close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(ItemKind, ItemKind)>", into = "Vec<(ItemKind, ItemKind)>")]
pub struct CompatibilityTable {
    pairs: BTreeSet<(ItemKind, ItemKind)>,
}

impl CompatibilityTable {
    pub fn new(pairs: impl IntoIterator<Item = (ItemKind, ItemKind)>) -> Self {
        Self {
            pairs: pairs.into_iter().map(|(a, b)| canonical(a, b)).collect(),
        }
    }

    /// Symmetric: `is_incompatible(a, b) == is_incompatible(b, a)`.
    pub fn is_incompatible(&self, a: ItemKind, b: ItemKind) -> bool {
        self.pairs.contains(&canonical(a, b))
    }

    /// Whether `kind` reacts with anything at all.
    pub fn is_reactive(&self, kind: ItemKind) -> bool {
        self.pairs.iter().any(|&(a, b)| a == kind || b == kind)
    }
}

/// Like kinds react: two blues, or two reds.
impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::new([(ItemKind::Blue, ItemKind::Blue), (ItemKind::Red, ItemKind::Red)])
    }
}

impl From<Vec<(ItemKind, ItemKind)>> for CompatibilityTable {
    fn from(pairs: Vec<(ItemKind, ItemKind)>) -> Self {
        Self::new(pairs)
    }
}

impl From<CompatibilityTable> for Vec<(ItemKind, ItemKind)> {
    fn from(table: CompatibilityTable) -> Self {
        table.pairs.into_iter().collect()
    }
}

fn canonical(a: ItemKind, b: ItemKind) -> (ItemKind, ItemKind) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Order-independent identity of two items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: Entity,
    high: Entity,
}

impl PairKey {
    pub fn new(a: Entity, b: Entity) -> Self {
        if a.to_bits() <= b.to_bits() {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn members(&self) -> (Entity, Entity) {
        (self.low, self.high)
    }
}

/// An armed countdown for one pair.
#[derive(Debug, Clone, Copy)]
pub struct CountdownTask {
    pub pair: PairKey,
    pub timer: Timer,
}

enum Outcome {
    Cancelled,
    Detonated(Vec2),
}

/// Registry of armed countdowns, keyed by pair.
#[derive(Debug, Default)]
pub struct HazardCoordinator {
    active: BTreeMap<PairKey, CountdownTask>,
}

impl HazardCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a countdown for every close incompatible pair that has none yet.
    /// Returns how many were armed.
    pub fn scan(
        &mut self,
        world: &mut World,
        host: &dyn PhysicsHost,
        bodies: &BodyIndex,
        config: &HazardConfig,
        presenter: &mut dyn Presentation,
    ) -> usize {
        let items: Vec<(Entity, ItemKind, Vec2)> = world
            .query::<(&Item, &PhysicsBody)>()
            .iter()
            .filter(|(_, (item, _))| config.incompatible.is_reactive(item.kind))
            .filter_map(|(entity, (item, body))| {
                host.pose(body.rigid_body)
                    .map(|pose| (entity, item.kind, pose.position))
            })
            .collect();

        let mut armed = 0;
        for &(entity, kind, position) in &items {
            for handle in host.overlap_bodies(position, config.detection_radius, config.scan_layers) {
                let Some(other) = bodies.entity(handle) else {
                    continue;
                };
                if other == entity {
                    continue;
                }
                let Some(&(_, other_kind, other_position)) = items.iter().find(|(e, _, _)| *e == other) else {
                    continue;
                };
                if !config.incompatible.is_incompatible(kind, other_kind) {
                    continue;
                }
                if position.distance(other_position) >= config.detection_radius {
                    continue;
                }
                let pair = PairKey::new(entity, other);
                if self.active.contains_key(&pair) {
                    continue;
                }

                self.active.insert(
                    pair,
                    CountdownTask {
                        pair,
                        timer: Timer::new(config.explosion_delay),
                    },
                );
                for member in [entity, other] {
                    if let Ok(mut item) = world.get::<&mut Item>(member) {
                        item.arm();
                    }
                    presenter.play_warning(member);
                }
                log::info!("Countdown armed for {:?} and {:?}", pair.low, pair.high);
                armed += 1;
            }
        }
        armed
    }

    /// Tick every countdown. Pairs that separated or lost an item are cancelled;
    /// finished ones are removed and their midpoints returned for detonation.
    pub fn advance(
        &mut self,
        world: &mut World,
        host: &dyn PhysicsHost,
        config: &HazardConfig,
        dt: f32,
        presenter: &mut dyn Presentation,
    ) -> Vec<Vec2> {
        let mut finished = Vec::new();
        for (key, task) in self.active.iter_mut() {
            let (a, b) = key.members();
            let positions = position_of(world, host, a).zip(position_of(world, host, b));
            // Time is only added after a tick survives the distance check, so
            // the tick that armed the pair counts as t = 0.
            let outcome = match positions {
                None => Some(Outcome::Cancelled),
                Some((pa, pb)) if task.timer.is_finished() => Some(Outcome::Detonated((pa + pb) * 0.5)),
                Some((pa, pb)) if pa.distance(pb) > config.detection_radius => Some(Outcome::Cancelled),
                Some(_) => {
                    task.timer.tick(dt);
                    None
                }
            };
            if let Some(outcome) = outcome {
                finished.push((*key, outcome));
            }
        }

        let mut detonations = Vec::new();
        for (key, outcome) in finished {
            self.active.remove(&key);
            let (a, b) = key.members();
            for member in [a, b] {
                if let Ok(mut item) = world.get::<&mut Item>(member) {
                    item.disarm();
                    presenter.play_reset(member);
                }
            }
            match outcome {
                Outcome::Cancelled => log::debug!("Countdown cancelled for {:?} and {:?}", a, b),
                Outcome::Detonated(at) => {
                    log::info!("Pair {:?}/{:?} detonated at ({:.2}, {:.2})", a, b, at.x, at.y);
                    detonations.push(at);
                }
            }
        }
        detonations
    }

    pub fn is_armed(&self, a: Entity, b: Entity) -> bool {
        self.active.contains_key(&PairKey::new(a, b))
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &CountdownTask> {
        self.active.values()
    }
}

fn position_of(world: &World, host: &dyn PhysicsHost, entity: Entity) -> Option<Vec2> {
    let body = world.get::<&PhysicsBody>(entity).ok()?.rigid_body;
    host.pose(body).map(|pose| pose.position)
}
