//! Explosions: radial impulse plus a short window in which the blasted bodies
//! pass through shelves.

use std::collections::HashMap;

use engine_core::{Timer, Vec2};
use physics::{Layer, PhysicsHost, RigidBodyHandle};

use crate::config::ExplosionConfig;
use crate::presentation::Presentation;

/// Impulse on a body at `position` from a blast at `center`, or `None` when the
/// body is too close to the centre to have a direction.
pub fn explosion_impulse(center: Vec2, position: Vec2, config: &ExplosionConfig) -> Option<Vec2> {
    let offset = position - center;
    let distance = offset.length();
    if distance < config.min_distance {
        return None;
    }
    let mut direction = offset / distance;
    direction.y += config.upward_bias;
    let direction = direction.normalize_or_zero();
    let falloff = 1.0 - (distance / config.radius).clamp(0.0, 1.0);
    Some(direction * config.force * falloff)
}

/// Bodies whose contacts with `layer` are off until the timer runs out.
#[derive(Debug, Clone)]
pub struct SuppressionWindow {
    pub bodies: Vec<RigidBodyHandle>,
    pub layer: Layer,
    pub timer: Timer,
}

#[derive(Debug, Default)]
pub struct ExplosionResolver {
    windows: Vec<SuppressionWindow>,
    /// Open windows per suppressed (body, layer).
    counts: HashMap<(RigidBodyHandle, Layer), u32>,
}

impl ExplosionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blast every body in range and open a suppression window over them.
    /// Returns the bodies caught in the blast.
    pub fn resolve(
        &mut self,
        host: &mut dyn PhysicsHost,
        center: Vec2,
        config: &ExplosionConfig,
        presenter: &mut dyn Presentation,
    ) -> Vec<RigidBodyHandle> {
        let bodies = host.overlap_bodies(center, config.radius, config.affected_layers);
        for &body in &bodies {
            let Some(pose) = host.pose(body) else {
                continue;
            };
            if let Some(impulse) = explosion_impulse(center, pose.position, config) {
                host.apply_impulse(body, impulse);
            }
        }

        if !bodies.is_empty() {
            let layer = config.suppressed_layer;
            for &body in &bodies {
                let open = self.counts.entry((body, layer)).or_insert(0);
                *open += 1;
                if *open == 1 {
                    host.set_layer_collisions(body, layer, false);
                }
            }
            self.windows.push(SuppressionWindow {
                bodies: bodies.clone(),
                layer,
                timer: Timer::new(config.suppression_duration),
            });
        }

        log::info!(
            "Explosion at ({:.2}, {:.2}) hit {} bodies",
            center.x,
            center.y,
            bodies.len()
        );
        presenter.spawn_explosion_effect(center);
        bodies
    }

    /// Run down every open window, restoring contacts for those that expire.
    pub fn advance(&mut self, host: &mut dyn PhysicsHost, dt: f32) {
        let mut expired = Vec::new();
        self.windows.retain_mut(|window| {
            if window.timer.tick(dt) {
                expired.push((std::mem::take(&mut window.bodies), window.layer));
                false
            } else {
                true
            }
        });

        for (bodies, layer) in expired {
            for body in bodies {
                let key = (body, layer);
                let Some(open) = self.counts.get_mut(&key) else {
                    continue;
                };
                *open -= 1;
                if *open == 0 {
                    self.counts.remove(&key);
                    host.set_layer_collisions(body, layer, true);
                }
            }
            log::debug!("Suppression window closed; {:?} contacts restored", layer);
        }
    }

    pub fn is_suppressed(&self, body: RigidBodyHandle, layer: Layer) -> bool {
        self.counts.contains_key(&(body, layer))
    }

    pub fn open_windows(&self) -> usize {
        self.windows.len()
    }
}
