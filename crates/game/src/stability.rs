//! Level completion: every item placed off the floor and at rest.

use hecs::World;
use physics::{PhysicsBody, PhysicsHost};

use crate::config::StabilityConfig;
use crate::drag::Draggable;
use crate::item::Item;
use crate::presentation::Presentation;

/// Whether one item counts as placed this tick.
pub fn is_settled(
    item: &Item,
    draggable: &Draggable,
    body: &PhysicsBody,
    host: &dyn PhysicsHost,
    config: &StabilityConfig,
) -> bool {
    let (Some(pose), Some(velocity)) = (host.pose(body.rigid_body), host.velocity(body.rigid_body)) else {
        return false;
    };
    !host.point_overlaps(pose.position, config.floor_layers)
        && !draggable.is_dragging()
        && velocity.speed() < config.settle_speed
        && !item.is_pending_explosion()
}

#[derive(Debug, Default)]
pub struct StabilityTracker {
    complete: bool,
}

impl StabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Check every item; the first tick they are all settled completes the level.
    /// Returns true only on that tick.
    pub fn poll(
        &mut self,
        world: &World,
        host: &dyn PhysicsHost,
        config: &StabilityConfig,
        presenter: &mut dyn Presentation,
    ) -> bool {
        if self.complete {
            return false;
        }

        let all_settled = world
            .query::<(&Item, &Draggable, &PhysicsBody)>()
            .iter()
            .all(|(_, (item, draggable, body))| is_settled(item, draggable, body, host, config));
        if !all_settled {
            return false;
        }

        self.complete = true;
        log::info!("All items settled, level complete");
        presenter.on_level_complete();
        true
    }

    pub fn reset(&mut self) {
        self.complete = false;
    }
}
