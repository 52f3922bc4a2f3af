//! Sticky zones: stickable items that touch one hang there without gravity.

use hecs::World;
use physics::{PhysicsBody, PhysicsHost};

use crate::config::DragConfig;
use crate::drag::Draggable;
use crate::item::Item;

/// Probe every stickable item against the sticky layer and fire enter/exit on change.
pub fn update_sticky_zones(world: &mut World, host: &mut dyn PhysicsHost, config: &DragConfig) {
    for (entity, (item, draggable, body)) in world.query_mut::<(&Item, &mut Draggable, &PhysicsBody)>() {
        if !item.stickable {
            continue;
        }
        let inside = host.body_overlaps(body.rigid_body, config.sticky_layers);
        match (draggable.in_sticky_zone(), inside) {
            (false, true) => {
                draggable.enter_sticky_zone(body.rigid_body, host);
                log::debug!("{:?} stuck", entity);
            }
            (true, false) => {
                draggable.exit_sticky_zone(body.rigid_body, host);
                log::debug!("{:?} came unstuck", entity);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body_of, spawn_item, ScriptedHost};
    use engine_core::{ItemKind, Vec2, Velocity2};

    #[test]
    fn stickable_item_sticks_and_falls_again() {
        let mut world = World::new();
        let mut host = ScriptedHost::new();
        host.sticky_zones.push((Vec2::new(-1.0, 2.0), Vec2::new(1.0, 4.0)));
        let item = spawn_item(&mut world, &mut host, ItemKind::Normal, Vec2::new(0.0, 3.0));
        world.get::<&mut Item>(item).unwrap().stickable = true;
        let body = body_of(&world, item);
        host.body_mut(body).velocity = Velocity2::new(Vec2::new(0.0, -4.0));

        let config = DragConfig::default();
        update_sticky_zones(&mut world, &mut host, &config);
        assert!(world.get::<&Draggable>(item).unwrap().is_sticky());
        assert_eq!(host.body(body).gravity_scale, 0.0);
        assert_eq!(host.body(body).velocity, Velocity2::default());

        // Staying inside does not fire again.
        host.body_mut(body).gravity_scale = 0.5;
        update_sticky_zones(&mut world, &mut host, &config);
        assert_eq!(host.body(body).gravity_scale, 0.5);

        host.teleport(body, Vec2::new(5.0, 3.0));
        update_sticky_zones(&mut world, &mut host, &config);
        assert!(!world.get::<&Draggable>(item).unwrap().is_sticky());
        assert_eq!(host.body(body).gravity_scale, 1.0);
    }

    #[test]
    fn plain_items_ignore_sticky_zones() {
        let mut world = World::new();
        let mut host = ScriptedHost::new();
        host.sticky_zones.push((Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)));
        let item = spawn_item(&mut world, &mut host, ItemKind::Red, Vec2::ZERO);

        update_sticky_zones(&mut world, &mut host, &DragConfig::default());
        assert!(!world.get::<&Draggable>(item).unwrap().is_sticky());
        assert_eq!(host.body(body_of(&world, item)).gravity_scale, 1.0);
    }
}
