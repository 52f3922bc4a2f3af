//! Fixed-tick gameplay update: runs every system once, in order.

use engine_core::FIXED_DT;
use input::InputState;
use physics::PhysicsHost;

use crate::drag::{handle_pointer, update_dragging};
use crate::presentation::Presentation;
use crate::state::{GamePhase, Simulation};
use crate::sticky::update_sticky_zones;

/// Run one fixed tick of gameplay.
///
/// Order: pointer input, drag movement, physics step, suppression windows,
/// sticky probing, hazard scan, countdowns (and their explosions), completion.
pub fn tick<H: PhysicsHost>(sim: &mut Simulation<H>, input: &InputState, presenter: &mut dyn Presentation) {
    let dt = FIXED_DT;
    let playing = sim.phase == GamePhase::Playing;

    if playing {
        handle_pointer(
            &mut sim.world,
            &mut sim.host,
            &sim.bodies,
            &sim.projection,
            input,
            &sim.config.drag,
        );
    }
    update_dragging(&mut sim.world, &mut sim.host, &sim.projection, input, dt, &sim.config.drag);

    sim.host.step(dt);
    sim.explosions.advance(&mut sim.host, dt);

    update_sticky_zones(&mut sim.world, &mut sim.host, &sim.config.drag);

    sim.hazards
        .scan(&mut sim.world, &sim.host, &sim.bodies, &sim.config.hazard, presenter);
    let detonations = sim
        .hazards
        .advance(&mut sim.world, &sim.host, &sim.config.hazard, dt, presenter);
    for center in detonations {
        sim.explosions
            .resolve(&mut sim.host, center, &sim.config.explosion, presenter);
    }

    if playing
        && sim
            .stability
            .poll(&sim.world, &sim.host, &sim.config.stability, presenter)
    {
        sim.phase = GamePhase::Complete;
    }

    sim.tick_count += 1;
}
