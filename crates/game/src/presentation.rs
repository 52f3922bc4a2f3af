//! Fire-and-forget cues sent to the presentation layer (animation, VFX, UI).
//!
//! The simulation never waits on any of these.

use glam::Vec2;
use hecs::Entity;

/// Receiver of simulation cues.
pub trait Presentation {
    /// An item joined an armed countdown; start its warning shake.
    fn play_warning(&mut self, item: Entity);
    /// An item's countdown ended (cancelled or detonated); settle its visuals.
    fn play_reset(&mut self, item: Entity);
    fn spawn_explosion_effect(&mut self, position: Vec2);
    /// Every item is placed and resting. Sent once per level.
    fn on_level_complete(&mut self);
}

/// A recorded cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    Warning(Entity),
    Reset(Entity),
    Explosion(Vec2),
    LevelComplete,
}

/// Recording presenter, handy for replays and tests.
impl Presentation for Vec<SimEvent> {
    fn play_warning(&mut self, item: Entity) {
        self.push(SimEvent::Warning(item));
    }

    fn play_reset(&mut self, item: Entity) {
        self.push(SimEvent::Reset(item));
    }

    fn spawn_explosion_effect(&mut self, position: Vec2) {
        self.push(SimEvent::Explosion(position));
    }

    fn on_level_complete(&mut self) {
        self.push(SimEvent::LevelComplete);
    }
}

/// Presenter for headless runs: writes every cue to the log.
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub explosions: u32,
    pub completed: bool,
}

impl Presentation for LogPresenter {
    fn play_warning(&mut self, item: Entity) {
        log::info!("[cue] warning shake on {:?}", item);
    }

    fn play_reset(&mut self, item: Entity) {
        log::info!("[cue] reset {:?}", item);
    }

    fn spawn_explosion_effect(&mut self, position: Vec2) {
        self.explosions += 1;
        log::info!("[vfx] explosion at ({:.2}, {:.2})", position.x, position.y);
    }

    fn on_level_complete(&mut self) {
        self.completed = true;
        log::info!("[ui] level complete");
    }
}
