//! Simulation state: the item world, the physics host and every gameplay registry.

use hecs::World;
use input::ScreenProjection;
use physics::{PhysicsHost, PhysicsWorld};

use crate::config::SimConfig;
use crate::dialogue::DialogueState;
use crate::explosion::ExplosionResolver;
use crate::hazard::HazardCoordinator;
use crate::item::BodyIndex;
use crate::level::{LevelDesc, LevelError};
use crate::stability::StabilityTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Intro dialogue on screen; items cannot be grabbed.
    Intro,
    Playing,
    /// Every item was placed. The scene keeps simulating.
    Complete,
}

/// One running level.
pub struct Simulation<H: PhysicsHost> {
    pub world: World,
    pub host: H,
    pub bodies: BodyIndex,
    pub config: SimConfig,
    pub projection: ScreenProjection,
    pub hazards: HazardCoordinator,
    pub explosions: ExplosionResolver,
    pub stability: StabilityTracker,
    pub dialogue: DialogueState,
    pub phase: GamePhase,
    pub tick_count: u64,
    level: Option<LevelDesc>,
}

impl<H: PhysicsHost> Simulation<H> {
    /// Wrap an already populated world and host.
    pub fn with_host(world: World, host: H, config: SimConfig, intro_lines: Vec<String>) -> Self {
        let bodies = BodyIndex::build(&world);
        let dialogue = DialogueState::open(intro_lines);
        let phase = if dialogue.is_open() {
            GamePhase::Intro
        } else {
            GamePhase::Playing
        };
        Self {
            world,
            host,
            bodies,
            config,
            projection: ScreenProjection::default(),
            hazards: HazardCoordinator::new(),
            explosions: ExplosionResolver::new(),
            stability: StabilityTracker::new(),
            dialogue,
            phase,
            tick_count: 0,
            level: None,
        }
    }

    /// Advance the intro by one line; the last one starts play.
    pub fn next_dialogue_line(&mut self) {
        if self.dialogue.next_line() {
            self.start_gameplay();
        }
    }

    /// Close the intro and hand control to the player.
    pub fn start_gameplay(&mut self) {
        if self.phase != GamePhase::Intro {
            return;
        }
        self.dialogue = DialogueState::Closed;
        self.phase = GamePhase::Playing;
        log::info!("Gameplay started");
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Complete
    }

    pub fn level(&self) -> Option<&LevelDesc> {
        self.level.as_ref()
    }
}

impl Simulation<PhysicsWorld> {
    /// Build `level` into a fresh rapier world.
    pub fn from_level(level: LevelDesc, config: SimConfig) -> Result<Self, LevelError> {
        level.validate()?;
        let mut world = World::new();
        let mut physics = PhysicsWorld::new();
        level.build(&mut world, &mut physics);
        let mut sim = Self::with_host(world, physics, config, level.intro_lines.clone());
        sim.level = Some(level);
        Ok(sim)
    }

    /// Rebuild the current level from scratch, intro included.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        let Some(level) = self.level.clone() else {
            return Ok(());
        };
        log::info!("Restarting level '{}'", level.name);
        *self = Self::from_level(level, self.config.clone())?;
        Ok(())
    }
}
