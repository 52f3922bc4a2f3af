//! Headless shelf puzzle runner.
//!
//! Plays a level on a fixed 60 Hz clock. The built-in cave level is solved by a
//! scripted pointer; a level file given on the command line runs without input.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_core::FixedClock;
use game::config::SimConfig;
use game::level::LevelDesc;
use game::presentation::LogPresenter;
use game::script::PointerScript;
use game::state::Simulation;
use game::update;
use input::InputState;

/// Simulated wall-clock length of one rendered frame.
const FRAME_TIME: Duration = Duration::from_micros(33_333);
/// Simulated seconds before giving up on completion.
const TIME_LIMIT: f64 = 60.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();
    let (level, mut script) = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let level = LevelDesc::load(&path).with_context(|| format!("failed to load level {}", path.display()))?;
            (level, PointerScript::default())
        }
        None => (LevelDesc::demo(), PointerScript::demo()),
    };

    log::info!("Starting shelf puzzle: '{}'", level.name);
    let mut sim = Simulation::from_level(level, config).context("failed to build level")?;

    while let Some(line) = sim.dialogue.current_line() {
        log::info!("[dialogue] {}", line);
        sim.next_dialogue_line();
    }

    let mut clock = FixedClock::new();
    let mut input = InputState::new();
    let mut presenter = LogPresenter::default();

    while !sim.is_complete() && clock.elapsed_seconds() < TIME_LIMIT {
        for _ in 0..clock.advance(FRAME_TIME) {
            script.apply(&mut input, &sim.projection);
            update::tick(&mut sim, &input, &mut presenter);
            input.begin_frame();
            if sim.is_complete() {
                break;
            }
        }
    }

    if presenter.completed {
        log::info!(
            "Level complete after {} ticks ({:.2}s), {} explosions",
            sim.tick_count,
            sim.tick_count as f32 * clock.fixed_timestep_seconds(),
            presenter.explosions
        );
    } else {
        log::warn!(
            "Level not complete after {:.0}s ({} countdowns armed, script {})",
            TIME_LIMIT,
            sim.hazards.active_count(),
            if script.is_finished() { "finished" } else { "unfinished" }
        );
    }
    Ok(())
}
