//! Scripted pointer and key input, used to play the demo level headless.

use std::collections::VecDeque;

use engine_core::Vec2;
use input::{ElementState, InputState, KeyCode, ScreenProjection, GRAB_BUTTON};

/// One scripted input action. Timed steps take whole ticks; the rest are instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    /// Put the pointer over a world point.
    JumpTo(Vec2),
    /// Glide the pointer to a world point over `ticks` ticks.
    MoveTo { target: Vec2, ticks: u32 },
    Press,
    Release,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    Wait(u32),
}

#[derive(Debug, Clone, Default)]
pub struct PointerScript {
    steps: VecDeque<ScriptStep>,
    /// Pointer position on the gameplay plane.
    cursor: Vec2,
    /// Start point and ticks done of the timed step in progress.
    progress: Option<(Vec2, u32)>,
}

impl PointerScript {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Pick up an item at `from`, carry it to `to` and let go once the pointer is still.
    pub fn carry(from: Vec2, to: Vec2, ticks: u32) -> [ScriptStep; 6] {
        [
            ScriptStep::JumpTo(from),
            ScriptStep::Press,
            ScriptStep::MoveTo { target: to, ticks },
            ScriptStep::Wait(4),
            ScriptStep::Release,
            ScriptStep::Wait(45),
        ]
    }

    /// Shelve every item of [`LevelDesc::demo`](crate::level::LevelDesc::demo).
    pub fn demo() -> Self {
        let mut steps = Vec::new();
        steps.extend(Self::carry(Vec2::new(-6.0, -3.6), Vec2::new(-4.5, 0.8), 40));
        steps.extend(Self::carry(Vec2::new(-1.0, -3.6), Vec2::new(4.8, 1.8), 50));
        // Spin the red crystal a quarter turn on the way up.
        steps.push(ScriptStep::KeyDown(KeyCode::KeyA));
        steps.extend(Self::carry(Vec2::new(2.0, -3.6), Vec2::new(-2.8, 0.8), 45));
        steps.insert(steps.len() - 3, ScriptStep::KeyUp(KeyCode::KeyA));
        steps.extend(Self::carry(Vec2::new(5.0, -3.7), Vec2::new(0.0, 3.5), 40));
        Self::new(steps)
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Feed this tick's input: run instant steps up to and including one timed step.
    pub fn apply(&mut self, input: &mut InputState, projection: &ScreenProjection) {
        while let Some(&step) = self.steps.front() {
            match step {
                ScriptStep::JumpTo(point) => self.cursor = point,
                ScriptStep::Press => input.process_mouse_button(GRAB_BUTTON, ElementState::Pressed),
                ScriptStep::Release => input.process_mouse_button(GRAB_BUTTON, ElementState::Released),
                ScriptStep::KeyDown(key) => input.process_keyboard(key, ElementState::Pressed),
                ScriptStep::KeyUp(key) => input.process_keyboard(key, ElementState::Released),
                ScriptStep::MoveTo { target, ticks } => {
                    let (start, done) = self.progress.get_or_insert((self.cursor, 0));
                    *done += 1;
                    let t = (*done as f32 / ticks.max(1) as f32).min(1.0);
                    self.cursor = start.lerp(target, t);
                    if *done >= ticks {
                        self.progress = None;
                        self.steps.pop_front();
                    }
                    break;
                }
                ScriptStep::Wait(ticks) => {
                    let (_, done) = self.progress.get_or_insert((self.cursor, 0));
                    *done += 1;
                    if *done >= ticks {
                        self.progress = None;
                        self.steps.pop_front();
                    }
                    break;
                }
            }
            self.steps.pop_front();
        }

        let pixel = projection.world_to_screen(self.cursor.extend(0.0)).truncate();
        input.process_cursor_position((pixel.x as f64, pixel.y as f64));
    }
}
