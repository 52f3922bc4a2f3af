//! Intro dialogue shown before play starts. Advancing past the last line starts the game.

/// Intro dialogue: open while lines remain, closed once the player has read them all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogueState {
    Open {
        lines: Vec<String>,
        index: usize,
    },
    #[default]
    Closed,
}

impl DialogueState {
    /// Open on the first line, or closed straight away when there is nothing to say.
    pub fn open(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            DialogueState::Closed
        } else {
            DialogueState::Open { lines, index: 0 }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DialogueState::Open { .. })
    }

    /// Line currently on screen.
    pub fn current_line(&self) -> Option<&str> {
        match self {
            DialogueState::Open { lines, index } => lines.get(*index).map(String::as_str),
            DialogueState::Closed => None,
        }
    }

    /// Show the next line. Returns true if this closed the dialogue.
    pub fn next_line(&mut self) -> bool {
        let DialogueState::Open { lines, index } = self else {
            return false;
        };
        *index += 1;
        if *index < lines.len() {
            false
        } else {
            *self = DialogueState::Closed;
            true
        }
    }
}
