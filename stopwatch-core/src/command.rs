use crate::RunState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Start,
    Pause,
    Reset,
    Lap,
    /// Pause when running, otherwise start or resume.
    Toggle,
}

impl Command {
    /// Keyboard shortcut mapping, case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(Command::Start),
            'p' => Some(Command::Pause),
            'r' => Some(Command::Reset),
            'l' => Some(Command::Lap),
            ' ' => Some(Command::Toggle),
            _ => None,
        }
    }
}

/// Which actions currently do something, for greying out controls.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub reset: bool,
    pub lap: bool,
}

impl Controls {
    pub fn for_state(state: RunState) -> Self {
        match state {
            RunState::Idle => Self { start: true, pause: false, reset: false, lap: false },
            RunState::Running => Self { start: false, pause: true, reset: true, lap: true },
            RunState::Paused => Self { start: true, pause: false, reset: true, lap: false },
        }
    }

    pub fn start_label(state: RunState) -> &'static str {
        match state {
            RunState::Idle => "Start",
            RunState::Running => "Running...",
            RunState::Paused => "Resume",
        }
    }
}
