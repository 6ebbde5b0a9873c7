//! Interactive commands delivered as single-character tokens.

/// A recognised interactive command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Save the current generation (`s`).
    Snapshot,
    /// Save the current generation and stop (`q`).
    Quit,
    /// Pause, or resume when already paused (`p`).
    TogglePause,
}

impl Command {
    /// Parse a token. Unrecognised tokens yield `None` and are ignored by
    /// the scheduler.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            's' => Some(Self::Snapshot),
            'q' => Some(Self::Quit),
            'p' => Some(Self::TogglePause),
            _ => None,
        }
    }

    /// The token for this command.
    pub fn key(self) -> char {
        match self {
            Self::Snapshot => 's',
            Self::Quit => 'q',
            Self::TogglePause => 'p',
        }
    }
}
