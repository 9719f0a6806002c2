use std::fmt;

/// Stable identity of a player for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Roster entry supplied when a game starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSetup {
    pub character: String,
    pub is_ai: bool,
}

impl PlayerSetup {
    pub fn human(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            is_ai: false,
        }
    }

    pub fn ai(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            is_ai: true,
        }
    }
}

/// A traveller on the track.
///
/// # Invariants
///
/// - `meat` never underflows; decrements clamp at zero
/// - `is_paused` implies `turns_to_skip > 0`
/// - `was_paused` is set only when the last skipped turn is acknowledged and
///   cleared on the following turn start
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    /// Display name of the character.
    pub character: String,
    pub position: usize,
    pub meat: u32,
    pub is_ai: bool,
    pub is_paused: bool,
    pub turns_to_skip: u32,
    pub was_paused: bool,
    /// Granted by some Fate cards. Nothing consumes it.
    pub has_protection: bool,
}

impl Player {
    pub fn new(id: PlayerId, character: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id,
            character: character.into(),
            position: 0,
            meat: 0,
            is_ai,
            is_paused: false,
            turns_to_skip: 0,
            was_paused: false,
            has_protection: false,
        }
    }

    /// True when this player's next turn must be skipped.
    pub fn is_skipping(&self) -> bool {
        self.is_paused && self.turns_to_skip > 0
    }

    /// Name as it appears in narrative messages (`[AI] ` prefix for computer players).
    pub fn label(&self) -> String {
        if self.is_ai {
            format!("[AI] {}", self.character)
        } else {
            self.character.clone()
        }
    }
}
