/// Play-speed and content setting chosen at game start.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GameMode {
    /// Standard pacing; AI decisions wait for a human acknowledgement.
    #[default]
    Normal,
    /// Short AI think time; AI players resolve modals and pauses on their own.
    Quick,
    /// Normal pacing, but State tiles ask the content generator for a trial.
    Advanced,
}

impl GameMode {
    pub fn is_quick(self) -> bool {
        matches!(self, GameMode::Quick)
    }

    pub fn generates_trials(self) -> bool {
        matches!(self, GameMode::Advanced)
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Resource count a player must reach to win.
    pub win_condition: u32,
    pub mode: GameMode,
    /// Number of narrative messages kept in the session log.
    pub log_capacity: usize,
    /// Resources credited each time a player passes the start cell.
    pub pass_bonus_per_lap: u32,
}

impl GameConfig {
    // ===== roster bounds =====
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WIN_CONDITION: u32 = 10;
    pub const DEFAULT_LOG_CAPACITY: usize = 15;
    pub const DEFAULT_PASS_BONUS: u32 = 1;

    pub fn new() -> Self {
        Self {
            win_condition: Self::DEFAULT_WIN_CONDITION,
            mode: GameMode::Normal,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            pass_bonus_per_lap: Self::DEFAULT_PASS_BONUS,
        }
    }

    pub fn with_win_condition(mut self, win_condition: u32) -> Self {
        self.win_condition = win_condition;
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Quick".parse::<GameMode>(), Ok(GameMode::Quick));
        assert_eq!("advanced".parse::<GameMode>(), Ok(GameMode::Advanced));
        assert!("turbo".parse::<GameMode>().is_err());
        assert_eq!(GameMode::Normal.to_string(), "normal");
    }
}
