//! Encounter cards and their effects.
//!
//! Fate and Chance cards share [`CardEffect`]; the closed set of special
//! cases is spread over typed fields so every resolver handles it
//! exhaustively: protection is a flag, relocation is a [`Placement`], and the
//! dice branch exists only on [`ChanceEffect`].

/// Number of answer options on every trial card.
pub const TRIAL_OPTIONS: usize = 4;

/// Multiple-choice trial tied to a State tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialCard {
    pub id: u64,
    pub quote: String,
    pub question: String,
    pub options: [String; TRIAL_OPTIONS],
    pub answer_index: usize,
    pub explanation: String,
    /// True when the card came from the content generator instead of the static deck.
    #[cfg_attr(feature = "serde", serde(default))]
    pub generated: bool,
}

impl TrialCard {
    pub const OPTION_COUNT: usize = TRIAL_OPTIONS;

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index
    }

    /// Display letter for an option index (`0 -> 'A'`).
    pub fn option_letter(choice: usize) -> char {
        match choice {
            0 => 'A',
            1 => 'B',
            2 => 'C',
            3 => 'D',
            _ => '?',
        }
    }
}

/// Where a card sends the acting player after its resource and pause effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    #[default]
    Stay,
    /// Absolute position override; the tile action re-triggers at the new cell.
    Teleport(usize),
    /// Swap positions with the named player, or return to the start cell
    /// (re-triggering its tile action) when nobody by that name is playing.
    SwapOrReset { target: String },
}

/// Composable effect carried by Fate and Chance cards.
///
/// Applied in a fixed order: resource delta, pause, protection, placement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardEffect {
    pub meat: i32,
    pub pause: bool,
    pub protection: bool,
    pub placement: Placement,
}

impl CardEffect {
    pub fn meat(delta: i32) -> Self {
        Self {
            meat: delta,
            ..Self::default()
        }
    }

    pub fn with_pause(mut self) -> Self {
        self.pause = true;
        self
    }

    pub fn with_protection(mut self) -> Self {
        self.protection = true;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FateCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: CardEffect,
}

/// Chance cards either carry a fixed effect or branch on a single die.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChanceEffect {
    Fixed(CardEffect),
    /// Odd roll: pause and lose one. Even roll: gain one, then move three cells.
    DiceBranch,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChanceCard {
    pub id: u32,
    pub title: String,
    pub challenge: String,
    pub effect: ChanceEffect,
}

/// Consequence of an Informational Event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventEffect {
    Pause,
    GainMeat,
    LoseMeat,
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventCard {
    pub title: String,
    pub content: String,
    pub effect_label: String,
    pub effect: EventEffect,
}

/// Decision an AI player made inside an open modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiDecision {
    Trial { choice: usize },
    Accept,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trial_correctness_uses_answer_index() {
        let card = TrialCard {
            id: 1,
            quote: "q".into(),
            question: "?".into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            answer_index: 2,
            explanation: "e".into(),
            generated: false,
        };
        assert!(card.is_correct(2));
        assert!(!card.is_correct(0));
        assert!(!card.is_correct(7));
        assert_eq!(TrialCard::option_letter(2), 'C');
    }

    #[test]
    fn effect_builders_compose() {
        let effect = CardEffect::meat(-2)
            .with_pause()
            .with_placement(Placement::Teleport(4));
        assert_eq!(effect.meat, -2);
        assert!(effect.pause);
        assert!(!effect.protection);
        assert_eq!(effect.placement, Placement::Teleport(4));
    }
}
