//! Trial, Fate and Chance decks.
//!
//! Draws are uniform and with replacement; the runtime picks an index through
//! its RNG oracle and clones the card into the session state.

use game_core::{CardEffect, ChanceCard, ChanceEffect, FateCard, Placement, TrialCard};

/// Problems found when validating loaded content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("the {0} deck is empty")]
    EmptyDeck(&'static str),

    #[error("trial {id} has answer index {index}, expected 0..4")]
    AnswerOutOfRange { id: u64, index: usize },

    #[error("fate card {id} teleports to cell {cell} on a board of {len} cells")]
    TeleportOffBoard { id: u32, cell: usize, len: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decks {
    pub trials: Vec<TrialCard>,
    pub fates: Vec<FateCard>,
    pub chances: Vec<ChanceCard>,
}

impl Decks {
    /// Checks that every deck can be drawn from and that card data fits a
    /// board of `board_len` cells.
    pub fn validate(&self, board_len: usize) -> Result<(), ContentError> {
        if self.trials.is_empty() {
            return Err(ContentError::EmptyDeck("trial"));
        }
        if self.fates.is_empty() {
            return Err(ContentError::EmptyDeck("fate"));
        }
        if self.chances.is_empty() {
            return Err(ContentError::EmptyDeck("chance"));
        }
        if let Some(card) = self
            .trials
            .iter()
            .find(|c| c.answer_index >= TrialCard::OPTION_COUNT)
        {
            return Err(ContentError::AnswerOutOfRange {
                id: card.id,
                index: card.answer_index,
            });
        }
        for card in &self.fates {
            if let Placement::Teleport(cell) = card.effect.placement
                && cell >= board_len
            {
                return Err(ContentError::TeleportOffBoard {
                    id: card.id,
                    cell,
                    len: board_len,
                });
            }
        }
        for card in &self.chances {
            if let ChanceEffect::Fixed(effect) = &card.effect
                && let Placement::Teleport(cell) = effect.placement
                && cell >= board_len
            {
                return Err(ContentError::TeleportOffBoard {
                    id: card.id,
                    cell,
                    len: board_len,
                });
            }
        }
        Ok(())
    }

    /// The built-in decks.
    pub fn standard() -> Self {
        Self {
            trials: standard_trials(),
            fates: standard_fates(),
            chances: standard_chances(),
        }
    }
}

impl Default for Decks {
    fn default() -> Self {
        Self::standard()
    }
}

fn trial(
    id: u64,
    quote: &str,
    question: &str,
    options: [&str; 4],
    answer_index: usize,
    explanation: &str,
) -> TrialCard {
    TrialCard {
        id,
        quote: quote.into(),
        question: question.into(),
        options: options.map(String::from),
        answer_index,
        explanation: explanation.into(),
        generated: false,
    }
}

fn standard_trials() -> Vec<TrialCard> {
    vec![
        trial(
            1,
            "Is it not a pleasure to learn and to practise what you have learned?",
            "What does the Master say brings pleasure?",
            [
                "Wealth gained honestly",
                "Learning and practising what is learned",
                "Praise from rulers",
                "A quiet life in the hills",
            ],
            1,
            "The opening line of the Analects places study and its practice at the root of a good life.",
        ),
        trial(
            2,
            "Do not impose on others what you do not desire yourself.",
            "Which principle does this saying express?",
            ["Reciprocity (shu)", "Filial piety", "Ritual propriety", "Loyalty to the ruler"],
            0,
            "Asked for one word to guide a whole life, the Master answered: reciprocity.",
        ),
        trial(
            3,
            "When three walk together, one of them can surely be my teacher.",
            "What attitude does the Master recommend?",
            [
                "Walk only with the wise",
                "Avoid travelling in groups",
                "Learn from the good and correct yourself by the bad",
                "Choose the eldest as leader",
            ],
            2,
            "Every companion offers a lesson: follow what is good and mend in yourself what is not.",
        ),
        trial(
            4,
            "At fifteen I set my heart on learning; at thirty I stood firm.",
            "At what age did the Master say he no longer had doubts?",
            ["Thirty", "Forty", "Fifty", "Sixty"],
            1,
            "At forty he was free of doubts; at fifty he knew the mandate of Heaven.",
        ),
        trial(
            5,
            "The gentleman is easy of mind; the small man is always anxious.",
            "How does the gentleman (junzi) differ from the small man?",
            [
                "He owns more land",
                "He speaks more often",
                "He is composed and at ease",
                "He avoids all hardship",
            ],
            2,
            "Inner rectitude leaves the gentleman calm whatever his circumstances.",
        ),
        trial(
            6,
            "Review the old and you will know the new; then you may be a teacher.",
            "What qualifies a person to teach, according to the Master?",
            [
                "Noble birth",
                "Gaining new insight from what one already knows",
                "Memorising the classics",
                "Serving at court",
            ],
            1,
            "Reflecting on past learning until it yields fresh understanding is the mark of a teacher.",
        ),
        trial(
            7,
            "To know what you know and to know what you do not know, that is knowledge.",
            "To which disciple was this teaching addressed?",
            ["Yan Hui", "Zigong", "Zilu", "Zengzi"],
            2,
            "The bold Zilu was reminded that honesty about one's ignorance is itself wisdom.",
        ),
        trial(
            8,
            "Those near are pleased, and those far away come.",
            "Who asked the Master about governance and received this reply?",
            ["The Duke of She", "Duke Ai of Lu", "Ji Kangzi", "Duke Ling of Wei"],
            0,
            "Good government delights its own people and draws others from afar.",
        ),
    ]
}

fn fate(id: u32, title: &str, description: &str, effect: CardEffect) -> FateCard {
    FateCard {
        id,
        title: title.into(),
        description: description.into(),
        effect,
    }
}

fn standard_fates() -> Vec<FateCard> {
    vec![
        fate(
            1,
            "A Patron's Gift",
            "A local lord honours the Master with sacrificial meat.",
            CardEffect::meat(2),
        ),
        fate(
            2,
            "Fever on the Road",
            "Illness keeps the traveller in bed for a turn.",
            CardEffect::default().with_pause(),
        ),
        fate(
            3,
            "Heaven's Mandate",
            "Heaven has not yet abandoned this culture. Gain one meat and protection.",
            CardEffect::meat(1).with_protection(),
        ),
        fate(
            4,
            "Lost Provisions",
            "A cart overturns in the ford.",
            CardEffect::meat(-1),
        ),
        fate(
            5,
            "A Shortcut Through the Hills",
            "A woodcutter shows a hidden path to Chen.",
            CardEffect::default().with_placement(Placement::Teleport(9)),
        ),
        fate(
            6,
            "Zilu Stands Guard",
            "Trade places with Zilu. If Zilu is not travelling with you, return home.",
            CardEffect::default().with_placement(Placement::SwapOrReset {
                target: "Zilu".into(),
            }),
        ),
        fate(
            7,
            "Recalled to Lu",
            "Duke Ai summons you home.",
            CardEffect::default().with_placement(Placement::Teleport(0)),
        ),
        fate(
            8,
            "The Offering Is Accepted",
            "The ancestral rites are performed correctly.",
            CardEffect::meat(1),
        ),
    ]
}

fn chance(id: u32, title: &str, challenge: &str, effect: ChanceEffect) -> ChanceCard {
    ChanceCard {
        id,
        title: title.into(),
        challenge: challenge.into(),
        effect,
    }
}

fn standard_chances() -> Vec<ChanceCard> {
    vec![
        chance(
            1,
            "Archery Contest",
            "Roll a die. Even: gain one meat and ride three cells ahead. Odd: lose one meat and rest a turn.",
            ChanceEffect::DiceBranch,
        ),
        chance(
            2,
            "Feast at Court",
            "The ruler hosts a banquet in your honour.",
            ChanceEffect::Fixed(CardEffect::meat(3)),
        ),
        chance(
            3,
            "Bandits",
            "Robbers ambush the caravan at dusk.",
            ChanceEffect::Fixed(CardEffect::meat(-2)),
        ),
        chance(
            4,
            "Swift Carriage",
            "A borrowed carriage carries you to She.",
            ChanceEffect::Fixed(CardEffect::default().with_placement(Placement::Teleport(15))),
        ),
        chance(
            5,
            "Detained at the Border",
            "Guards hold the party for questioning.",
            ChanceEffect::Fixed(CardEffect::default().with_pause()),
        ),
        chance(
            6,
            "Debate with the Hermits",
            "Roll a die. Even: gain one meat and walk three cells ahead. Odd: lose one meat and rest a turn.",
            ChanceEffect::DiceBranch,
        ),
        chance(
            7,
            "A Generous Host",
            "A village elder shares his stores.",
            ChanceEffect::Fixed(CardEffect::meat(1)),
        ),
        chance(
            8,
            "Caught in a Storm",
            "Rain washes out the road and spoils the food.",
            ChanceEffect::Fixed(CardEffect::meat(-1).with_pause()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_decks_are_valid() {
        let decks = Decks::standard();
        assert_eq!(decks.validate(24), Ok(()));
        assert_eq!(decks.trials.len(), 8);
        assert!(decks.chances.iter().any(|c| c.effect == ChanceEffect::DiceBranch));
    }

    #[test]
    fn validate_rejects_empty_and_off_board_content() {
        let mut decks = Decks::standard();
        decks.fates.clear();
        assert_eq!(decks.validate(24), Err(ContentError::EmptyDeck("fate")));

        let decks = Decks::standard();
        assert_eq!(
            decks.validate(10),
            Err(ContentError::TeleportOffBoard {
                id: 4,
                cell: 15,
                len: 10,
            })
        );
        assert_eq!(
            decks.validate(9),
            Err(ContentError::TeleportOffBoard {
                id: 5,
                cell: 9,
                len: 9,
            })
        );
    }

    #[test]
    fn validate_rejects_bad_answer_index() {
        let mut decks = Decks::standard();
        decks.trials[3].answer_index = 4;
        assert_eq!(
            decks.validate(24),
            Err(ContentError::AnswerOutOfRange { id: 4, index: 4 })
        );
    }
}
