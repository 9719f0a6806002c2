//! Historical vignettes keyed by Event tile name.

use game_core::{EventCard, EventEffect};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vignette {
    /// Name of the Event tile that shows this card.
    pub tile: String,
    pub card: EventCard,
}

/// Lookup table from Event tile names to their cards.
///
/// A tile with no entry is an unknown event: nothing is shown and the turn
/// simply moves on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventBook {
    pub vignettes: Vec<Vignette>,
}

impl EventBook {
    pub fn lookup(&self, tile_name: &str) -> Option<&EventCard> {
        self.vignettes
            .iter()
            .find(|v| v.tile == tile_name)
            .map(|v| &v.card)
    }

    pub fn standard() -> Self {
        let entry = |tile: &str, title: &str, content: &str, label: &str, effect| Vignette {
            tile: tile.into(),
            card: EventCard {
                title: title.into(),
                content: content.into(),
                effect_label: label.into(),
                effect,
            },
        };

        Self {
            vignettes: vec![
                entry(
                    "Besieged at Kuang",
                    "Besieged at Kuang",
                    "In 495 BCE the people of Kuang mistook the Master for Yang Hu, who had once \
                     mistreated them, and surrounded his party. He said: \"While Heaven has not \
                     destroyed this culture, what can the people of Kuang do to me?\"",
                    "Held under siege: miss one turn",
                    EventEffect::Pause,
                ),
                entry(
                    "Zheng City Gate",
                    "Like a Stray Dog",
                    "Separated from his disciples in Zheng, the Master waited alone by the east \
                     gate. A local described him as forlorn as a stray dog. Told of this, he \
                     laughed and agreed.",
                    "Lost and forlorn: lose one meat",
                    EventEffect::LoseMeat,
                ),
                entry(
                    "Between Chen and Cai",
                    "Provisions Exhausted",
                    "Between Chen and Cai the party ran out of food and the followers fell ill, \
                     yet the Master kept teaching and playing the zither. \"The gentleman holds \
                     firm in adversity.\"",
                    "Stranded without food: miss one turn",
                    EventEffect::Pause,
                ),
                entry(
                    "The Duke of She Asks About Governance",
                    "The Duke of She Asks About Governance",
                    "The Duke of She asked how to govern. The Master replied: \"Make those who \
                     are near happy, and those who are far away will come.\"",
                    "Benevolent rule attracts support: gain one meat",
                    EventEffect::GainMeat,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::standard_tiles;
    use game_core::TileKind;

    #[test]
    fn lookup_by_tile_name() {
        let book = EventBook::standard();
        assert_eq!(
            book.lookup("Zheng City Gate").map(|c| c.effect),
            Some(EventEffect::LoseMeat)
        );
        assert_eq!(book.lookup("Nowhere"), None);
    }

    #[test]
    fn standard_board_has_one_unknown_event() {
        let book = EventBook::standard();
        let unknown: Vec<_> = standard_tiles()
            .into_iter()
            .filter(|t| t.kind == TileKind::Event && book.lookup(&t.name).is_none())
            .map(|t| t.name)
            .collect();
        assert_eq!(unknown, vec!["The Road Home".to_string()]);
    }
}
