//! Resource, pause and card-effect transforms.

use super::GameEngine;
use crate::board::Board;
use crate::cards::{CardEffect, Placement};
use crate::error::EngineError;
use crate::state::PlayerId;

/// Result of a resource mutation, after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeatChange {
    pub player: PlayerId,
    pub before: u32,
    pub after: u32,
}

impl MeatChange {
    /// Applied delta (may differ from the requested one because of clamping).
    pub fn applied(&self) -> i64 {
        i64::from(self.after) - i64::from(self.before)
    }
}

/// What the turn controller must do once a card effect has been applied.
///
/// Exactly one of the two ever happens per resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    Advance,
    /// The acting player was relocated; run the tile action at `cell`.
    Retrigger { cell: usize },
}

impl<'a> GameEngine<'a> {
    /// Adds `delta` to a player's resources, clamping at zero.
    pub fn apply_meat(&mut self, id: PlayerId, delta: i32) -> Result<MeatChange, EngineError> {
        self.ensure_in_play()?;
        let player = self.player_mut(id)?;
        let before = player.meat;
        player.meat = if delta >= 0 {
            before.saturating_add(delta.unsigned_abs())
        } else {
            before.saturating_sub(delta.unsigned_abs())
        };
        Ok(MeatChange {
            player: id,
            before,
            after: player.meat,
        })
    }

    /// Pauses a player for one more turn. Returns the turns now left to skip.
    pub fn impose_pause(&mut self, id: PlayerId) -> Result<u32, EngineError> {
        self.ensure_in_play()?;
        let player = self.player_mut(id)?;
        player.is_paused = true;
        player.turns_to_skip += 1;
        Ok(player.turns_to_skip)
    }

    pub fn grant_protection(&mut self, id: PlayerId) -> Result<(), EngineError> {
        self.ensure_in_play()?;
        self.player_mut(id)?.has_protection = true;
        Ok(())
    }

    /// Applies a Fate/Chance effect to the acting player.
    ///
    /// Order: resource delta (clamped), pause, protection, placement. A
    /// teleport outside the track is rejected before anything changes.
    pub fn apply_card_effect(
        &mut self,
        id: PlayerId,
        effect: &CardEffect,
        track_len: usize,
    ) -> Result<(MeatChange, EffectOutcome), EngineError> {
        self.ensure_in_play()?;
        self.player(id)?;
        if let Placement::Teleport(cell) = effect.placement
            && cell >= track_len
        {
            return Err(EngineError::CellOutOfRange {
                cell,
                len: track_len,
            });
        }

        let change = self.apply_meat(id, effect.meat)?;
        if effect.pause {
            self.impose_pause(id)?;
        }
        if effect.protection {
            self.grant_protection(id)?;
        }

        let outcome = match &effect.placement {
            Placement::Stay => EffectOutcome::Advance,
            Placement::Teleport(cell) => {
                self.player_mut(id)?.position = *cell;
                EffectOutcome::Retrigger { cell: *cell }
            }
            Placement::SwapOrReset { target } => self.swap_or_reset(id, target)?,
        };

        Ok((change, outcome))
    }

    fn swap_or_reset(&mut self, id: PlayerId, target: &str) -> Result<EffectOutcome, EngineError> {
        let target_id = self
            .state
            .players
            .iter()
            .find(|p| p.character == target)
            .map(|p| p.id);

        match target_id {
            Some(other) => {
                let mine = self.player(id)?.position;
                let theirs = self.player(other)?.position;
                self.player_mut(id)?.position = theirs;
                self.player_mut(other)?.position = mine;
                Ok(EffectOutcome::Advance)
            }
            None => {
                self.player_mut(id)?.position = Board::START;
                Ok(EffectOutcome::Retrigger { cell: Board::START })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{GameState, PlayerSetup};

    fn state(names: &[&str]) -> GameState {
        let roster: Vec<_> = names.iter().map(|n| PlayerSetup::human(*n)).collect();
        GameState::from_setup(&GameConfig::default(), &roster, 1).unwrap()
    }

    #[test]
    fn meat_never_goes_negative() {
        let mut state = state(&["a", "b"]);
        let mut engine = GameEngine::new(&mut state);
        engine.apply_meat(PlayerId(0), 2).unwrap();
        for _ in 0..5 {
            engine.apply_meat(PlayerId(0), -3).unwrap();
        }
        let change = engine.apply_meat(PlayerId(0), -1).unwrap();
        assert_eq!(change.after, 0);
        assert_eq!(change.applied(), 0);
        assert_eq!(state.players[0].meat, 0);
    }

    #[test]
    fn pause_accumulates() {
        let mut state = state(&["a", "b"]);
        let mut engine = GameEngine::new(&mut state);
        assert_eq!(engine.impose_pause(PlayerId(1)).unwrap(), 1);
        assert_eq!(engine.impose_pause(PlayerId(1)).unwrap(), 2);
        assert!(state.players[1].is_skipping());
    }

    #[test]
    fn swap_with_named_player() {
        let mut state = state(&["Yan Hui", "Zilu"]);
        state.players[0].position = 4;
        state.players[1].position = 9;
        let effect = CardEffect::default().with_placement(Placement::SwapOrReset {
            target: "Zilu".into(),
        });

        let (_, outcome) = GameEngine::new(&mut state)
            .apply_card_effect(PlayerId(0), &effect, 24)
            .unwrap();

        assert_eq!(outcome, EffectOutcome::Advance);
        assert_eq!(state.players[0].position, 9);
        assert_eq!(state.players[1].position, 4);
    }

    #[test]
    fn reset_to_start_when_target_absent() {
        let mut state = state(&["Yan Hui", "Zigong"]);
        state.players[0].position = 7;
        let effect = CardEffect::meat(1).with_placement(Placement::SwapOrReset {
            target: "Zilu".into(),
        });

        let (change, outcome) = GameEngine::new(&mut state)
            .apply_card_effect(PlayerId(0), &effect, 24)
            .unwrap();

        assert_eq!(outcome, EffectOutcome::Retrigger { cell: 0 });
        assert_eq!(change.after, 1);
        assert_eq!(state.players[0].position, 0);
    }

    #[test]
    fn teleport_out_of_range_changes_nothing() {
        let mut state = state(&["a", "b"]);
        let effect = CardEffect::meat(3)
            .with_pause()
            .with_placement(Placement::Teleport(30));

        let result = GameEngine::new(&mut state).apply_card_effect(PlayerId(0), &effect, 24);

        assert_eq!(result, Err(EngineError::CellOutOfRange { cell: 30, len: 24 }));
        assert_eq!(state.players[0].meat, 0);
        assert!(!state.players[0].is_paused);
    }

    #[test]
    fn applies_in_fixed_order() {
        let mut state = state(&["a", "b"]);
        let effect = CardEffect::meat(-1)
            .with_pause()
            .with_protection()
            .with_placement(Placement::Teleport(5));

        let (change, outcome) = GameEngine::new(&mut state)
            .apply_card_effect(PlayerId(1), &effect, 24)
            .unwrap();

        let player = &state.players[1];
        assert_eq!(change.after, 0);
        assert!(player.is_paused);
        assert_eq!(player.turns_to_skip, 1);
        assert!(player.has_protection);
        assert_eq!(player.position, 5);
        assert_eq!(outcome, EffectOutcome::Retrigger { cell: 5 });
    }

    #[test]
    fn unknown_player_is_rejected() {
        let mut state = state(&["a", "b"]);
        assert_eq!(
            GameEngine::new(&mut state).apply_meat(PlayerId(7), 1),
            Err(EngineError::UnknownPlayer(PlayerId(7)))
        );
    }
}
