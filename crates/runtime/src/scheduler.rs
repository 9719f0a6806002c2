//! Cancelable, named delayed actions on a virtual millisecond clock.
//!
//! Every entry is stamped with the epoch current at scheduling time. Turn
//! advance, restart and victory call [`Scheduler::reset`], which drops every
//! pending entry and bumps the epoch; anything still carrying an older epoch
//! (an in-flight generation request, for instance) is stale and must be
//! ignored by whoever receives it.

use std::collections::BTreeMap;
use std::time::Duration;

use game_core::PlayerId;
use tracing::trace;

/// Milliseconds since the session clock started.
pub type Millis = u64;

/// Which card a reveal is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[derive(serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum RevealKind {
    Fate,
    Chance,
}

/// A named scheduled action. Player-bound tasks carry the player they were
/// scheduled for so the handler can re-validate before acting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Task {
    SettleRoll { player: PlayerId },
    MoveStep { player: PlayerId },
    FinishMove { player: PlayerId },
    TileAction { player: PlayerId },
    Reveal { player: PlayerId, kind: RevealKind },
    AnimationSettled { player: PlayerId },
    TrialReward { player: PlayerId },
    SecondaryMove { player: PlayerId },
    AdvanceTurn,
    AiRoll { player: PlayerId },
    AiDecide { player: PlayerId },
    AiApply { player: PlayerId },
    PauseConfirm { player: PlayerId },
    RecoveryDone { player: PlayerId },
}

/// A task popped from the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Due {
    pub at: Millis,
    pub task: Task,
    pub epoch: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BTreeMap<(Millis, u64), (Task, u64)>,
    seq: u64,
    epoch: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Queues `task` to fire `delay` after `now`. Ties fire in scheduling order.
    pub fn schedule(&mut self, now: Millis, delay: Duration, task: Task) -> Millis {
        let due = now.saturating_add(u64::try_from(delay.as_millis()).unwrap_or(u64::MAX));
        self.seq += 1;
        self.queue.insert((due, self.seq), (task, self.epoch));
        trace!(target: "runtime::scheduler", %task, due, epoch = self.epoch, "scheduled");
        due
    }

    /// Drops every pending task and starts a new epoch.
    pub fn reset(&mut self) -> u64 {
        let dropped = self.queue.len();
        self.queue.clear();
        self.epoch += 1;
        if dropped > 0 {
            trace!(target: "runtime::scheduler", dropped, epoch = self.epoch, "cancelled pending tasks");
        }
        self.epoch
    }

    pub fn contains(&self, task: Task) -> bool {
        self.queue.values().any(|(queued, _)| *queued == task)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest task if it is due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<Due> {
        let (&(at, seq), _) = self.queue.iter().next()?;
        if at > now {
            return None;
        }
        let (task, epoch) = self.queue.remove(&(at, seq))?;
        Some(Due { at, task, epoch })
    }

    /// Pops the earliest task regardless of its deadline.
    pub fn pop_next(&mut self) -> Option<Due> {
        let ((at, _), (task, epoch)) = self.queue.pop_first()?;
        Some(Due { at, task, epoch })
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: PlayerId = PlayerId(0);

    #[test]
    fn fires_in_deadline_then_insertion_order() {
        let mut s = Scheduler::new();
        s.schedule(0, Duration::from_millis(500), Task::MoveStep { player: P });
        s.schedule(0, Duration::from_millis(100), Task::AdvanceTurn);
        s.schedule(0, Duration::from_millis(500), Task::FinishMove { player: P });

        let order: Vec<_> = std::iter::from_fn(|| s.pop_next()).map(|d| d.task).collect();
        assert_eq!(
            order,
            vec![
                Task::AdvanceTurn,
                Task::MoveStep { player: P },
                Task::FinishMove { player: P },
            ]
        );
    }

    #[test]
    fn pop_due_respects_the_clock() {
        let mut s = Scheduler::new();
        s.schedule(1000, Duration::from_millis(600), Task::SettleRoll { player: P });
        assert_eq!(s.next_due(), Some(1600));
        assert_eq!(s.pop_due(1599), None);
        let due = s.pop_due(1600).unwrap();
        assert_eq!(due.at, 1600);
        assert!(s.is_empty());
    }

    #[test]
    fn reset_cancels_and_bumps_epoch() {
        let mut s = Scheduler::new();
        s.schedule(0, Duration::from_millis(10), Task::AiRoll { player: P });
        let old = s.epoch();
        assert_eq!(s.reset(), old + 1);
        assert!(s.is_empty());

        s.schedule(0, Duration::from_millis(10), Task::AdvanceTurn);
        assert_eq!(s.pop_next().unwrap().epoch, old + 1);
    }

    #[test]
    fn contains_looks_up_by_name() {
        let mut s = Scheduler::new();
        s.schedule(0, Duration::from_millis(10), Task::AdvanceTurn);
        s.schedule(0, Duration::from_millis(20), Task::AiRoll { player: P });
        assert!(s.contains(Task::AdvanceTurn));
        assert!(!s.contains(Task::AiRoll {
            player: PlayerId(1),
        }));

        s.pop_next();
        assert!(!s.contains(Task::AdvanceTurn));
        assert!(s.contains(Task::AiRoll { player: P }));
    }
}
