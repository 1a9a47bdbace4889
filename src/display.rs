//! Rendering contract between the battle core and whatever draws it.
//!
//! The resolver hands a [`BattleSnapshot`] and a status line to a
//! [`DisplaySink`] once per resolved attack. Sinks only ever see
//! post-transaction state; there is no way to observe a half-applied tick.

use crate::combatant::{Combatant, Hunter, Monster};
use serde::{Deserialize, Serialize};

/// Full post-transaction state of both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub hunter: Hunter,
    pub monster: Monster,
}

impl BattleSnapshot {
    /// Fresh level-1 pair (new game, or fallback when no save exists).
    pub fn fresh(rng: &mut impl rand::Rng) -> Self {
        Self {
            hunter: Hunter::new(rng),
            monster: Monster::new(rng),
        }
    }

    /// Loop guard used by the attack producers.
    pub fn both_alive(&self) -> bool {
        self.hunter.is_alive() && self.monster.is_alive()
    }
}

/// Callback invoked once per resolved tick with the new snapshot and a
/// human-readable status line. In-process only; no wire format.
pub trait DisplaySink: Send {
    fn on_tick(&mut self, snapshot: &BattleSnapshot, status: &str);
}

/// Sink that discards everything (simulations and tests).
pub struct NullSink;

impl DisplaySink for NullSink {
    fn on_tick(&mut self, _snapshot: &BattleSnapshot, _status: &str) {}
}

/// Console sink: one line of stats plus the status text per tick.
pub struct ConsoleSink;

impl DisplaySink for ConsoleSink {
    fn on_tick(&mut self, snapshot: &BattleSnapshot, status: &str) {
        let h = &snapshot.hunter;
        let m = &snapshot.monster;
        println!(
            "[Player Lv{} HP {}/{} Exp {}/{}] [Monster Lv{} HP {}/{}] {}",
            h.level, h.health, h.max_health, h.exp, h.max_exp, m.level, m.health, m.max_health,
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_both_alive_guard() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut snapshot = BattleSnapshot::fresh(&mut rng);
        assert!(snapshot.both_alive());

        snapshot.monster.health = 0;
        assert!(!snapshot.both_alive());

        snapshot.monster.health = 10;
        snapshot.hunter.health = -4;
        assert!(!snapshot.both_alive());
    }
}
