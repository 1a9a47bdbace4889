//! The single-writer critical section of the battle.
//!
//! One [`AttackResolver::resolve`] call applies exactly one attack intent:
//! damage, defeat detection, experience award, level-ups, and revival all
//! happen inside the same transaction, and the display sink is notified once
//! at the end. The resolver owns the combatant pair outright; serialization
//! comes from feeding it through a single-consumer channel (see
//! [`crate::scheduler`]), so no two intents can interleave their reads and
//! writes.
//!
//! The original game ran this logic on two unsynchronized threads over
//! shared fields. The formulas and status text are preserved; the data race
//! is not.

use crate::combatant::{Combatant, Hunter, Monster};
use crate::display::{BattleSnapshot, DisplaySink};
use crate::errors::{BattleError, Result};
use crate::progression;
use rand::Rng;

/// One scheduled attack request from either periodic loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackIntent {
    /// Hunter strikes the monster.
    HunterStrikes,
    /// Monster strikes the hunter.
    MonsterStrikes,
}

/// Everything a resolved intent did, for logging and tests.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub intent: AttackIntent,
    /// Raw damage applied to the defender (`atk - def`, unclamped).
    pub damage: i64,
    /// Experience granted to the hunter this tick (0 when nobody fell).
    pub exp_gained: i64,
    pub hunter_leveled: bool,
    pub monster_leveled: bool,
    /// Both sides were restored to full health at the end of the tick.
    pub revived: bool,
    pub status: String,
    pub snapshot: BattleSnapshot,
}

/// Owns the combatant pair and applies intents one at a time.
pub struct AttackResolver<R: Rng, D: DisplaySink> {
    hunter: Hunter,
    monster: Monster,
    rng: R,
    sink: D,
}

impl<R: Rng, D: DisplaySink> AttackResolver<R, D> {
    pub fn new(snapshot: BattleSnapshot, rng: R, sink: D) -> Self {
        Self {
            hunter: snapshot.hunter,
            monster: snapshot.monster,
            rng,
            sink,
        }
    }

    /// Current post-transaction state.
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            hunter: self.hunter.clone(),
            monster: self.monster.clone(),
        }
    }

    /// Consume the resolver, yielding the final state.
    pub fn into_snapshot(self) -> BattleSnapshot {
        BattleSnapshot {
            hunter: self.hunter,
            monster: self.monster,
        }
    }

    /// Apply one attack intent as an atomic transaction.
    ///
    /// Damage is never floored: the defender's health may go negative or to
    /// zero before the outcome check handles it. Outcome priority, the exp
    /// wrap formula, and the "both fell, no reward" case follow the original
    /// game exactly; see the module docs.
    pub fn resolve(&mut self, intent: AttackIntent) -> Result<TickOutcome> {
        let damage;
        let mut exp_gained = 0;
        let mut hunter_leveled = false;
        let mut monster_leveled = false;
        let mut status;

        match intent {
            AttackIntent::HunterStrikes => {
                damage = self.hunter.atk - self.monster.def;
                self.monster.health -= damage;
                status = String::from("Player attacked the monster!");

                if !self.monster.is_alive() && self.hunter.is_alive() {
                    let reward = progression::exp_reward(self.monster.level, &mut self.rng);
                    hunter_leveled = self.award_exp(reward);
                    status = if hunter_leveled {
                        format!("Player defeated the monster. You got {reward} Exp & leveled up!")
                    } else {
                        format!("Player defeated the monster. You got {reward} Exp!")
                    };
                    exp_gained = reward;

                    // The monster comes back one level stronger either way.
                    let next = self.monster.level + 1;
                    self.monster.apply_stats_for_level(next, &mut self.rng);
                    monster_leveled = true;
                }
            }
            AttackIntent::MonsterStrikes => {
                damage = self.monster.atk - self.hunter.def;
                self.hunter.health -= damage;
                status = String::from("Monster attacked the player!");

                if !self.hunter.is_alive() && self.monster.is_alive() {
                    // Dying still pays half the reward. The monster does not
                    // level up on this branch.
                    let reward = progression::exp_reward(self.monster.level, &mut self.rng) / 2;
                    hunter_leveled = self.award_exp(reward);
                    status = if hunter_leveled {
                        format!("You die. You got {reward} Exp & leveled up!")
                    } else {
                        format!("You die. You got {reward} Exp!")
                    };
                    exp_gained = reward;
                }
                // Both at zero or below: no reward for either side, fall
                // through to revival.
            }
        }

        let revived = if !self.hunter.is_alive() || !self.monster.is_alive() {
            self.hunter.revive();
            self.monster.revive();
            true
        } else {
            false
        };

        self.check_invariants()?;

        let snapshot = self.snapshot();
        self.sink.on_tick(&snapshot, &status);

        Ok(TickOutcome {
            intent,
            damage,
            exp_gained,
            hunter_leveled,
            monster_leveled,
            revived,
            status,
            snapshot,
        })
    }

    /// Add a reward to the hunter's exp, leveling up when it reaches the
    /// cap. Returns true on level-up.
    ///
    /// The past-the-cap wrap (`exp = reward - (max_exp - exp)`) is kept
    /// verbatim from the original game; it is not a modulo carry-over.
    fn award_exp(&mut self, reward: i64) -> bool {
        if self.hunter.exp + reward < self.hunter.max_exp {
            self.hunter.exp += reward;
            false
        } else {
            self.hunter.exp = reward - (self.hunter.max_exp - self.hunter.exp);
            let next = self.hunter.level + 1;
            self.hunter.apply_stats_for_level(next, &mut self.rng);
            true
        }
    }

    fn check_invariants(&self) -> Result<()> {
        if self.hunter.level < 1 {
            return Err(BattleError::InvariantViolation(format!(
                "hunter level {} is below 1",
                self.hunter.level
            )));
        }
        if self.monster.level < 1 {
            return Err(BattleError::InvariantViolation(format!(
                "monster level {} is below 1",
                self.monster.level
            )));
        }
        if self.hunter.max_health < 1 || self.monster.max_health < 1 {
            return Err(BattleError::InvariantViolation(
                "max health dropped below 1".into(),
            ));
        }
        Ok(())
    }
}
