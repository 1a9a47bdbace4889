//! Combatant records for the two sides of the battle.
//!
//! `Hunter` and `Monster` are two distinct record shapes sharing the small
//! [`Combatant`] capability trait (the hunter additionally tracks
//! experience). Derived stats are only ever written through
//! `apply_stats_for_level`, which routes through [`crate::progression`].
//!
//! Neither record applies damage to itself; all mutation during combat goes
//! through the resolver so the shared state has exactly one writer.

use crate::progression;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Capability shared by both sides: the stats the display and the loop
/// guards need, plus revival.
pub trait Combatant {
    fn level(&self) -> i64;
    fn max_health(&self) -> i64;
    fn health(&self) -> i64;
    fn atk(&self) -> i64;
    fn def(&self) -> i64;

    /// Health may go negative transiently inside a resolver transaction,
    /// so "alive" is strictly positive health.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }

    /// Reset health to full. Never changes level or experience.
    fn revive(&mut self);
}

/// The protagonist: levels up by filling an experience bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunter {
    pub level: i64,
    pub max_health: i64,
    pub health: i64,
    pub atk: i64,
    pub def: i64,
    pub exp: i64,
    pub max_exp: i64,
}

impl Hunter {
    /// Fresh level-1 hunter with full health and no experience.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut hunter = Self {
            level: 1,
            max_health: 0,
            health: 0,
            atk: 0,
            def: 0,
            exp: 0,
            max_exp: 0,
        };
        hunter.apply_stats_for_level(1, rng);
        hunter.health = hunter.max_health;
        hunter
    }

    /// Recompute all derived stats for `level`. Leaves `health` and `exp`
    /// untouched; used both at creation and on level-up.
    pub fn apply_stats_for_level(&mut self, level: i64, rng: &mut impl Rng) {
        self.level = level;
        self.max_health = progression::hunter_max_health(level, rng);
        self.atk = progression::hunter_atk(level, rng);
        self.def = progression::hunter_def(level, rng);
        self.max_exp = progression::hunter_max_exp(level);
    }
}

impl Combatant for Hunter {
    fn level(&self) -> i64 {
        self.level
    }
    fn max_health(&self) -> i64 {
        self.max_health
    }
    fn health(&self) -> i64 {
        self.health
    }
    fn atk(&self) -> i64 {
        self.atk
    }
    fn def(&self) -> i64 {
        self.def
    }
    fn revive(&mut self) {
        self.health = self.max_health;
    }
}

/// The adversary: levels up by one every time it is defeated, no
/// experience bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub level: i64,
    pub max_health: i64,
    pub health: i64,
    pub atk: i64,
    pub def: i64,
}

impl Monster {
    /// Fresh level-1 monster with full health.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut monster = Self {
            level: 1,
            max_health: 0,
            health: 0,
            atk: 0,
            def: 0,
        };
        monster.apply_stats_for_level(1, rng);
        monster.health = monster.max_health;
        monster
    }

    /// Recompute all derived stats for `level`. Leaves `health` untouched.
    pub fn apply_stats_for_level(&mut self, level: i64, rng: &mut impl Rng) {
        self.level = level;
        self.max_health = progression::monster_max_health(level, rng);
        self.atk = progression::monster_atk(level, rng);
        self.def = progression::monster_def(level);
    }
}

impl Combatant for Monster {
    fn level(&self) -> i64 {
        self.level
    }
    fn max_health(&self) -> i64 {
        self.max_health
    }
    fn health(&self) -> i64 {
        self.health
    }
    fn atk(&self) -> i64 {
        self.atk
    }
    fn def(&self) -> i64 {
        self.def
    }
    fn revive(&mut self) {
        self.health = self.max_health;
    }
}
