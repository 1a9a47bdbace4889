//! Tuning constants for the battle simulation.

// Attack timing
pub const HUNTER_ATTACK_INTERVAL_MS: u64 = 800;
pub const MONSTER_ATTACK_INTERVAL_MS: u64 = 1000;

/// Buffered attack intents between the producers and the resolver.
/// Two producers at ~1 Hz never come close to filling this; it only keeps a
/// momentarily busy resolver from stalling the timers.
pub const INTENT_CHANNEL_CAPACITY: usize = 16;

// Monster stat curve
pub const MONSTER_BASE_HEALTH: i64 = 80;
pub const MONSTER_HEALTH_PER_LEVEL: i64 = 40;
pub const MONSTER_HEALTH_JITTER: i64 = 20;
pub const MONSTER_BASE_ATK: i64 = 6;
pub const MONSTER_ATK_PER_LEVEL: i64 = 4;
pub const MONSTER_ATK_JITTER: i64 = 3;
pub const MONSTER_BASE_DEF: i64 = 3;
pub const MONSTER_DEF_PER_LEVEL: i64 = 2;

// Hunter stat curve
pub const HUNTER_BASE_HEALTH: i64 = 100;
pub const HUNTER_HEALTH_PER_LEVEL: i64 = 50;
pub const HUNTER_HEALTH_JITTER: i64 = 20;
pub const HUNTER_BASE_ATK: i64 = 11;
pub const HUNTER_ATK_PER_LEVEL: i64 = 7;
pub const HUNTER_ATK_JITTER: i64 = 4;
pub const HUNTER_BASE_DEF: i64 = 5;
pub const HUNTER_DEF_PER_LEVEL: i64 = 4;
pub const HUNTER_DEF_JITTER: i64 = 2;

// Experience curve: max_exp = level * 10 + (level - 1) * 40
pub const EXP_CAP_PER_LEVEL: i64 = 10;
pub const EXP_CAP_STEP: i64 = 40;

// Reward for a defeated monster: level * 4 * factor, factor rolled in [1, 3)
pub const EXP_REWARD_PER_LEVEL: i64 = 4;
pub const EXP_REWARD_FACTOR_MIN: i64 = 1;
pub const EXP_REWARD_FACTOR_MAX: i64 = 3;

// Save files
pub const SAVE_VERSION_MAGIC: u64 = 0x4D48_554E_5445_5231; // "MHUNTER1"
pub const HUNTER_SAVE_FILE: &str = "hunter.sav";
pub const MONSTER_SAVE_FILE: &str = "monster.sav";
