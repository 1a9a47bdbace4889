//! Monster Hunter - Zero-Player Battle Simulation
//!
//! A hunter and a monster attack each other on independent periodic
//! schedules, forever. This library holds the combat core: stat
//! progression, the combatant records, the serializing attack resolver,
//! the scheduler, and persistence. The binary wires it to a console
//! display and stdin commands.

pub mod combatant;
pub mod constants;
pub mod display;
pub mod errors;
pub mod progression;
pub mod resolver;
pub mod save_manager;
pub mod scheduler;

pub use combatant::{Combatant, Hunter, Monster};
pub use display::{BattleSnapshot, DisplaySink};
pub use errors::BattleError;
pub use resolver::{AttackIntent, AttackResolver, TickOutcome};
pub use scheduler::{spawn_battle, BattleHandle};
