//! Periodic attack scheduling.
//!
//! Two producer tasks fire attack intents on fixed, independent intervals
//! (hunter every 800ms, monster every 1000ms) and push them into one mpsc
//! channel. A single consumer task owns the [`AttackResolver`] and applies
//! intents strictly in arrival order; channel send order is the tie-break
//! when both timers fire together. Post-transaction snapshots go out on a
//! watch channel, which is also what the producers read for their
//! "both sides alive" loop guard.
//!
//! Stopping is cooperative: a stop flag is set once, each producer checks it
//! before its next tick, and the consumer drains whatever intents are
//! already queued before exiting.

use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::constants::{
    HUNTER_ATTACK_INTERVAL_MS, INTENT_CHANNEL_CAPACITY, MONSTER_ATTACK_INTERVAL_MS,
};
use crate::display::{BattleSnapshot, DisplaySink};
use crate::resolver::{AttackIntent, AttackResolver};

/// Handle to a running battle: snapshot access and shutdown.
pub struct BattleHandle {
    snapshot_rx: watch::Receiver<BattleSnapshot>,
    stop_tx: watch::Sender<bool>,
    producers: Vec<JoinHandle<()>>,
    consumer: JoinHandle<BattleSnapshot>,
}

impl BattleHandle {
    /// Latest post-transaction snapshot (what save actions persist).
    pub fn latest(&self) -> BattleSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Signal the stop flag, wait for both producers and the resolver to
    /// finish, and return the final battle state. Intents already queued
    /// when the flag is raised still resolve.
    pub async fn stop(self) -> BattleSnapshot {
        let fallback = self.latest();
        let _ = self.stop_tx.send(true);
        for producer in self.producers {
            let _ = producer.await;
        }
        match self.consumer.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("resolver task panicked: {e}");
                fallback
            }
        }
    }
}

/// Spawn the resolver task and both attack producers.
pub fn spawn_battle<R, D>(resolver: AttackResolver<R, D>) -> BattleHandle
where
    R: Rng + Send + 'static,
    D: DisplaySink + 'static,
{
    let (intent_tx, mut intent_rx) = mpsc::channel::<AttackIntent>(INTENT_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(resolver.snapshot());
    let (stop_tx, stop_rx) = watch::channel(false);

    // Single consumer: the only writer of the combatant pair. The loop ends
    // when every producer has dropped its sender, so queued intents drain
    // before shutdown.
    let consumer = tokio::spawn(async move {
        let mut resolver = resolver;
        while let Some(intent) = intent_rx.recv().await {
            match resolver.resolve(intent) {
                Ok(outcome) => {
                    debug!(
                        intent = ?outcome.intent,
                        damage = outcome.damage,
                        exp = outcome.exp_gained,
                        revived = outcome.revived,
                        "{}",
                        outcome.status
                    );
                    let _ = snapshot_tx.send(outcome.snapshot);
                }
                Err(e) => {
                    // Broken tick: stop applying intents rather than keep
                    // mutating corrupted state.
                    error!("halting resolver: {e}");
                    break;
                }
            }
        }
        info!("resolver stopped");
        resolver.into_snapshot()
    });

    let producers = vec![
        spawn_producer(
            AttackIntent::HunterStrikes,
            Duration::from_millis(HUNTER_ATTACK_INTERVAL_MS),
            intent_tx.clone(),
            snapshot_rx.clone(),
            stop_rx.clone(),
        ),
        spawn_producer(
            AttackIntent::MonsterStrikes,
            Duration::from_millis(MONSTER_ATTACK_INTERVAL_MS),
            intent_tx,
            snapshot_rx.clone(),
            stop_rx,
        ),
    ];

    BattleHandle {
        snapshot_rx,
        stop_tx,
        producers,
        consumer,
    }
}

/// One periodic attack loop. Mirrors the original attack threads: strike,
/// then sleep for the interval, while both sides were alive at the top of
/// the iteration. Producers never touch combat state; they only enqueue.
fn spawn_producer(
    intent: AttackIntent,
    period: Duration,
    intent_tx: mpsc::Sender<AttackIntent>,
    snapshot_rx: watch::Receiver<BattleSnapshot>,
    stop_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if *stop_rx.borrow() {
                debug!(?intent, "attack loop stopped");
                break;
            }
            // Same guard the original threads used. The resolver revives
            // both sides inside the transaction, so published snapshots
            // almost always pass it; it still closes the race where the
            // resolver has already halted on a fault.
            if !snapshot_rx.borrow().both_alive() {
                debug!(?intent, "attack loop ended: a combatant is down");
                break;
            }
            if intent_tx.send(intent).await.is_err() {
                // Resolver gone; nothing left to attack.
                break;
            }
        }
    })
}
