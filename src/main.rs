//! Monster Hunter binary: zero-player battle in the terminal.
//!
//! `monster-hunter new` starts a fresh battle, `monster-hunter continue`
//! restores the saved one (falling back to fresh when no usable save
//! exists). While running, stdin commands mirror the original game's
//! buttons: `save`, `save-exit`, `exit`.

use monster_hunter::display::{BattleSnapshot, ConsoleSink};
use monster_hunter::resolver::AttackResolver;
use monster_hunter::save_manager::{PersistenceGateway, SaveManager};
use monster_hunter::scheduler::spawn_battle;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

enum Mode {
    New,
    Continue,
}

struct CliArgs {
    mode: Mode,
    seed: Option<u64>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut mode = None;
    let mut seed = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "new" => mode = Some(Mode::New),
            "continue" => mode = Some(Mode::Continue),
            "--seed" => {
                let value = args.next().ok_or("--seed requires a value")?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed: {value}"))?,
                );
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(CliArgs {
        mode: mode.ok_or("usage: monster-hunter <new|continue> [--seed N]")?,
        seed,
    })
}

fn save_progress(saves: &Option<SaveManager>, snapshot: &BattleSnapshot) {
    match saves {
        Some(manager) => match manager.save(snapshot) {
            Ok(()) => println!("Progress saved."),
            Err(e) => error!("{e}"),
        },
        None => error!("no save directory available"),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monster_hunter=info".into()),
        )
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(1);
        }
    };

    // Saving is best-effort: a battle can still run without a config dir.
    let saves = match SaveManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            warn!("save directory unavailable: {e}");
            None
        }
    };

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let snapshot = match args.mode {
        Mode::Continue => match saves.as_ref().and_then(|manager| manager.load()) {
            Some(snapshot) => {
                info!(
                    hunter_level = snapshot.hunter.level,
                    monster_level = snapshot.monster.level,
                    "continuing saved battle"
                );
                snapshot
            }
            None => {
                info!("no saved battle, starting fresh");
                BattleSnapshot::fresh(&mut rng)
            }
        },
        Mode::New => BattleSnapshot::fresh(&mut rng),
    };

    let resolver = AttackResolver::new(snapshot, rng, ConsoleSink);
    let handle = spawn_battle(resolver);
    println!("Battle running. Commands: save, save-exit, exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "save" => save_progress(&saves, &handle.latest()),
            "save-exit" => {
                // Exits even if the save failed, like the original button
                save_progress(&saves, &handle.latest());
                break;
            }
            "exit" | "quit" => break,
            "" => {}
            other => println!("Unknown command: {other} (save, save-exit, exit)"),
        }
    }

    let final_state = handle.stop().await;
    info!(
        hunter_level = final_state.hunter.level,
        monster_level = final_state.monster.level,
        "battle stopped"
    );
}
