//! Demo battle client.
//!
//! Composition root that wires content, the battle session, and the console
//! frontend together and runs one battle to completion.
//!
//! Configuration comes from the environment:
//!
//! - `BATTLE_DATA_DIR`: load content and persist the party from this
//!   directory (created with default data if missing). Without it the
//!   embedded data set is used and nothing touches disk.
//! - `BATTLE_ENEMY_ID`: pick a specific enemy instead of a random one.
//! - `BATTLE_SEED`: seed for battle randomness (defaults to the clock).
//! - `BATTLE_SKIP_ANIMATIONS`: collapse message pauses.
//! - `BATTLE_AUTO`: autoplay with the first attack instead of the menu.

mod console;

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use battle_core::{BattleConfig, BattleSession, PcgRng, Side, compute_seed};
use battle_content::{AttackCatalog, CharacterRecord, ContentFactory, EnemyRoster, PartyFile};
use runtime::{BattleRuntime, FilePartyStore, FirstAttackProvider, InMemoryPartyStore};

use crate::console::{ConsoleActionProvider, ConsolePresenter};

struct Content {
    attacks: AttackCatalog,
    enemies: EnemyRoster,
    party: PartyFile,
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|v| !v.is_empty() && v != "0" && v != "false")
}

fn load_content(data_dir: Option<&PathBuf>) -> Result<Content> {
    match data_dir {
        Some(dir) => {
            if !dir.join("attacks.json").exists() {
                battle_content::write_default_data(dir)
                    .with_context(|| format!("seeding data dir {}", dir.display()))?;
            }
            let factory = ContentFactory::new(dir);
            Ok(Content {
                attacks: factory.load_attacks()?,
                enemies: factory.load_enemies()?,
                party: factory.load_party()?,
            })
        }
        None => {
            let embedded = battle_content::EmbeddedContent::load()?;
            Ok(Content {
                attacks: embedded.attacks,
                enemies: embedded.enemies,
                party: embedded.party,
            })
        }
    }
}

fn pick_enemy<'a>(content: &'a Content, seed: u64) -> Result<&'a CharacterRecord> {
    match env::var("BATTLE_ENEMY_ID") {
        Ok(raw) => {
            let id: u32 = raw.parse().context("BATTLE_ENEMY_ID must be a number")?;
            Ok(content.enemies.by_id(id)?)
        }
        Err(_) => Ok(content
            .enemies
            .random_pick(&PcgRng, compute_seed(seed, 0, u32::MAX))?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let data_dir = env::var_os("BATTLE_DATA_DIR").map(PathBuf::from);
    let content = load_content(data_dir.as_ref())?;

    let seed = match env::var("BATTLE_SEED") {
        Ok(raw) => raw.parse().context("BATTLE_SEED must be a number")?,
        Err(_) => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default(),
    };
    tracing::info!(seed, "starting battle");

    let player_record = content.party.active().clone();
    let enemy_record = pick_enemy(&content, seed)?;

    let mut config = BattleConfig::with_seed(seed);
    config.skip_animations = env_flag("BATTLE_SKIP_ANIMATIONS");

    let session = BattleSession::new(
        player_record.to_spec()?.resolve(Side::Player, &content.attacks),
        enemy_record.to_spec()?.resolve(Side::Enemy, &content.attacks),
        config,
        PcgRng,
    );

    let presenter = ConsolePresenter {
        skip_pauses: env_flag("BATTLE_SKIP_ANIMATIONS"),
    };

    let mut builder = BattleRuntime::builder().session(session).presenter(presenter);
    builder = if env_flag("BATTLE_AUTO") {
        builder.provider(FirstAttackProvider)
    } else {
        builder.provider(ConsoleActionProvider)
    };
    builder = match data_dir {
        Some(dir) => builder.store(FilePartyStore::new(dir.join("party.json"))),
        None => builder.store(InMemoryPartyStore::new(
            content.party.members().to_vec(),
        )),
    };

    let report = builder.build()?.run().await?;

    println!("\nresult: {}", report.ending);
    if report.player_knocked_out {
        println!("{} was overwhelmed. Back to the village...", player_record.name);
    }
    println!("{} HP saved at {}", player_record.name, report.final_player_hp);

    Ok(())
}
