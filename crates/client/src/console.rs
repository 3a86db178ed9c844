//! Terminal presenter and action menu.

use std::io::{self, Write};

use async_trait::async_trait;
use battle_core::{BattleCue, BattleState, PlayerAction, Side};
use runtime::{BattlePresenter, BattleView, PlayerActionProvider, Result, RuntimeError};

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| RuntimeError::Presentation(e.to_string()))?;
    Ok(line.trim().to_string())
}

async fn read_line_async() -> Result<String> {
    tokio::task::spawn_blocking(read_line)
        .await
        .map_err(|e| RuntimeError::Presentation(e.to_string()))?
}

/// Renders battle cues as plain terminal text.
pub struct ConsolePresenter {
    /// When set, "press enter" pauses are skipped.
    pub skip_pauses: bool,
}

#[async_trait]
impl BattlePresenter for ConsolePresenter {
    async fn present(&self, cue: &BattleCue) -> Result<()> {
        match cue {
            BattleCue::SceneTransition => println!("\n=== BATTLE ==="),
            BattleCue::CombatantAppear { side, name, .. } => match side {
                Side::Enemy => println!("A wild {name} appeared!"),
                Side::Player => println!("Go, {name}!"),
            },
            BattleCue::Message {
                lines,
                wait_for_input,
            } => {
                for line in lines {
                    println!("{line}");
                }
                if *wait_for_input && !self.skip_pauses {
                    print!("(press enter)");
                    io::stdout()
                        .flush()
                        .map_err(|e| RuntimeError::Presentation(e.to_string()))?;
                    read_line_async().await?;
                }
            }
            BattleCue::ShowBattleMenu => {}
            BattleCue::Attack {
                attacker,
                animation,
                ..
            } => println!("  [{attacker} attack: {animation}]"),
            BattleCue::HealthUpdate {
                side,
                current,
                maximum,
            } => println!("  {side} HP: {current}/{maximum}"),
            BattleCue::Faint { side } => println!("  [{side} fainted]"),
            BattleCue::SceneFinish { .. } => println!("=== BATTLE OVER ==="),
        }
        Ok(())
    }

    async fn state_entered(&self, state: BattleState) -> Result<()> {
        tracing::debug!(%state, "entered");
        Ok(())
    }
}

/// Reads the player's choice from stdin.
pub struct ConsoleActionProvider;

#[async_trait]
impl PlayerActionProvider for ConsoleActionProvider {
    async fn choose(&self, view: BattleView<'_>) -> Result<PlayerAction> {
        loop {
            println!(
                "\n{} {} vs {} {}",
                view.player.name(),
                view.player.hp(),
                view.enemy.name(),
                view.enemy.hp()
            );
            for (i, attack) in view.player.attacks().iter().enumerate() {
                println!("  {i}: {}", attack.name);
            }
            print!("fight <n> / item / run > ");
            io::stdout()
                .flush()
                .map_err(|e| RuntimeError::Presentation(e.to_string()))?;

            let input = read_line_async().await?;
            let mut parts = input.split_whitespace();
            match parts.next() {
                Some("fight") | Some("f") => {
                    let attack_index = parts
                        .next()
                        .and_then(|raw| raw.parse::<usize>().ok())
                        .unwrap_or(0);
                    return Ok(PlayerAction::Fight { attack_index });
                }
                Some("item") | Some("i") => return Ok(PlayerAction::UseItem),
                Some("run") | Some("r") | Some("flee") => return Ok(PlayerAction::Flee),
                _ => println!("unrecognized command"),
            }
        }
    }
}
