//! Terminal client for the journey board game.
//!
//! Assembles the runtime from environment configuration, prints the
//! narrative log as it happens, and prompts human players on stdin. AI
//! players are driven by the runtime itself; in normal mode the client
//! confirms their decisions.
//!
//! ```bash
//! SAGE_PLAYERS="Yan Hui,Zilu:ai" SAGE_MODE=normal cargo run -p sage-trail-client
//! ```
mod config;
mod logging;

use std::time::Duration;

use anyhow::Result;
use game_content::ContentFactory;
use game_core::{Modal, TrialCard};
use runtime::{
    Event, GameSetup, Phase, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle,
    SessionSnapshot, Topic,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::ClientConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env()?;
    let log_dir = logging::setup_logging(&client_config.session_id, client_config.log_stderr)?;

    tracing::info!("Starting sage-trail client");
    tracing::info!("Session ID: {}", client_config.session_id);
    tracing::debug!("Logs in {}", log_dir.display());

    let mut builder = Runtime::builder();
    let runtime_config = match &client_config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            builder = builder.content(factory.load_content()?);
            RuntimeConfig {
                game_config: factory.load_config()?,
                ..RuntimeConfig::default()
            }
            .with_env()
        }
        None => RuntimeConfig::from_env(),
    };
    tracing::info!(
        mode = %runtime_config.game_config.mode,
        win_condition = runtime_config.game_config.win_condition,
        "Runtime configured"
    );

    let runtime = builder.config(runtime_config).build().await?;
    let handle = runtime.handle();

    let mut log_rx = handle.subscribe(Topic::Log);
    let printer = tokio::spawn(async move {
        while let Ok(event) = log_rx.recv().await {
            if let Event::Log(line) = event {
                println!("{}", line.message);
            }
        }
    });

    handle
        .start_game(GameSetup::new(client_config.roster.clone()))
        .await?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let winner = play(&handle, &mut input).await?;
    println!("{winner} wins. Thanks for playing.");

    drop(handle);
    runtime.shutdown().await?;
    printer.abort();

    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Drives the session until someone wins, returning the winner's name.
async fn play(handle: &RuntimeHandle, input: &mut Input) -> Result<String> {
    loop {
        let snapshot = handle.query_snapshot().await?;
        if let Some(winner) = snapshot.winner {
            let name = snapshot
                .players
                .iter()
                .find(|p| p.id == winner)
                .map(|p| p.character.clone())
                .unwrap_or_default();
            return Ok(name);
        }

        match next_move(&snapshot, input).await? {
            Some(Move::Roll) => report(handle.roll().await)?,
            Some(Move::Answer(choice)) => {
                report(handle.select_option(choice).await)?;
                report(handle.acknowledge_modal().await)?;
            }
            Some(Move::Acknowledge) => report(handle.acknowledge_modal().await)?,
            Some(Move::AcknowledgePause) => report(handle.acknowledge_pause().await)?,
            None => tokio::time::sleep(POLL_INTERVAL).await,
        }
    }
}

enum Move {
    Roll,
    Answer(usize),
    Acknowledge,
    AcknowledgePause,
}

async fn next_move(snapshot: &SessionSnapshot, input: &mut Input) -> Result<Option<Move>> {
    if snapshot.awaiting_confirmation {
        prompt(input, "Press Enter to confirm the AI's decision.").await?;
        return Ok(Some(Move::Acknowledge));
    }

    let Some(player) = snapshot.current_player() else {
        return Ok(None);
    };
    if player.is_ai {
        // Outside quick mode an AI player's rest is acknowledged by hand.
        if snapshot.phase == Phase::PauseDisplay && !snapshot.mode.is_quick() {
            prompt(input, &format!("{} rests. Press Enter.", player.character)).await?;
            return Ok(Some(Move::AcknowledgePause));
        }
        return Ok(None);
    }

    let action = match (&snapshot.phase, &snapshot.modal) {
        (Phase::Idle, _) => {
            prompt(input, &format!("{}, press Enter to roll.", player.character)).await?;
            Some(Move::Roll)
        }
        (Phase::ModalOpen, Modal::Trial(card)) if snapshot.trial_selection.is_none() => {
            Some(Move::Answer(ask_trial(card, input).await?))
        }
        (Phase::ModalOpen, _) => {
            prompt(input, "Press Enter to continue.").await?;
            Some(Move::Acknowledge)
        }
        (Phase::PauseDisplay, _) => {
            prompt(input, "Press Enter to continue.").await?;
            Some(Move::AcknowledgePause)
        }
        _ => None,
    };
    Ok(action)
}

async fn ask_trial(card: &TrialCard, input: &mut Input) -> Result<usize> {
    println!("\n\"{}\"", card.quote);
    println!("{}", card.question);
    for (index, option) in card.options.iter().enumerate() {
        println!("  {}. {option}", TrialCard::option_letter(index));
    }

    loop {
        let Some(line) = prompt(input, "Your answer (A-D):").await? else {
            // No more input: take the first option.
            return Ok(0);
        };
        if let Some(choice) = parse_choice(&line) {
            return Ok(choice);
        }
        println!("Please answer with A, B, C or D.");
    }
}

fn parse_choice(line: &str) -> Option<usize> {
    match line.trim().to_ascii_uppercase().as_str() {
        "A" | "1" => Some(0),
        "B" | "2" => Some(1),
        "C" | "3" => Some(2),
        "D" | "4" => Some(3),
        _ => None,
    }
}

async fn prompt(input: &mut Input, message: &str) -> Result<Option<String>> {
    println!("{message}");
    Ok(input.next_line().await?)
}

/// Rejected intents are expected while the session is busy.
fn report(result: runtime::Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(RuntimeError::Rejected(rejection)) => {
            tracing::debug!(%rejection, "intent rejected");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_choice;

    #[test]
    fn choices_accept_letters_and_digits() {
        assert_eq!(parse_choice(" b "), Some(1));
        assert_eq!(parse_choice("4"), Some(3));
        assert_eq!(parse_choice("e"), None);
        assert_eq!(parse_choice(""), None);
    }
}
