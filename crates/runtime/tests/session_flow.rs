//! End-to-end session tests through the runtime handle.
//!
//! Time is paused, so tokio auto-advances the clock whenever every task is
//! idle and the paced session runs instantly.

use std::time::Duration;

use async_trait::async_trait;
use game_core::{GameMode, Modal, PlayerId, PlayerSetup, RngOracle, TrialCard};
use runtime::{
    Event, GameSetup, GenerationError, Phase, Rejection, Runtime, RuntimeConfig, RuntimeError,
    RuntimeHandle, SessionSnapshot, Topic, TrialGenerator, TrialRequest, parse_trial_response,
};

/// Every draw returns the same value: both dice show 6, landing on cell 12 (Cai).
struct Sixes;

impl RngOracle for Sixes {
    fn next_u32(&self, _seed: u64) -> u32 {
        5
    }
}

struct FixedGenerator;

#[async_trait]
impl TrialGenerator for FixedGenerator {
    async fn generate(&self, request: &TrialRequest) -> Result<TrialCard, GenerationError> {
        assert_eq!(request.label, "the State of Cai");
        parse_trial_response(
            r#"{"question": "Who asked about the ford?",
                "options": ["Zilu", "Zigong", "Yan Hui", "Zengzi"],
                "answerIndex": 0,
                "analysis": "Analects 18.6.",
                "quote": "He knows the ford."}"#,
        )
    }
}

struct StalledGenerator;

#[async_trait]
impl TrialGenerator for StalledGenerator {
    async fn generate(&self, _request: &TrialRequest) -> Result<TrialCard, GenerationError> {
        tokio::time::sleep(Duration::from_secs(600)).await;
        Err(GenerationError::Unavailable("never answers".into()))
    }
}

fn humans() -> Vec<PlayerSetup> {
    vec![PlayerSetup::human("Yan Hui"), PlayerSetup::human("Zigong")]
}

/// Polls the snapshot until `done` holds.
async fn wait_for(
    handle: &RuntimeHandle,
    done: impl Fn(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    for _ in 0..50_000 {
        let snapshot = handle.query_snapshot().await.expect("snapshot");
        if done(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("condition never reached");
}

#[tokio::test(start_paused = true)]
async fn quick_ai_session_runs_to_victory() {
    let config = RuntimeConfig {
        seed: Some(11),
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder().config(config).build().await.unwrap();
    let handle = runtime.handle();
    let mut turns = handle.subscribe(Topic::Turn);

    let roster = vec![PlayerSetup::ai("Yan Hui"), PlayerSetup::ai("Zilu")];
    handle
        .start_game(
            GameSetup::new(roster)
                .with_mode(GameMode::Quick)
                .with_win_condition(3),
        )
        .await
        .unwrap();

    let first = turns.recv().await.unwrap();
    assert!(matches!(first, Event::Turn(turn) if turn.player == PlayerId(0)));

    let finished = wait_for(&handle, |s| s.winner.is_some()).await;
    let winner = finished.winner.unwrap();
    assert_eq!(finished.phase, Phase::GameOver);
    assert_eq!(finished.modal, Modal::Win { winner });
    assert!(
        finished
            .players
            .iter()
            .any(|p| p.id == winner && p.meat >= 3)
    );
    assert!(finished.log[0].contains("completes the journey"));

    assert!(matches!(
        handle.roll().await,
        Err(RuntimeError::Rejected(Rejection::GameOver { .. }))
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn intents_restart_and_log_topic() {
    let runtime = Runtime::builder().build().await.unwrap();
    let handle = runtime.handle();
    let mut log = handle.subscribe(Topic::Log);

    assert!(matches!(
        handle.roll().await,
        Err(RuntimeError::Rejected(Rejection::NotStarted))
    ));

    handle.start_game(GameSetup::new(humans())).await.unwrap();
    match log.recv().await.unwrap() {
        Event::Log(line) => assert!(line.message.starts_with("The journey begins")),
        other => panic!("unexpected event {other:?}"),
    }

    handle.roll().await.unwrap();
    assert!(matches!(
        handle.roll().await,
        Err(RuntimeError::Rejected(Rejection::Busy {
            phase: Phase::Rolling,
        }))
    ));
    let rolling = handle.query_snapshot().await.unwrap();
    assert!(rolling.busy);

    handle.restart().await.unwrap();
    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.phase, Phase::NotStarted);
    assert!(snapshot.players.is_empty());
    assert_eq!(snapshot.log[0], "The game has been restarted.");

    // Nothing from the cancelled roll fires later.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(
        handle.query_snapshot().await.unwrap().phase,
        Phase::NotStarted
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn advanced_mode_opens_generated_trial() {
    let runtime = Runtime::builder()
        .oracle(Sixes)
        .generator(FixedGenerator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle
        .start_game(GameSetup::new(humans()).with_mode(GameMode::Advanced))
        .await
        .unwrap();
    handle.roll().await.unwrap();

    let open = wait_for(&handle, |s| s.phase == Phase::ModalOpen).await;
    let Modal::Trial(card) = &open.modal else {
        panic!("expected a trial, got {:?}", open.modal);
    };
    assert!(card.generated);
    assert_eq!(card.options[0], "Zilu");
    assert_eq!(open.players[0].position, 12);

    handle.select_option(0).await.unwrap();
    handle.acknowledge_modal().await.unwrap();
    let next = wait_for(&handle, |s| s.phase == Phase::Idle).await;
    assert_eq!(next.current, Some(PlayerId(1)));
    assert_eq!(next.players[0].meat, 1);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stalled_generator_times_out_to_static_deck() {
    let runtime = Runtime::builder()
        .oracle(Sixes)
        .generator(StalledGenerator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle
        .start_game(GameSetup::new(humans()).with_mode(GameMode::Advanced))
        .await
        .unwrap();
    handle.roll().await.unwrap();

    let generating = wait_for(&handle, |s| s.generating).await;
    assert!(generating.busy);

    let open = wait_for(&handle, |s| s.phase == Phase::ModalOpen).await;
    let Modal::Trial(card) = &open.modal else {
        panic!("expected a trial");
    };
    assert!(!card.generated);
    assert!(open.log.iter().any(|m| m.contains("classic trial")));

    drop(handle);
    runtime.shutdown().await.unwrap();
}
