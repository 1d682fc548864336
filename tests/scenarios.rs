//! End-to-end scenarios: engine moves and full scripted playback.

use river_crossing::config::{PlaybackConfig, PuzzleConfigBuilder};
use river_crossing::{
    Bank, BoatSide, Engine, IllegalReason, Move, PlaybackController, PlaybackError,
    PlaybackSession, PuzzleError, ScriptIntegrityError, SolutionScript, Status,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn legal_crossing_from_start() {
    init_tracing();
    let engine = Engine::default();
    let start = engine.initial_state();

    let next = engine.apply(&start, Move::new(0, 2)).unwrap();

    assert_eq!(next.left(), Bank::new(3, 1));
    assert_eq!(next.right(), Bank::new(0, 2));
    assert_eq!(next.boat(), BoatSide::Right);
    assert_eq!(next.status(), Status::Safe);
}

#[test]
fn illegal_move_is_rejected_without_change() {
    init_tracing();
    let engine = Engine::default();
    let start = engine.initial_state();

    assert!(!engine.is_legal(&start, Move::new(1, 0)));
    assert!(engine.apply(&start, Move::new(1, 0)).is_err());
    assert_eq!(start.left(), Bank::new(3, 3));
    assert_eq!(start.move_count(), 0);
}

#[test]
fn outnumbered_missionaries_violate() {
    let engine = Engine::default();

    let lost = engine.arrange(Bank::new(2, 0), BoatSide::Left, 5).unwrap();
    assert_eq!(lost.status(), Status::Violated);
    assert!(matches!(
        engine.apply(&lost, Move::new(1, 0)),
        Err(PuzzleError::TerminalState {
            status: Status::Violated
        })
    ));

    let risky = engine.arrange(Bank::new(2, 2), BoatSide::Left, 5).unwrap();
    assert_eq!(
        engine.check(&risky, Move::new(0, 1)),
        Err(IllegalReason::Unsafe {
            side: BoatSide::Right
        })
    );
    let forced = engine.force(&risky, Move::new(0, 1)).unwrap();
    assert_eq!(forced.status(), Status::Violated);
}

#[test]
fn one_missionary_with_two_cannibals_is_unsafe() {
    let engine = Engine::default();
    let state = engine.arrange(Bank::new(2, 2), BoatSide::Left, 3).unwrap();

    // leaves 1M 2C on the left
    assert_eq!(
        engine.check(&state, Move::new(1, 0)),
        Err(IllegalReason::Unsafe {
            side: BoatSide::Left
        })
    );
}

#[test]
fn full_playback_reaches_victory() {
    init_tracing();
    let engine = Engine::default();
    let mut controller = PlaybackController::new(engine, SolutionScript::canonical().unwrap());
    let mut state = engine.initial_state();

    while !controller.is_finished() {
        state = controller.step(&state).unwrap();
    }

    assert_eq!(state.status(), Status::Victory);
    assert_eq!(state.move_count(), 11);
    assert_eq!(state.left(), Bank::EMPTY);
    assert_eq!(state.right(), Bank::new(3, 3));
    assert_eq!(state.history().len(), 11);
    assert_eq!(state.message(), "Victory! You solved the puzzle in 11 moves.");
}

#[test]
fn history_replays_the_script() {
    let engine = Engine::default();
    let script = SolutionScript::canonical().unwrap();
    let mut controller = PlaybackController::new(engine, script.clone());
    let mut state = engine.initial_state();
    while !controller.is_finished() {
        state = controller.step(&state).unwrap();
    }

    let path = state.history().path();
    assert_eq!(path.len(), script.len());
    for (entry, position) in script.entries().iter().zip(path) {
        assert!(entry.matches(position));
    }
}

#[test]
fn script_for_other_dimensions_is_validated_against_its_engine() {
    let config = PuzzleConfigBuilder::new()
        .missionaries(2)
        .cannibals(2)
        .build()
        .unwrap();
    let engine = Engine::new(config);

    let json = r#"[
        {"leftM": 2, "leftC": 2, "boatSide": "Left", "rightM": 0, "rightC": 0, "label": "Initial state"},
        {"leftM": 1, "leftC": 1, "boatSide": "Right", "rightM": 1, "rightC": 1, "label": "Move 1 missionary & 1 cannibal to right"},
        {"leftM": 2, "leftC": 1, "boatSide": "Left", "rightM": 0, "rightC": 1, "label": "Move 1 missionary to left"},
        {"leftM": 0, "leftC": 1, "boatSide": "Right", "rightM": 2, "rightC": 1, "label": "Move 2 missionaries to right"},
        {"leftM": 0, "leftC": 2, "boatSide": "Left", "rightM": 2, "rightC": 0, "label": "Move 1 cannibal to left"},
        {"leftM": 0, "leftC": 0, "boatSide": "Right", "rightM": 2, "rightC": 2, "label": "Move 2 cannibals to right"}
    ]"#;
    let script = SolutionScript::from_json(&engine, json).unwrap();
    assert_eq!(script.crossings(), 5);

    let err = SolutionScript::from_json(&Engine::default(), json).unwrap_err();
    assert!(matches!(
        err,
        PlaybackError::ScriptIntegrity(ref errors) if errors.contains(&ScriptIntegrityError::StartMismatch)
    ));
}

#[tokio::test(start_paused = true)]
async fn auto_play_with_custom_delay() {
    init_tracing();
    let config = PlaybackConfig::builder()
        .step_delay(Duration::from_millis(100))
        .build()
        .unwrap();
    let session = PlaybackSession::new(
        Engine::default(),
        SolutionScript::canonical().unwrap(),
        config,
    );

    session.set_auto_play(true).await;
    tokio::time::sleep(Duration::from_millis(550)).await;
    assert_eq!(session.script_index().await, 5);

    tokio::time::sleep(Duration::from_millis(1000)).await;
    let state = session.state().await;
    assert_eq!(state.status(), Status::Victory);
    assert!(!session.is_auto_play().await);
    assert_eq!(session.progress().await, 1.0);
}

#[tokio::test(start_paused = true)]
async fn reset_before_first_tick_leaves_no_trace() {
    let session = PlaybackSession::canonical().unwrap();

    session.set_auto_play(true).await;
    session.reset().await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(session.script_index().await, 0);
    let state = session.state().await;
    assert_eq!(state.status(), Status::Ready);
    assert!(state.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_mid_playback_restarts_cleanly() {
    let session = PlaybackSession::canonical().unwrap();
    session.set_auto_play(true).await;
    tokio::time::sleep(Duration::from_millis(4100)).await;
    assert_eq!(session.script_index().await, 2);

    session.reset().await;
    assert_eq!(session.state().await.move_count(), 0);

    session.set_auto_play(true).await;
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(session.script_index().await, 1);
}
