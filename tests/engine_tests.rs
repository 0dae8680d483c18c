mod common;

use common::gesture;
use rstest::{fixture, rstest};
use signforge::config::EngineConfig;
use signforge::engine::*;
use signforge::gestures::*;

#[fixture]
fn engine() -> ConfirmationEngine {
    ConfirmationEngine::default()
}

fn feed(engine: &mut ConfirmationEngine, frames: &[(GestureLabel, f64, u64)]) -> Vec<DisplayState> {
    frames
        .iter()
        .map(|&(label, conf, t)| engine.process(&gesture(label, conf), t))
        .collect()
}

#[rstest]
fn test_three_sightings_confirm_with_bonus(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::Pointing, 0.88, 0),
            (GestureLabel::Pointing, 0.85, 100),
            (GestureLabel::Pointing, 0.83, 200),
        ],
    );

    assert_eq!(states[0], DisplayState::Settling);
    assert_eq!(states[1], DisplayState::Settling);
    assert_eq!(
        states[2],
        DisplayState::Confirmed {
            label: GestureLabel::Pointing,
            confidence: (0.88f64 + 0.1).min(1.0),
        }
    );
    assert_eq!(states[2].label(), "Pointing");
}

#[rstest]
fn test_bonus_is_capped(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::ClosedFist, 0.95, 0),
            (GestureLabel::ClosedFist, 0.95, 50),
            (GestureLabel::ClosedFist, 0.95, 100),
        ],
    );
    assert_eq!(states[2].confidence(), 1.0);
}

#[rstest]
fn test_label_change_restarts_count(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::OpenHand, 0.92, 0),
            (GestureLabel::OpenHand, 0.92, 100),
            (GestureLabel::PeaceSign, 0.87, 200),
        ],
    );
    assert!(!states[2].is_confirmed());

    let c = engine.candidate().unwrap();
    assert_eq!(c.label, GestureLabel::PeaceSign);
    assert_eq!(c.count, 1);
    assert_eq!(c.first_seen_ms, 200);

    let states = feed(
        &mut engine,
        &[
            (GestureLabel::PeaceSign, 0.87, 300),
            (GestureLabel::PeaceSign, 0.87, 400),
        ],
    );
    assert_eq!(states[1].confirmed(), Some(GestureLabel::PeaceSign));
}

#[rstest]
fn test_change_after_confirmation_shows_settling(mut engine: ConfirmationEngine) {
    feed(
        &mut engine,
        &[
            (GestureLabel::ThumbsUp, 0.93, 0),
            (GestureLabel::ThumbsUp, 0.93, 100),
            (GestureLabel::ThumbsUp, 0.93, 200),
        ],
    );

    let s = engine.process(&gesture(GestureLabel::StopSign, 0.9), 300);
    assert_eq!(s, DisplayState::Settling);
    assert_eq!(s.label(), SETTLING_LABEL);
    assert_eq!(s.confidence(), SETTLING_CONFIDENCE);

    let s = engine.process(&gesture(GestureLabel::StopSign, 0.9), 450);
    assert_eq!(s, DisplayState::Settling);
}

#[rstest]
fn test_in_progress_after_grace(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::PeaceSign, 0.9, 0),
            (GestureLabel::PeaceSign, 0.9, 500),
        ],
    );
    assert_eq!(
        states[1],
        DisplayState::InProgress {
            label: GestureLabel::PeaceSign,
            count: 2,
            confidence: 0.9 * (2.0 / 3.0),
        }
    );
    assert_eq!(states[1].label(), "Detecting Peace Sign...");
}

#[rstest]
fn test_expired_candidate_never_confirms(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::OkSign, 0.89, 0),
            (GestureLabel::OkSign, 0.89, 1000),
            (GestureLabel::OkSign, 0.89, 1600),
        ],
    );
    assert_eq!(states[2], DisplayState::Waiting);
    assert!(engine.candidate().is_none());
}

#[rstest]
fn test_window_boundary_is_inclusive(mut engine: ConfirmationEngine) {
    let states = feed(
        &mut engine,
        &[
            (GestureLabel::OkSign, 0.89, 0),
            (GestureLabel::OkSign, 0.89, 700),
            (GestureLabel::OkSign, 0.89, 1500),
        ],
    );
    assert!(states[2].is_confirmed());
}

#[rstest]
fn test_confirmation_holds_until_window_expires(mut engine: ConfirmationEngine) {
    feed(
        &mut engine,
        &[
            (GestureLabel::ClosedFist, 0.95, 0),
            (GestureLabel::ClosedFist, 0.95, 100),
            (GestureLabel::ClosedFist, 0.95, 200),
        ],
    );

    assert!(engine.process(&FrameOutcome::NoHand, 900).is_confirmed());
    assert!(engine.poll(1500).is_confirmed());
    assert_eq!(engine.poll(1501), DisplayState::Waiting);
}

#[rstest]
#[case::sentinel_no_hand(FrameOutcome::NoHand)]
#[case::sentinel_invalid(FrameOutcome::Invalid {
    reason: InvalidReason::WrongPointCount { found: 3 }
})]
#[case::unknown(gesture(GestureLabel::Unknown, 0.95))]
#[case::below_threshold(gesture(GestureLabel::Pointing, 0.69))]
fn test_ignored_outcomes_never_become_candidates(
    mut engine: ConfirmationEngine,
    #[case] outcome: FrameOutcome,
) {
    for t in 0..5 {
        assert_eq!(engine.process(&outcome, t * 100), DisplayState::Waiting);
    }
    assert!(engine.candidate().is_none());
    assert_eq!(engine.history().len(), 5);
}

#[rstest]
fn test_threshold_is_inclusive(mut engine: ConfirmationEngine) {
    engine.process(&gesture(GestureLabel::Pointing, 0.7), 0);
    assert_eq!(engine.candidate().map(|c| c.count), Some(1));
}

#[rstest]
fn test_candidate_keeps_max_confidence(mut engine: ConfirmationEngine) {
    feed(
        &mut engine,
        &[
            (GestureLabel::StopSign, 0.75, 0),
            (GestureLabel::StopSign, 0.9, 100),
            (GestureLabel::StopSign, 0.8, 150),
        ],
    );
    assert_eq!(engine.candidate().unwrap().confidence, 0.9);
}

#[rstest]
fn test_history_is_bounded_fifo(mut engine: ConfirmationEngine) {
    for t in 0..15u64 {
        engine.process(&gesture(GestureLabel::Pointing, 0.88), t * 10);
    }
    let history = engine.history();
    assert_eq!(history.len(), 10);
    let times: Vec<u64> = history.iter().map(|e| e.timestamp_ms).collect();
    assert_eq!(times, (5..15u64).map(|t| t * 10).collect::<Vec<_>>());
}

#[rstest]
fn test_history_records_raw_outcomes(mut engine: ConfirmationEngine) {
    engine.process(
        &FrameOutcome::Invalid {
            reason: InvalidReason::BadCoordinates { index: 4 },
        },
        10,
    );
    engine.process(&gesture(GestureLabel::Unknown, 0.25), 20);

    let entries = engine.history().to_vec();
    assert_eq!(entries[0].label, INVALID_DATA_LABEL);
    assert_eq!(entries[0].confidence, 0.0);
    assert_eq!(entries[1].label, "Unknown Gesture");
    assert_eq!(entries[1].confidence, 0.25);
}

#[rstest]
fn test_reset_returns_to_idle(mut engine: ConfirmationEngine) {
    feed(
        &mut engine,
        &[
            (GestureLabel::Pointing, 0.88, 0),
            (GestureLabel::Pointing, 0.88, 100),
            (GestureLabel::Pointing, 0.88, 200),
        ],
    );
    engine.reset();

    let snap = engine.snapshot();
    assert!(snap.candidate.is_none());
    assert!(snap.last_change_ms.is_none());
    assert!(snap.history.is_empty());
    assert_eq!(engine.poll(250), DisplayState::Waiting);
    assert_eq!(engine.process(&FrameOutcome::NoHand, 300), DisplayState::Waiting);
}

#[test]
fn test_poll_does_not_touch_history() {
    let mut engine = ConfirmationEngine::default();
    engine.process(&gesture(GestureLabel::Pointing, 0.88), 0);
    engine.poll(100);
    engine.poll(200);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn test_single_sighting_config_confirms_immediately() {
    let config = EngineConfig {
        confirmation_count: 1,
        ..EngineConfig::default()
    };
    let mut engine = ConfirmationEngine::new(config);
    let s = engine.process(&gesture(GestureLabel::ThumbsUp, 0.93), 0);
    assert_eq!(s.confirmed(), Some(GestureLabel::ThumbsUp));
}

#[test]
fn test_custom_threshold_and_history() {
    let config = EngineConfig {
        detection_threshold: 0.9,
        history_size: 3,
        ..EngineConfig::default()
    };
    let mut engine = ConfirmationEngine::new(config);
    for t in 0..6u64 {
        engine.process(&gesture(GestureLabel::Pointing, 0.88), t);
    }
    assert!(engine.candidate().is_none());
    assert_eq!(engine.history().len(), 3);
}

#[test]
fn test_out_of_order_timestamps_do_not_panic() {
    let mut engine = ConfirmationEngine::default();
    engine.process(&gesture(GestureLabel::Pointing, 0.88), 1_000);
    let s = engine.process(&gesture(GestureLabel::Pointing, 0.88), 10);
    assert!(!s.is_confirmed());
    assert_eq!(engine.candidate().unwrap().count, 2);
}
