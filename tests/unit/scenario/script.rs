use super::*;
use crate::animation::ease::EaseOut;
use crate::transition::record::Phase;
use serde_json::json;

fn rect(top: f64, left: f64, width: f64, height: f64) -> serde_json::Value {
    json!({ "top": top, "left": left, "width": width, "height": height })
}

fn small() -> serde_json::Value {
    rect(100.0, 0.0, 240.0, 300.0)
}

fn large() -> serde_json::Value {
    rect(20.0, 50.0, 500.0, 600.0)
}

fn measured(op: &str, state: &str, rect: serde_json::Value) -> serde_json::Value {
    json!({ "op": op, "name": "card.3", "state": state, "rect": rect })
}

fn card_steps() -> Vec<serde_json::Value> {
    vec![
        json!({ "op": "mount", "name": "card.3", "state": "small" }),
        measured("start", "small", small()),
        measured("unmount", "small", small()),
        json!({ "op": "mount", "name": "card.3", "state": "large" }),
        measured("start", "large", large()),
    ]
}

fn script(steps: Vec<serde_json::Value>) -> Script {
    Script::from_json_str(&json!({ "steps": steps }).to_string()).unwrap()
}

fn standard() -> BrokerOpts {
    BrokerOpts {
        easing: EaseOut::STANDARD,
        ..BrokerOpts::default()
    }
}

#[test]
fn card_script_plays_to_completion() {
    let playback = script(card_steps()).play(standard()).unwrap();

    assert!(playback.stats.settled);
    assert_eq!(playback.stats.frames, EaseOut::STANDARD.frames_to_settle());

    match &playback.events[0] {
        OverlayEvent::Mounted {
            bounds, content, ..
        } => {
            assert_eq!(*bounds, Bounds::new(100.0, 0.0, 240.0, 300.0));
            assert_eq!(content, "card.3:small");
        }
        other => panic!("expected mount, got {other:?}"),
    }
    match &playback.events[1] {
        OverlayEvent::Updated { bounds, .. } => assert!((bounds.top - 98.4).abs() < 1e-9),
        other => panic!("expected update, got {other:?}"),
    }
    match &playback.events[2] {
        OverlayEvent::ContentReplaced { content, .. } => assert_eq!(content, "card.3:large"),
        other => panic!("expected content swap, got {other:?}"),
    }
    assert!(matches!(
        playback.events.last(),
        Some(OverlayEvent::Unmounted { .. })
    ));

    let record = &playback.records[0];
    assert_eq!(record.from_state, "large");
    assert_eq!(record.phase, Phase::Idle);
    assert_eq!(record.cycles, 1);

    assert_eq!(playback.starts.len(), 2);
    assert_eq!(playback.starts[0].outcome, None);
    assert_eq!(playback.starts[1].step, 4);
    assert_eq!(playback.starts[1].outcome, Some(Outcome::Animated));
}

#[test]
fn reverse_navigation_mid_flight_runs_second_cycle() {
    let mut steps = card_steps();
    steps.push(json!({ "op": "frames", "count": 3 }));
    steps.push(measured("unmount", "large", large()));
    steps.push(json!({ "op": "mount", "name": "card.3", "state": "small" }));
    steps.push(measured("start", "small", small()));

    let playback = script(steps).play(standard()).unwrap();
    assert!(playback.stats.settled);
    assert_eq!(
        playback.stats.frames,
        2 * EaseOut::STANDARD.frames_to_settle()
    );

    let record = &playback.records[0];
    assert_eq!(record.from_state, "small");
    assert_eq!(record.cycles, 2);
    assert!(
        playback
            .starts
            .iter()
            .skip(1)
            .all(|s| s.outcome == Some(Outcome::Animated))
    );
}

#[test]
fn unmeasured_arrival_is_skipped_without_overlay() {
    let mut steps = card_steps();
    steps[4] = json!({ "op": "start", "name": "card.3", "state": "large" });

    let playback = script(steps).play(standard()).unwrap();
    assert!(playback.events.is_empty());
    assert_eq!(playback.stats.frames, 0);
    assert_eq!(playback.starts[1].outcome, Some(Outcome::Skipped));
    assert_eq!(playback.records[0].from_state, "large");
}

#[test]
fn scroll_step_shifts_departing_rect() {
    let mut steps = card_steps();
    steps.insert(3, json!({ "op": "scroll", "x": 0.0, "y": 40.0 }));

    let playback = script(steps).play(standard()).unwrap();
    match &playback.events[0] {
        OverlayEvent::Mounted { bounds, .. } => {
            assert_eq!(*bounds, Bounds::new(60.0, 0.0, 240.0, 300.0));
        }
        other => panic!("expected mount, got {other:?}"),
    }
}

#[test]
fn frame_budget_is_reported() {
    let raw = json!({ "steps": card_steps(), "max_frames": 2 }).to_string();
    let playback = Script::from_json_str(&raw).unwrap().play(standard()).unwrap();
    assert!(!playback.stats.settled);
    assert_eq!(playback.stats.frames, 2);
    assert_eq!(playback.starts[1].outcome, None);
    assert_eq!(playback.records[0].phase, Phase::Running);
}

#[test]
fn unknown_ops_are_serde_errors() {
    let raw = json!({ "steps": [{ "op": "teleport", "name": "a", "state": "b" }] }).to_string();
    let err = Script::from_json_str(&raw).err().unwrap();
    assert!(matches!(err, SegueError::Serde(_)));
}

#[test]
fn empty_names_are_rejected() {
    let raw = json!({ "steps": [{ "op": "mount", "name": "", "state": "b" }] }).to_string();
    let err = Script::from_json_str(&raw).err().unwrap();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn missing_script_file_carries_path_context() {
    let err = Script::from_path("/definitely/not/here.json").err().unwrap();
    assert!(err.to_string().contains("read script"));
}
