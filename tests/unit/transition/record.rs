use super::*;

fn record() -> TransitionRecord<String> {
    TransitionRecord::new(
        "card.3",
        "small",
        Renderer::new(|v: &Presentation<'_>| v.effective_state.to_string()),
    )
}

fn small() -> Bounds {
    Bounds::new(100.0, 0.0, 240.0, 300.0)
}

fn large() -> Bounds {
    Bounds::new(20.0, 50.0, 500.0, 600.0)
}

fn ready_record() -> TransitionRecord<String> {
    let mut r = record();
    r.to_state = Some("large".to_string());
    r.departed = true;
    r.from_rect = Capture::taken(Some(small()), Vec2::ZERO);
    r.to_rect = Capture::taken(Some(large()), Vec2::ZERO);
    r
}

#[test]
fn fresh_record_is_idle_and_pending() {
    let r = record();
    assert_eq!(r.phase, Phase::Idle);
    assert_eq!(r.readiness(), Readiness::Pending);
    assert_eq!(r.from_state, "small");
    assert_eq!(r.to_state, None);
}

#[test]
fn readiness_needs_both_states_both_rects_and_departure() {
    let mut r = ready_record();
    assert_eq!(r.readiness(), Readiness::Ready);

    r.departed = false;
    assert_eq!(r.readiness(), Readiness::Pending);
    r.departed = true;

    r.to_rect = Capture::Pending;
    assert_eq!(r.readiness(), Readiness::Pending);

    r.to_rect = Capture::Unmeasurable;
    assert_eq!(r.readiness(), Readiness::Unmeasurable);

    let mut r = ready_record();
    r.to_state = None;
    assert_eq!(r.readiness(), Readiness::Pending);
}

#[test]
fn unmeasurable_departure_is_reported() {
    let mut r = ready_record();
    r.from_rect = Capture::Unmeasurable;
    assert_eq!(r.readiness(), Readiness::Unmeasurable);
}

#[test]
fn arm_applies_scroll_delta_to_both_sides() {
    let mut r = record();
    r.to_state = Some("large".to_string());
    r.departed = true;
    r.from_rect = Capture::taken(Some(small()), Vec2::new(0.0, 0.0));
    r.to_rect = Capture::taken(Some(large()), Vec2::new(0.0, 40.0));

    r.arm(Vec2::new(0.0, 40.0), true);
    assert_eq!(r.phase, Phase::Armed);
    assert!(r.first_run);
    assert_eq!(r.start_rect, Some(Bounds::new(60.0, 0.0, 240.0, 300.0)));
    assert_eq!(r.target_rect, Some(large()));
    assert_eq!(r.moving_rect, r.start_rect);
}

#[test]
fn arm_without_correction_uses_captures_verbatim() {
    let mut r = ready_record();
    r.from_rect = Capture::taken(Some(small()), Vec2::new(0.0, 500.0));
    r.arm(Vec2::ZERO, false);
    assert_eq!(r.start_rect, Some(small()));
}

#[test]
fn step_interpolates_from_fixed_start() {
    let mut r = ready_record();
    r.arm(Vec2::ZERO, true);
    let ease = EaseOut::STANDARD;

    assert!(!r.step(&ease));
    assert_eq!(r.progress, 0.02);
    let m = r.moving_rect.unwrap();
    assert!((m.top - 98.4).abs() < 1e-9);

    while !r.step(&ease) {}
    assert_eq!(r.progress, 1.0);
    assert_eq!(r.moving_rect, Some(large()));
}

#[test]
fn settle_returns_to_idle_at_arrival_state() {
    let mut r = ready_record();
    let completion = r.completion_handle(None);
    assert!(r.completion_handle(None).same_cycle(&completion));
    r.arm(Vec2::ZERO, true);
    while !r.step(&EaseOut::SNAPPY) {}

    let resolved = r.settle();
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].same_cycle(&completion));

    let s = r.snapshot();
    assert_eq!(s.from_state, "large");
    assert_eq!(s.to_state, None);
    assert_eq!(s.from_rect, Some(large()));
    assert_eq!(s.to_rect, None);
    assert_eq!(s.moving_rect, None);
    assert_eq!(s.phase, Phase::Idle);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.cycles, 1);
    assert!(!r.departed);
}

#[test]
fn withdraw_clears_arrival_only() {
    let mut r = ready_record();
    let _ = r.completion_handle(None);
    let _ = r.completion_handle(Some(Completion::new()));
    assert_eq!(r.withdraw_arrival().len(), 2);
    assert_eq!(r.to_state, None);
    assert_eq!(r.to_rect, Capture::Pending);
    assert_eq!(r.from_rect.bounds(), Some(small()));
}

#[test]
fn overlay_content_follows_first_run() {
    let mut r = ready_record();
    r.arm(Vec2::ZERO, true);
    assert_eq!(r.overlay_content().as_deref(), Some("small"));
    r.first_run = false;
    assert_eq!(r.overlay_content().as_deref(), Some("large"));
}
