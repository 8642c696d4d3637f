use super::*;

#[test]
fn first_step_from_zero_is_epsilon() {
    assert_eq!(EaseOut::STANDARD.step(0.0), 0.02);
}

#[test]
fn step_is_clamped_to_one() {
    assert_eq!(EaseOut::STANDARD.step(0.99), 1.0);
    assert_eq!(EaseOut::STANDARD.step(1.0), 1.0);
}

#[test]
fn curves_are_monotonic_and_end_at_exactly_one() {
    for ease in [
        EaseOut::SNAPPY,
        EaseOut::STANDARD,
        EaseOut::GENTLE,
        EaseOut::new(3.0, 0.5).unwrap(),
        EaseOut::new(1000.0, 0.001).unwrap(),
    ] {
        let curve = ease.curve();
        assert!(!curve.is_empty());
        assert!(curve.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*curve.last().unwrap(), 1.0);
        assert!(curve[..curve.len() - 1].iter().all(|&p| p < 1.0));
    }
}

#[test]
fn settle_count_is_deterministic_and_orders_presets() {
    let snappy = EaseOut::SNAPPY.frames_to_settle();
    let standard = EaseOut::STANDARD.frames_to_settle();
    let gentle = EaseOut::GENTLE.frames_to_settle();
    assert_eq!(standard, EaseOut::STANDARD.frames_to_settle());
    assert!(snappy <= standard);
    assert!(standard <= gentle);
    // Worst case would be 1 / epsilon frames with no proportional term.
    assert!(gentle < 50);
}

#[test]
fn invalid_terms_are_rejected() {
    assert!(EaseOut::new(0.0, 0.02).is_err());
    assert!(EaseOut::new(8.0, 0.0).is_err());
    assert!(EaseOut::new(-1.0, 0.02).is_err());
    assert!(EaseOut::new(f64::NAN, 0.02).is_err());
    assert!(EaseOut::new(8.0, f64::INFINITY).is_err());
}

#[test]
fn default_is_gentle() {
    assert_eq!(EaseOut::default(), EaseOut::GENTLE);
}
