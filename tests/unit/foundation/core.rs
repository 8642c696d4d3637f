use super::*;

#[test]
fn derived_edges_follow_channels() {
    let b = Bounds::new(100.0, 10.0, 240.0, 300.0);
    assert_eq!(b.right, 250.0);
    assert_eq!(b.bottom, 400.0);
}

#[test]
fn kurbo_rect_conversion_keeps_geometry() {
    let b = Bounds::from_rect(Rect::new(50.0, 20.0, 550.0, 620.0));
    assert_eq!(b, Bounds::new(20.0, 50.0, 500.0, 600.0));
    assert_eq!(b.to_rect(), Rect::new(50.0, 20.0, 550.0, 620.0));

    // Flipped rectangles are normalized.
    let flipped = Bounds::from_rect(Rect::new(550.0, 620.0, 50.0, 20.0));
    assert_eq!(flipped, b);
}

#[test]
fn translate_moves_origin_only() {
    let b = Bounds::new(100.0, 0.0, 240.0, 300.0).translate(Vec2::new(5.0, -40.0));
    assert_eq!(b, Bounds::new(60.0, 5.0, 240.0, 300.0));
}

#[test]
fn degenerate_detects_unlaid_nodes() {
    assert!(Bounds::ZERO.is_degenerate());
    assert!(Bounds::new(10.0, 10.0, 0.0, 40.0).is_degenerate());
    assert!(!Bounds::new(10.0, 10.0, 1.0, 1.0).is_degenerate());
}

#[test]
fn deserialize_recomputes_derived_edges() {
    let b: Bounds = serde_json::from_value(serde_json::json!({
        "top": 20.0, "left": 50.0, "width": 500.0, "height": 600.0, "right": 1.0
    }))
    .unwrap();
    assert_eq!(b.right, 550.0);
    assert_eq!(b.bottom, 620.0);
}
