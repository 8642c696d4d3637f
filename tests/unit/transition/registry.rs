use super::*;
use crate::slot::render::Presentation;
use crate::transition::record::Phase;

fn renderer() -> Renderer<()> {
    Renderer::new(|_: &Presentation<'_>| ())
}

#[test]
fn get_or_create_reuses_existing_record() {
    let mut reg = TransitionRegistry::new();
    let r = renderer();

    let (rec, created) = reg.get_or_create("card.1", "small", &r);
    assert!(created);
    assert_eq!(rec.from_state, "small");

    let (rec, created) = reg.get_or_create("card.1", "large", &r);
    assert!(!created);
    // Creation state is not overwritten by a lookup.
    assert_eq!(rec.from_state, "small");
    assert_eq!(reg.len(), 1);
}

#[test]
fn unknown_names_are_absent() {
    let reg = TransitionRegistry::<()>::new();
    assert!(reg.get("nope").is_none());
    assert_eq!(reg.len(), 0);
}

#[test]
fn iteration_is_insertion_ordered() {
    let mut reg = TransitionRegistry::new();
    let r = renderer();
    for name in ["c", "a", "b"] {
        reg.get_or_create(name, "s", &r);
    }
    let names: Vec<_> = reg.iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn running_filters_by_phase() {
    let mut reg = TransitionRegistry::new();
    let r = renderer();
    reg.get_or_create("a", "s", &r);
    reg.get_or_create("b", "s", &r);
    reg.get_mut("b").unwrap().phase = Phase::Running;

    let running: Vec<_> = reg.running().map(|r| r.name.clone()).collect();
    assert_eq!(running, vec!["b"]);
    assert_eq!(reg.running_mut().count(), 1);
}
