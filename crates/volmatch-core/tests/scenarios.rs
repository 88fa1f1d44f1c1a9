//! End-to-end registry scenarios through the public API.

use volmatch_core::{Event, MatchRejection, Node, Registry, Volunteer};

#[test]
fn duplicate_event_name_is_rejected() {
    let mut reg = Registry::new();
    assert_eq!(reg.add_event("Gala", "15", "2"), Ok(true));
    assert_eq!(reg.add_event("Gala", "16", "3"), Ok(false));

    let gala = reg.find_event("Gala").expect("first add kept");
    assert_eq!(gala.date().get(), 15);
    assert_eq!(gala.limit(), 2);
}

#[test]
fn duplicate_volunteer_name_is_rejected() {
    let mut reg = Registry::new();
    assert!(reg.add_volunteer("Ann", &["5", "10"]));
    let none: [&str; 0] = [];
    assert!(!reg.add_volunteer("Ann", &none));
    assert_eq!(reg.volunteers().len(), 1);
}

#[test]
fn capacity_limits_matches() {
    let mut reg = Registry::new();
    assert_eq!(reg.add_event("Gala", "15", "1"), Ok(true));
    assert!(reg.add_volunteer("Ann", &["15"]));
    assert!(reg.create_match("Gala", "Ann"));
    assert!(reg.add_volunteer("Bo", &["15"]));
    assert!(!reg.create_match("Gala", "Bo"));
    assert!(matches!(
        reg.try_create_match("Gala", "Bo"),
        Err(MatchRejection::AtCapacity { limit: 1, .. })
    ));
}

#[test]
fn volunteer_holds_one_event_per_date() {
    let mut reg = Registry::new();
    assert!(reg.add_volunteer("Cy", &["5"]));
    assert_eq!(reg.add_event("Fair", "5", "3"), Ok(true));
    assert_eq!(reg.add_event("Picnic", "5", "3"), Ok(true));
    assert!(reg.create_match("Fair", "Cy"));
    assert!(!reg.create_match("Picnic", "Cy"));

    let picnic = reg.find_event("Picnic").expect("exists");
    assert_eq!(picnic.matched_count(), 0);
}

#[test]
fn removing_event_unlinks_matched_volunteers() {
    let mut reg = Registry::new();
    assert_eq!(reg.add_event("Gala", "15", "2"), Ok(true));
    assert!(reg.add_volunteer("Ann", &["15"]));
    assert!(reg.create_match("Gala", "Ann"));

    assert!(reg.remove_event("Gala"));
    assert!(reg.find_event("Gala").is_none());
    let ann = reg.find_volunteer("Ann").expect("volunteer kept");
    assert!(!ann.has_event("Gala"));
    assert_eq!(reg.match_count(), 0);
}

#[test]
fn calendar_bounds_are_inclusive() {
    for d in 1..=30 {
        assert!(Event::new("E", d, 1).is_ok(), "event date {d}");
        assert!(Volunteer::new("V", &[d]).is_ok(), "volunteer date {d}");
    }
    for d in [0, 31] {
        assert!(Event::new("E", d, 1).is_err(), "event date {d}");
        assert!(Volunteer::new("V", &[d]).is_err(), "volunteer date {d}");
    }
}

#[test]
fn removed_match_can_be_recreated_elsewhere() {
    let mut reg = Registry::new();
    assert!(reg.add_volunteer("Mingi", &["1", "2", "23"]));
    assert!(reg.add_volunteer("Sonu", &["23"]));
    assert_eq!(reg.add_event("Birth Day", "23", "1"), Ok(true));
    assert_eq!(reg.add_event("Concert", "23", "1"), Ok(true));

    assert!(reg.create_match("birth day", "mingi"));
    assert!(reg.create_match("concert", "sonu"));
    assert!(!reg.create_match("concert", "mingi"));

    assert!(reg.remove_match("Concert", "Sonu"));
    assert!(reg.remove_match("Birth Day", "Mingi"));
    assert!(reg.create_match("Concert", "Mingi"));
    assert!(reg.create_match("Birth Day", "Sonu"));

    let names: Vec<&str> = reg
        .events()
        .iter()
        .flat_map(|e| reg.volunteers_of(e).map(Node::name))
        .collect();
    assert_eq!(names, ["Sonu", "Mingi"]);
}
