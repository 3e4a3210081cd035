use super::*;
use satvis::headless::SceneEvent;
use satvis::prelude::*;

/// Starlink satellites enabled, with the visibility dataset loaded.
#[fixture]
fn constellation(
    headless: (HeadlessCoordinator, HeadlessHandles),
) -> (HeadlessCoordinator, HeadlessHandles) {
    let (mut coord, handles) = headless;
    let fetcher = test_data();
    coord
        .load_visibility(&fetcher, "visibility/starlink.json")
        .unwrap();
    coord
        .add_from_source(&fetcher, "tle/starlink.txt", &tags(&["Starlink"]))
        .unwrap();
    coord.set_enabled_tags(["Starlink"]);
    (coord, handles)
}

fn color_of(coord: &HeadlessCoordinator, name: &str) -> Highlight {
    coord.get_satellite(name).unwrap().entity.color()
}

#[rstest]
#[case::first_window(feb_first(10, 3, 0), Highlight::Visible, Highlight::Neutral)]
#[case::window_start(feb_first(10, 0, 0), Highlight::Visible, Highlight::Neutral)]
#[case::window_end(feb_first(10, 5, 0), Highlight::Visible, Highlight::Visible)]
#[case::between_windows(feb_first(10, 7, 0), Highlight::Neutral, Highlight::Visible)]
#[case::second_window(feb_first(10, 11, 0), Highlight::Visible, Highlight::Visible)]
#[case::after_windows(feb_first(10, 13, 0), Highlight::Neutral, Highlight::Visible)]
#[case::out_of_view(feb_first(10, 30, 0), Highlight::Neutral, Highlight::Neutral)]
fn highlight_follows_clock(
    constellation: (HeadlessCoordinator, HeadlessHandles),
    #[case] epoch: Epoch,
    #[case] expect_1091: Highlight,
    #[case] expect_1084: Highlight,
) {
    let (mut coord, handles) = constellation;
    handles.clock.set(epoch);

    coord.set_tracked_satellite("STARLINK-1109");
    assert!(handles.deliver_signals(&mut coord));

    assert_eq!(color_of(&coord, "STARLINK-1109"), Highlight::Focus);
    assert_eq!(color_of(&coord, "STARLINK-1091"), expect_1091);
    assert_eq!(color_of(&coord, "STARLINK-1084"), expect_1084);
    assert_eq!(color_of(&coord, "STARLINK-1174"), Highlight::Neutral);
    assert_eq!(color_of(&coord, "STARLINK-1066"), Highlight::Neutral);
}

#[rstest]
fn timer_recomputes_highlight(constellation: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = constellation;

    coord.set_tracked_satellite("STARLINK-1109");
    handles.deliver_signals(&mut coord);
    assert_eq!(color_of(&coord, "STARLINK-1091"), Highlight::Visible);

    handles.clock.advance(4.minutes());
    handles.fire_timers(&mut coord);
    assert_eq!(color_of(&coord, "STARLINK-1091"), Highlight::Neutral);
    assert_eq!(color_of(&coord, "STARLINK-1084"), Highlight::Visible);

    handles.clock.advance(4.minutes());
    handles.fire_timers(&mut coord);
    assert_eq!(color_of(&coord, "STARLINK-1091"), Highlight::Visible);
    assert_eq!(color_of(&coord, "STARLINK-1109"), Highlight::Focus);
}

#[rstest]
fn single_highlight_timer(constellation: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = constellation;

    coord.set_tracked_satellite("STARLINK-1109");
    handles.deliver_signals(&mut coord);
    let first = coord.highlight_timer().unwrap();
    assert_eq!(handles.timers.borrow().live(), vec![first]);
    assert_eq!(handles.timers.borrow().period(first), Some(1.seconds()));

    // Switching to another satellite without clearing in between
    coord.set_tracked_satellite("STARLINK-1091");
    handles.deliver_signals(&mut coord);
    let second = coord.highlight_timer().unwrap();
    assert_ne!(first, second);
    assert_eq!(handles.timers.borrow().live(), vec![second]);
    assert_eq!(handles.timers.borrow().cancelled, 1);

    // Fires of the replaced timer are ignored
    handles.scene.borrow_mut().clear_journal();
    coord.on_timer(first);
    assert!(handles.scene.borrow().journal.is_empty());

    coord.set_highlight_period(5.seconds());
    let third = coord.highlight_timer().unwrap();
    assert_eq!(handles.timers.borrow().live(), vec![third]);
    assert_eq!(handles.timers.borrow().period(third), Some(5.seconds()));

    coord.set_tracked_satellite("");
    assert!(handles.deliver_signals(&mut coord));
    assert_eq!(coord.highlight_timer(), None);
    assert_eq!(handles.timers.borrow().live_count(), 0);
    for sat in coord.active_satellites() {
        assert_eq!(sat.entity.color(), Highlight::Neutral);
    }
    assert_eq!(handles.store.borrow().latest().unwrap().tracked_satellite, "");
}

#[rstest]
fn tracking_requests(constellation: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = constellation;

    coord.set_tracked_satellite("STARLINK-1109");
    assert!(handles.deliver_signals(&mut coord));

    // Same name again: no request to the engine
    handles.scene.borrow_mut().clear_journal();
    coord.set_tracked_satellite("STARLINK-1109");
    assert!(!handles.deliver_signals(&mut coord));
    assert!(handles.scene.borrow().journal.is_empty());

    // Unknown name: pending, the current tracking is left alone
    coord.set_tracked_satellite("ISS");
    assert_eq!(coord.pending_tracked_satellite(), Some("ISS"));
    assert_eq!(coord.tracked_satellite(), Some("STARLINK-1109"));

    // Empty name: pending request dropped and tracking cleared
    coord.set_tracked_satellite("");
    assert_eq!(coord.pending_tracked_satellite(), None);
    assert!(handles.deliver_signals(&mut coord));
    assert_eq!(coord.tracked_satellite(), None);
    assert_eq!(
        handles.scene.borrow().journal.last(),
        Some(&SceneEvent::Colored("STARLINK-1066".to_string(), Highlight::Neutral))
    );

    // Nothing tracked and nothing pending: nothing to do
    handles.scene.borrow_mut().clear_journal();
    coord.set_tracked_satellite("");
    assert!(!handles.deliver_signals(&mut coord));
    assert!(handles.scene.borrow().journal.is_empty());
}

#[rstest]
fn engine_side_selection(constellation: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = constellation;

    // The user clicks on a satellite in the engine
    assert!(handles.scene.borrow_mut().track("STARLINK-1084"));
    assert!(handles.scene.borrow_mut().select("STARLINK-1084"));
    handles.deliver_signals(&mut coord);

    assert_eq!(coord.tracked_satellite(), Some("STARLINK-1084"));
    assert_eq!(coord.selected_satellite(), Some("STARLINK-1084"));
    // No visibility data for this one: only the focus is highlighted
    assert_eq!(color_of(&coord, "STARLINK-1084"), Highlight::Focus);
    for name in ["STARLINK-1066", "STARLINK-1091", "STARLINK-1109", "STARLINK-1174"] {
        assert_eq!(color_of(&coord, name), Highlight::Neutral);
    }
    assert!(coord.highlight_timer().is_some());
}

#[rstest]
fn mark_visible_is_deterministic(constellation: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = constellation;

    coord.mark_visible_satellites("STARLINK-1091");
    let first = coord
        .satellites()
        .iter()
        .map(|sat| sat.entity.color())
        .collect::<Vec<_>>();

    handles.scene.borrow_mut().clear_journal();
    coord.mark_visible_satellites("STARLINK-1091");
    let second = coord
        .satellites()
        .iter()
        .map(|sat| sat.entity.color())
        .collect::<Vec<_>>();

    assert_eq!(first, second);
    assert_eq!(color_of(&coord, "STARLINK-1091"), Highlight::Focus);
    assert_eq!(color_of(&coord, "STARLINK-1109"), Highlight::Visible);
    // Highlighting never creates nor releases visuals
    assert!(handles.scene.borrow().events(SceneEvent::is_visual).is_empty());
}

#[rstest]
fn focus_cleared_on_inactive_satellite(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;
    let fetcher = test_data();
    coord
        .load_visibility(&fetcher, "visibility/starlink.json")
        .unwrap();
    coord
        .add_from_source(&fetcher, "tle/starlink.txt", &tags(&["Starlink"]))
        .unwrap();
    coord.set_enabled_satellites(["STARLINK-1109"]);

    // Tracking an inactive satellite realizes it with the focus color
    coord.set_tracked_satellite("STARLINK-1066");
    handles.deliver_signals(&mut coord);
    let sat = coord.get_satellite("STARLINK-1066").unwrap();
    assert!(!coord.is_active(sat));
    assert!(sat.entity.is_created());
    assert_eq!(sat.entity.color(), Highlight::Focus);

    coord.set_tracked_satellite("STARLINK-1109");
    handles.deliver_signals(&mut coord);
    assert_eq!(color_of(&coord, "STARLINK-1066"), Highlight::Neutral);
    assert_eq!(color_of(&coord, "STARLINK-1109"), Highlight::Focus);

    coord.set_tracked_satellite("");
    handles.deliver_signals(&mut coord);
    for sat in coord.visible_satellites() {
        assert_eq!(sat.entity.color(), Highlight::Neutral, "{}", sat.name);
    }
    assert_eq!(color_of(&coord, "STARLINK-1066"), Highlight::Neutral);
}
