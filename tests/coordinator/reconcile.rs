use super::*;
use satvis::headless::SceneEvent;
use satvis::prelude::*;

#[rstest]
fn reload_is_idempotent(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;
    let fetcher = test_data();

    let first = coord
        .add_from_source(&fetcher, "tle/starlink.txt", &tags(&["Starlink"]))
        .unwrap();
    assert_eq!(first, vec![Reconciled::Added; 5]);
    let taglist = coord.taglist();

    let second = coord
        .add_from_source(&fetcher, "tle/starlink.txt", &tags(&["Starlink"]))
        .unwrap();
    assert_eq!(second, vec![Reconciled::Merged; 5]);
    assert_eq!(coord.satellites().len(), 5);
    assert_eq!(coord.taglist(), taglist);

    // Disjoint tags are merged into the same records
    coord
        .add_from_source(&fetcher, "tle/starlink.txt", &tags(&["Constellations"]))
        .unwrap();
    assert_eq!(coord.satellites().len(), 5);
    for sat in coord.satellites() {
        assert_eq!(
            sat.tags().iter().cloned().collect::<Vec<_>>(),
            tags(&["Constellations", "Starlink"])
        );
    }
    assert_eq!(handles.scene.borrow().entities_created, 5);
}

#[rstest]
fn bulk_load_merges_shared_satellites(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    let report = coord.add_from_sources(
        &test_data(),
        &[
            SourceConfig::new("tle/stations.txt", &["Stations"]),
            SourceConfig::new("tle/weather.txt", &["Weather"]),
        ],
    );

    assert_eq!(report.sources_loaded, 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.added, 5);
    assert_eq!(report.merged, 1);

    let iss = coord.get_satellite("ISS").unwrap();
    assert_eq!(iss.catalog_number, "25544");
    assert!(iss.has_tag("Stations") && iss.has_tag("Weather"));
    assert_eq!(coord.tags(), tags(&["Stations", "Weather"]));
    assert_eq!(
        coord.taglist()["Weather"],
        tags(&["ISS", "METEOSAT-11", "NOAA 19"])
    );
    assert_eq!(handles.store.borrow().projections(), 1);
}

#[rstest]
fn bulk_load_skips_failed_sources(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    let report = coord.add_from_sources(
        &test_data(),
        &[
            SourceConfig::new("tle/stations.txt", &["Stations"]),
            SourceConfig::new("tle/lost.txt", &["Lost"]),
            SourceConfig::new("tle/starlink.txt", &["Starlink"]),
        ],
    );

    assert_eq!(report.sources_loaded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].location(), "tle/lost.txt");
    assert_eq!(coord.satellites().len(), 8);
    assert!(coord.satellites_with_tag("Lost").is_empty());

    // The store is only updated once, after every source settled
    let store = handles.store.borrow();
    assert_eq!(store.projections(), 1);
    assert_eq!(
        store.latest().unwrap().available_tags,
        tags(&["Starlink", "Stations"])
    );
}

#[rstest]
fn incomplete_record_is_kept(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, _handles) = headless;
    let text = "ISS
1 25544U 98067A   24032.50000000  .00001234  00000-0  34518-4 0  9991
2 25544  51.6414 291.5521 0005015 157.3801 208.5555 15.50000000123450

BROKEN
1 4";

    let outcomes = coord.add_from_elements(text, &tags(&["demo"]));
    assert_eq!(outcomes, vec![Reconciled::Added, Reconciled::Added]);

    let broken = coord.get_satellite("BROKEN").unwrap();
    assert_eq!(broken.catalog_number, "");
    // Nothing to propagate, so only the label can be drawn
    assert_eq!(broken.entity.components(), vec![Component::Label]);
    assert_eq!(coord.components()[0], Component::Point);
}

#[rstest]
fn merge_with_enabled_tag_shows(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;
    let fetcher = test_data();

    coord.set_enabled_tags(["Favorites"]);
    coord
        .add_from_source(&fetcher, "tle/stations.txt", &tags(&["Stations"]))
        .unwrap();
    assert!(coord.visible_satellites().is_empty());

    handles.scene.borrow_mut().clear_journal();
    coord.add_from_elements(
        &fetcher.fetch("tle/weather.txt").unwrap(),
        &tags(&["Favorites"]),
    );

    assert_eq!(
        names_where(&coord, |sat| sat.entity.is_created()),
        tags(&["ISS", "METEOSAT-11", "NOAA 19"])
    );
    assert!(handles
        .scene
        .borrow()
        .journal
        .contains(&SceneEvent::Shown("ISS".to_string(), Component::DEFAULTS.to_vec())));
}

#[rstest]
fn pending_track_resolves_on_add(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    coord.set_tracked_satellite("STARLINK-1091");
    assert_eq!(coord.pending_tracked_satellite(), Some("STARLINK-1091"));
    assert_eq!(coord.tracked_satellite(), None);

    coord
        .add_from_source(&test_data(), "tle/starlink.txt", &tags(&["Starlink"]))
        .unwrap();

    assert_eq!(coord.pending_tracked_satellite(), None);
    assert_eq!(coord.tracked_satellite(), Some("STARLINK-1091"));
    assert_eq!(handles.scene.borrow().tracked(), Some("STARLINK-1091"));

    // Once the engine signal is delivered, the tracked satellite is shown even though none of its tags is enabled
    assert!(handles.deliver_signals(&mut coord));
    let sat = coord.get_satellite("STARLINK-1091").unwrap();
    assert!(sat.entity.is_created());
    assert_eq!(sat.entity.color(), Highlight::Focus);
    assert_eq!(
        handles.store.borrow().latest().unwrap().tracked_satellite,
        "STARLINK-1091"
    );
}
