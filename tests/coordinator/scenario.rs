use super::*;
use satvis::prelude::*;
use std::path::PathBuf;

const ISS: &str = "ISS
1 25544U 98067A   24032.50000000  .00001234  00000-0  34518-4 0  9991
2 25544  51.6414 291.5521 0005015 157.3801 208.5555 15.50000000123450
";

#[rstest]
fn iss_end_to_end(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    coord.add_from_elements(ISS, &tags(&["demo"]));
    coord.set_enabled_tags(["demo"]);

    let iss = coord.get_satellite("ISS").unwrap();
    assert!(coord.is_active(iss));
    assert!(iss.entity.is_created());
    assert_eq!(iss.entity.shown_components(), vec![Component::Point, Component::Label]);

    coord.set_tracked_satellite("ISS");
    assert!(handles.deliver_signals(&mut coord));
    assert_eq!(handles.store.borrow().latest().unwrap().tracked_satellite, "ISS");
    assert!(coord.highlight_timer().is_some());

    // Disabling the tag releases the visuals, and the engine drops its camera lock on the entity it no longer draws
    coord.set_enabled_tags(Vec::<String>::new());
    assert!(!coord.get_satellite("ISS").unwrap().entity.is_created());
    assert_eq!(handles.scene.borrow().tracked(), None);

    // The coordinator only reacts once the engine signal is delivered
    assert!(coord.highlight_timer().is_some());
    assert!(handles.deliver_signals(&mut coord));
    assert_eq!(coord.highlight_timer(), None);
    assert_eq!(handles.store.borrow().latest().unwrap().tracked_satellite, "");
}

#[rstest]
fn tracking_survives_while_enabled_by_name(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    coord.add_from_elements(ISS, &tags(&["demo"]));
    coord.set_enabled_tags(["demo"]);
    coord.set_enabled_satellites(["ISS"]);
    coord.set_tracked_satellite("ISS");
    handles.deliver_signals(&mut coord);

    coord.set_enabled_tags(Vec::<String>::new());
    assert!(!handles.deliver_signals(&mut coord));
    assert_eq!(coord.tracked_satellite(), Some("ISS"));
    assert_eq!(handles.store.borrow().latest().unwrap().tracked_satellite, "ISS");
}

#[rstest]
fn bootstrap_from_configuration(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    let cfg_path: PathBuf = [
        env!("CARGO_MANIFEST_DIR"),
        "data",
        "tests",
        "config",
        "satvis.yaml",
    ]
    .iter()
    .collect();
    let cfg = CoordinatorConfig::load(cfg_path).unwrap();

    let report = coord.bootstrap(&test_data(), &cfg);
    assert_eq!(report.sources_loaded, 3);
    assert!(report.failures.is_empty());
    assert_eq!(report.added, 10);
    assert_eq!(report.merged, 1);

    // The tracking request was fulfilled while loading
    assert_eq!(coord.pending_tracked_satellite(), None);
    assert!(handles.deliver_signals(&mut coord));
    assert_eq!(coord.tracked_satellite(), Some("STARLINK-1109"));

    assert_eq!(
        coord.enabled_components(),
        vec![Component::Point, Component::Label, Component::OrbitTrack]
    );
    assert_eq!(
        names_where(&coord, |sat| sat.entity.is_created()),
        tags(&[
            "ISS",
            "STARLINK-1066",
            "STARLINK-1084",
            "STARLINK-1091",
            "STARLINK-1109",
            "STARLINK-1174"
        ])
    );

    // 10:03, inside the first window with STARLINK-1091
    let colors: Vec<(String, Highlight)> = coord
        .active_satellites()
        .iter()
        .map(|sat| (sat.name.clone(), sat.entity.color()))
        .collect();
    assert!(colors.contains(&("STARLINK-1109".to_string(), Highlight::Focus)));
    assert!(colors.contains(&("STARLINK-1091".to_string(), Highlight::Visible)));
    assert!(colors.contains(&("STARLINK-1084".to_string(), Highlight::Neutral)));
    assert!(colors.contains(&("ISS".to_string(), Highlight::Neutral)));

    assert_eq!(coord.highlight_period(), 2.seconds());
    let timer = coord.highlight_timer().unwrap();
    assert_eq!(handles.timers.borrow().period(timer), Some(2.seconds()));

    let iss = coord.get_satellite("ISS").unwrap();
    assert_eq!(
        iss.tags().iter().cloned().collect::<Vec<_>>(),
        tags(&["Stations", "Weather", "demo"])
    );
    assert_eq!(iss.entity.ground_station().unwrap().height_m, 0.0);

    let snapshot = handles.store.borrow().latest().cloned().unwrap();
    assert_eq!(
        snapshot.available_tags,
        tags(&["Starlink", "Stations", "Weather", "demo"])
    );
    assert_eq!(snapshot.tracked_satellite, "STARLINK-1109");
    assert_eq!(snapshot.enabled_tags, tags(&["Starlink"]));
    assert_eq!(snapshot.enabled_satellites, tags(&["ISS"]));
    assert_eq!(snapshot.ground_station, Some([48.8566, 2.3522]));
    // Ground station, bulk load, tracking
    assert_eq!(handles.store.borrow().projections(), 3);
}

#[rstest]
fn bootstrap_survives_missing_visibility(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    let cfg = CoordinatorConfig::builder()
        .enabled_tags(tags(&["Starlink"]))
        .sources(vec![SourceConfig::new("tle/starlink.txt", &["Starlink"])])
        .visibility("visibility/lost.json".to_string())
        .tracked_satellite("STARLINK-1109".to_string())
        .build();

    let report = coord.bootstrap(&test_data(), &cfg);
    assert_eq!(report.added, 5);
    assert!(coord.visibility().is_empty());

    handles.deliver_signals(&mut coord);
    assert_eq!(coord.tracked_satellite(), Some("STARLINK-1109"));
    for sat in coord.active_satellites() {
        let expected = if sat.name == "STARLINK-1109" {
            Highlight::Focus
        } else {
            Highlight::Neutral
        };
        assert_eq!(sat.entity.color(), expected);
    }
}

#[rstest]
fn bootstrap_over_loaded_collection(headless: (HeadlessCoordinator, HeadlessHandles)) {
    let (mut coord, handles) = headless;

    coord.add_from_elements(ISS, &tags(&["demo"]));
    coord.set_enabled_tags(["demo"]);
    assert!(coord.get_satellite("ISS").unwrap().entity.is_created());

    // The default configuration enables nothing, so ISS is released
    let report = coord.bootstrap(&test_data(), &CoordinatorConfig::default());
    assert_eq!(report.sources_loaded, 0);

    let iss = coord.get_satellite("ISS").unwrap();
    assert!(!coord.is_active(iss));
    assert!(!iss.entity.is_created());
    assert!(handles.scene.borrow().cleanups >= 1);

    // And a configuration enabling it by name realizes it again
    let cfg = CoordinatorConfig::builder()
        .enabled_satellites(tags(&["ISS"]))
        .build();
    coord.bootstrap(&test_data(), &cfg);
    for sat in coord.satellites() {
        assert_eq!(coord.is_active(sat), sat.entity.is_created(), "{}", sat.name);
    }
    assert!(coord.get_satellite("ISS").unwrap().entity.is_created());
}
