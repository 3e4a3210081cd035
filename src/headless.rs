/*
    Satvis, satellite collection coordination
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! An in-memory rendering engine, simulation clock, timer service and store.
//!
//! The scene journals every call it receives, which makes it usable both from the command line and to check exactly
//! what a coordinator asked of its engine.

use crate::coordinator::{Coordinator, StateSink, StoreSnapshot};
use crate::cosmic::GroundStation;
use crate::io::elements::ElementSet;
use crate::time::{Duration, Epoch};
use crate::viewer::{
    ClockSource, Component, Highlight, IntervalTimer, SatelliteEntity, TimerHandle, Viewer,
};
use indexmap::{IndexMap, IndexSet};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One call received by the scene.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    Created(String),
    Shown(String, Vec<Component>),
    Hidden(String),
    Enabled(String, Component),
    Disabled(String, Component),
    Colored(String, Highlight),
    Tracked(String),
    TrackingCleared,
    CleanedUp,
    StationPlaced(GroundStation),
    StationRemoved,
    StationTracked,
    PassesNotified(String),
    PassTimersCleared(String),
}

impl SceneEvent {
    /// Whether this event created or released visuals, or changed the components of an entity.
    pub fn is_visual(&self) -> bool {
        matches!(
            self,
            Self::Shown(..) | Self::Hidden(_) | Self::Enabled(..) | Self::Disabled(..)
        )
    }
}

/// Engine-side state shared by the viewer and its entities.
#[derive(Debug, Default)]
pub struct Scene {
    pub journal: Vec<SceneEvent>,
    pub entities_created: usize,
    pub cleanups: usize,
    /// Entity names, indexed by entity id
    names: Vec<String>,
    tracked: Option<usize>,
    selected: Option<usize>,
    station: Option<GroundStation>,
    station_tracked: bool,
    tracked_changed: bool,
}

impl Scene {
    /// Name of the tracked entity, if any.
    pub fn tracked(&self) -> Option<&str> {
        self.tracked.map(|id| self.names[id].as_str())
    }

    /// Name of the selected entity, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|id| self.names[id].as_str())
    }

    /// Follows the first entity with this name, as a user click on it would. Returns false if there is none.
    pub fn track(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(id) => {
                self.set_tracked(Some(id));
                true
            }
            None => false,
        }
    }

    /// Stops following anything, as a user would.
    pub fn untrack(&mut self) {
        self.set_tracked(None);
    }

    pub fn select(&mut self, name: &str) -> bool {
        self.selected = self.names.iter().position(|n| n == name);
        self.selected.is_some()
    }

    pub fn station(&self) -> Option<&GroundStation> {
        self.station.as_ref()
    }

    pub fn station_tracked(&self) -> bool {
        self.station_tracked
    }

    /// Returns whether the tracked entity changed since the last call, and resets that flag.
    pub fn take_tracked_changed(&mut self) -> bool {
        std::mem::take(&mut self.tracked_changed)
    }

    /// Events of the journal matching the predicate.
    pub fn events<P: Fn(&SceneEvent) -> bool>(&self, predicate: P) -> Vec<SceneEvent> {
        self.journal
            .iter()
            .filter(|event| predicate(event))
            .cloned()
            .collect()
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn set_tracked(&mut self, id: Option<usize>) {
        if self.tracked != id {
            self.tracked = id;
            self.tracked_changed = true;
            self.station_tracked = false;
            match id {
                Some(id) => self.journal.push(SceneEvent::Tracked(self.names[id].clone())),
                None => self.journal.push(SceneEvent::TrackingCleared),
            }
        }
    }
}

pub type SharedScene = Rc<RefCell<Scene>>;

/// Entity of the in-memory scene.
#[derive(Debug)]
pub struct HeadlessEntity {
    id: usize,
    name: String,
    scene: SharedScene,
    drawable: Vec<Component>,
    created: bool,
    shown: IndexSet<Component>,
    color: Highlight,
    ground_station: Option<GroundStation>,
    monitored: bool,
}

impl HeadlessEntity {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Highlight {
        self.color
    }

    /// Components currently realized, empty when not created.
    pub fn shown_components(&self) -> Vec<Component> {
        self.shown.iter().copied().collect()
    }

    pub fn ground_station(&self) -> Option<&GroundStation> {
        self.ground_station.as_ref()
    }

    fn log(&self, event: SceneEvent) {
        self.scene.borrow_mut().journal.push(event);
    }
}

impl SatelliteEntity for HeadlessEntity {
    fn show(&mut self, components: &[Component]) {
        self.created = true;
        self.shown = components.iter().copied().collect();
        self.log(SceneEvent::Shown(self.name.clone(), components.to_vec()));
    }

    fn hide(&mut self) {
        self.created = false;
        self.shown.clear();
        self.log(SceneEvent::Hidden(self.name.clone()));

        // The engine drops the camera lock of an entity which is no longer drawn
        let mut scene = self.scene.borrow_mut();
        if scene.tracked == Some(self.id) {
            scene.set_tracked(None);
        }
        if scene.selected == Some(self.id) {
            scene.selected = None;
        }
    }

    fn enable_component(&mut self, component: Component) {
        if self.created {
            self.shown.insert(component);
        }
        self.log(SceneEvent::Enabled(self.name.clone(), component));
    }

    fn disable_component(&mut self, component: Component) {
        self.shown.shift_remove(&component);
        self.log(SceneEvent::Disabled(self.name.clone(), component));
    }

    fn components(&self) -> Vec<Component> {
        self.drawable.clone()
    }

    fn change_color(&mut self, highlight: Highlight) {
        self.color = highlight;
        self.log(SceneEvent::Colored(self.name.clone(), highlight));
    }

    fn is_created(&self) -> bool {
        self.created
    }

    fn is_tracked(&self) -> bool {
        self.scene.borrow().tracked == Some(self.id)
    }

    fn is_selected(&self) -> bool {
        self.scene.borrow().selected == Some(self.id)
    }

    fn track(&mut self) {
        self.scene.borrow_mut().set_tracked(Some(self.id));
    }

    fn set_ground_station(&mut self, station: &GroundStation) {
        self.ground_station = Some(station.clone());
    }

    fn notify_passes(&mut self) {
        self.monitored = true;
        self.log(SceneEvent::PassesNotified(self.name.clone()));
    }

    fn clear_pass_timers(&mut self) {
        if self.monitored {
            self.monitored = false;
            self.log(SceneEvent::PassTimersCleared(self.name.clone()));
        }
    }

    fn is_monitored(&self) -> bool {
        self.monitored
    }
}

/// Viewer of the in-memory scene.
#[derive(Debug, Default)]
pub struct HeadlessViewer {
    scene: SharedScene,
}

impl HeadlessViewer {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> SharedScene {
        Rc::clone(&self.scene)
    }
}

impl Viewer for HeadlessViewer {
    type Entity = HeadlessEntity;

    fn create_entity(&mut self, elements: &ElementSet) -> HeadlessEntity {
        let mut scene = self.scene.borrow_mut();
        let id = scene.names.len();
        scene.names.push(elements.name.clone());
        scene.entities_created += 1;
        scene.journal.push(SceneEvent::Created(elements.name.clone()));

        // Without usable elements there is no position, hence nothing to draw but the label
        let drawable = if elements.is_well_formed() {
            enum_iterator::all::<Component>()
                .filter(|c| *c != Component::Model)
                .collect()
        } else {
            vec![Component::Label]
        };

        HeadlessEntity {
            id,
            name: elements.name.clone(),
            scene: Rc::clone(&self.scene),
            drawable,
            created: false,
            shown: IndexSet::new(),
            color: Highlight::Neutral,
            ground_station: None,
            monitored: false,
        }
    }

    fn clear_tracked_entity(&mut self) {
        self.scene.borrow_mut().set_tracked(None);
    }

    fn cleanup(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.cleanups += 1;
        scene.journal.push(SceneEvent::CleanedUp);
    }

    fn place_ground_station(&mut self, station: &GroundStation) -> GroundStation {
        let mut scene = self.scene.borrow_mut();
        scene.station = Some(station.clone());
        scene.journal.push(SceneEvent::StationPlaced(station.clone()));
        station.clone()
    }

    fn remove_ground_station(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.station = None;
        scene.station_tracked = false;
        scene.journal.push(SceneEvent::StationRemoved);
    }

    fn track_ground_station(&mut self) {
        let mut scene = self.scene.borrow_mut();
        if scene.station.is_some() {
            scene.set_tracked(None);
            scene.station_tracked = true;
            scene.journal.push(SceneEvent::StationTracked);
        }
    }
}

/// Simulation clock which only moves when told to. Clones share the same epoch.
#[derive(Clone, Debug)]
pub struct SimClock {
    epoch: Rc<Cell<Epoch>>,
}

impl SimClock {
    pub fn new(epoch: Epoch) -> Self {
        Self {
            epoch: Rc::new(Cell::new(epoch)),
        }
    }

    pub fn set(&self, epoch: Epoch) {
        self.epoch.set(epoch);
    }

    pub fn advance(&self, by: Duration) {
        self.epoch.set(self.epoch.get() + by);
    }
}

impl ClockSource for SimClock {
    fn current_epoch(&self) -> Epoch {
        self.epoch.get()
    }
}

/// Book of the timers started on a [`ManualTimers`] service.
#[derive(Debug, Default)]
pub struct TimerBook {
    next: u64,
    live: IndexMap<TimerHandle, Duration>,
    pub started: usize,
    pub cancelled: usize,
}

impl TimerBook {
    pub fn live(&self) -> Vec<TimerHandle> {
        self.live.keys().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn period(&self, handle: TimerHandle) -> Option<Duration> {
        self.live.get(&handle).copied()
    }
}

/// Timers which never fire on their own: the host fires them by calling the coordinator back.
#[derive(Debug, Default)]
pub struct ManualTimers {
    book: Rc<RefCell<TimerBook>>,
}

impl ManualTimers {
    pub fn new(book: Rc<RefCell<TimerBook>>) -> Self {
        Self { book }
    }
}

impl IntervalTimer for ManualTimers {
    fn start(&mut self, period: Duration) -> TimerHandle {
        let mut book = self.book.borrow_mut();
        book.next += 1;
        let handle = TimerHandle(book.next);
        book.live.insert(handle, period);
        book.started += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut book = self.book.borrow_mut();
        if book.live.shift_remove(&handle).is_some() {
            book.cancelled += 1;
        }
    }
}

/// What the store received.
#[derive(Debug, Default)]
pub struct StoreLog {
    latest: Option<StoreSnapshot>,
    projections: usize,
}

impl StoreLog {
    pub fn latest(&self) -> Option<&StoreSnapshot> {
        self.latest.as_ref()
    }

    /// Number of snapshots received so far.
    pub fn projections(&self) -> usize {
        self.projections
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    log: Rc<RefCell<StoreLog>>,
}

impl MemoryStore {
    pub fn new(log: Rc<RefCell<StoreLog>>) -> Self {
        Self { log }
    }
}

impl StateSink for MemoryStore {
    fn project(&mut self, snapshot: StoreSnapshot) {
        let mut log = self.log.borrow_mut();
        log.latest = Some(snapshot);
        log.projections += 1;
    }
}

pub type HeadlessCoordinator = Coordinator<HeadlessViewer, SimClock, ManualTimers, MemoryStore>;

/// Host side of a headless coordinator: what the engine, the clock, the timers and the store see.
#[derive(Clone, Debug)]
pub struct HeadlessHandles {
    pub scene: SharedScene,
    pub clock: SimClock,
    pub timers: Rc<RefCell<TimerBook>>,
    pub store: Rc<RefCell<StoreLog>>,
}

impl HeadlessHandles {
    /// Raises the tracked-entity-changed signal if the tracked entity changed. Returns whether it was raised.
    pub fn deliver_signals(&self, coord: &mut HeadlessCoordinator) -> bool {
        let changed = self.scene.borrow_mut().take_tracked_changed();
        if changed {
            coord.on_tracked_entity_changed();
        }
        changed
    }

    /// Fires every live timer once.
    pub fn fire_timers(&self, coord: &mut HeadlessCoordinator) {
        let live = self.timers.borrow().live();
        for handle in live {
            coord.on_timer(handle);
        }
    }
}

/// Initializes an empty coordinator on an in-memory scene whose clock is set to the provided epoch.
pub fn headless_coordinator(epoch: Epoch) -> (HeadlessCoordinator, HeadlessHandles) {
    let handles = HeadlessHandles {
        scene: SharedScene::default(),
        clock: SimClock::new(epoch),
        timers: Rc::default(),
        store: Rc::default(),
    };

    let coord = Coordinator::new(
        HeadlessViewer::new(Rc::clone(&handles.scene)),
        handles.clock.clone(),
        ManualTimers::new(Rc::clone(&handles.timers)),
        MemoryStore::new(Rc::clone(&handles.store)),
    );

    (coord, handles)
}
