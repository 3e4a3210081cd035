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

use crate::cosmic::GroundStation;
use crate::io::config::CoordinatorConfig;
use crate::io::source::SourceFetcher;
use crate::io::visibility::VisibilityDataset;
use crate::time::Duration;
use crate::viewer::{ClockSource, Component, IntervalTimer, SatelliteEntity, TimerHandle, Viewer};
use indexmap::IndexSet;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Enabling and disabling satellites by tag or by name, and their visual components.
mod activation;
/// Ground station placement and pass monitoring.
mod ground;
/// Merging of element sources into the collection.
mod reconcile;
/// Projection of the coordinator state onto the application store.
mod store;
/// Tracked satellite and visibility highlighting.
mod tracking;

pub use reconcile::{BulkLoad, Reconciled};
pub use store::{StateSink, StoreSnapshot};

/// One orbital object of the collection: its identity, its tags, and the entity drawing it.
pub struct Satellite<E: SatelliteEntity> {
    /// Catalog number, first half of the identity
    pub catalog_number: String,
    /// Display name, second half of the identity and the key used by the outside world
    pub name: String,
    tags: BTreeSet<String>,
    pub entity: E,
}

impl<E: SatelliteEntity> Satellite<E> {
    pub(crate) fn new(catalog_number: String, name: String, tags: &[String], entity: E) -> Self {
        Self {
            catalog_number,
            name,
            tags: tags.iter().cloned().collect(),
            entity,
        }
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Union of the provided tags into the tags of this satellite.
    pub(crate) fn add_tags(&mut self, tags: &[String]) {
        self.tags.extend(tags.iter().cloned());
    }

    /// A satellite is active if it carries at least one enabled tag or if its name is enabled.
    pub fn is_enabled_by(&self, tags: &IndexSet<String>, names: &IndexSet<String>) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag)) || names.contains(&self.name)
    }
}

impl<E: SatelliteEntity> fmt::Debug for Satellite<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satellite")
            .field("catalog_number", &self.catalog_number)
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("created", &self.entity.is_created())
            .field("tracked", &self.entity.is_tracked())
            .finish()
    }
}

/// Owns the collection of satellites and keeps the rendering engine in sync with what is enabled and tracked.
///
/// All mutations happen on the caller's thread, in response to discrete events: element sources loaded, user
/// commands, the tracked-entity-changed signal of the engine ([`Coordinator::on_tracked_entity_changed`]) and
/// timer fires ([`Coordinator::on_timer`]).
pub struct Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    viewer: V,
    clock: C,
    timer: T,
    sink: S,
    satellites: Vec<Satellite<V::Entity>>,
    enabled_components: IndexSet<Component>,
    enabled_tags: IndexSet<String>,
    enabled_satellites: IndexSet<String>,
    /// Tracking request for a satellite which is not (yet) in the collection
    pending_tracked: Option<String>,
    ground_station: Option<GroundStation>,
    visibility: VisibilityDataset,
    /// The only live highlight timer, if any
    highlight_timer: Option<TimerHandle>,
    highlight_period: Duration,
}

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    /// Initializes an empty coordinator with the default configuration.
    pub fn new(viewer: V, clock: C, timer: T, sink: S) -> Self {
        let cfg = CoordinatorConfig::default();
        Self {
            viewer,
            clock,
            timer,
            sink,
            satellites: Vec::new(),
            enabled_components: cfg.enabled_components.into_iter().collect(),
            enabled_tags: IndexSet::new(),
            enabled_satellites: IndexSet::new(),
            pending_tracked: None,
            ground_station: None,
            visibility: VisibilityDataset::default(),
            highlight_timer: None,
            highlight_period: cfg.highlight_period,
        }
    }

    /// Applies a configuration: enabled sets, ground station, visibility dataset, tracking request, and finally a bulk
    /// load of the element sources. A visibility dataset which cannot be loaded is logged and left empty.
    pub fn bootstrap<F: SourceFetcher>(&mut self, fetcher: &F, cfg: &CoordinatorConfig) -> BulkLoad {
        self.set_highlight_period(cfg.highlight_period);
        self.set_enabled_components(cfg.enabled_components.iter().copied());
        self.enabled_tags = cfg.enabled_tags.iter().cloned().collect();
        self.enabled_satellites = cfg.enabled_satellites.iter().cloned().collect();
        self.show_enabled_satellites();

        if let Some(station) = &cfg.ground_station {
            self.set_ground_station(station.clone());
        }

        if let Some(uri) = &cfg.visibility {
            if let Err(e) = self.load_visibility(fetcher, uri) {
                warn!("continuing without visibility data: {e}");
            }
        }

        if let Some(name) = &cfg.tracked_satellite {
            self.set_tracked_satellite(name);
        }

        self.add_from_sources(fetcher, &cfg.sources)
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn satellites(&self) -> &[Satellite<V::Entity>] {
        &self.satellites
    }

    pub fn satellite_names(&self) -> Vec<String> {
        self.satellites.iter().map(|sat| sat.name.clone()).collect()
    }

    /// Linear search by display name, the first match wins.
    pub fn get_satellite(&self, name: &str) -> Option<&Satellite<V::Entity>> {
        self.satellites.iter().find(|sat| sat.name == name)
    }

    pub fn get_satellite_mut(&mut self, name: &str) -> Option<&mut Satellite<V::Entity>> {
        self.satellites.iter_mut().find(|sat| sat.name == name)
    }

    /// Distinct tags across the collection, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.satellites
            .iter()
            .flat_map(|sat| sat.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Tag to sorted satellite names index. A tag without any satellite never appears.
    pub fn taglist(&self) -> BTreeMap<String, Vec<String>> {
        let mut taglist: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for sat in &self.satellites {
            for tag in &sat.tags {
                taglist.entry(tag.clone()).or_default().push(sat.name.clone());
            }
        }
        for names in taglist.values_mut() {
            names.sort();
        }
        taglist
    }

    pub fn satellites_with_tag(&self, tag: &str) -> Vec<&Satellite<V::Entity>> {
        self.satellites.iter().filter(|sat| sat.has_tag(tag)).collect()
    }

    /// Components which the entities of the collection are able to draw, in order of first appearance.
    pub fn components(&self) -> Vec<Component> {
        self.satellites
            .iter()
            .flat_map(|sat| sat.entity.components())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every component known to the coordinator.
    pub fn available_components(&self) -> Vec<Component> {
        enum_iterator::all::<Component>().collect()
    }

    pub fn is_active(&self, sat: &Satellite<V::Entity>) -> bool {
        sat.is_enabled_by(&self.enabled_tags, &self.enabled_satellites)
    }

    pub fn active_satellites(&self) -> Vec<&Satellite<V::Entity>> {
        self.satellites
            .iter()
            .filter(|sat| self.is_active(sat))
            .collect()
    }

    /// Satellites whose visuals currently exist in the engine.
    pub fn visible_satellites(&self) -> Vec<&Satellite<V::Entity>> {
        self.satellites
            .iter()
            .filter(|sat| sat.entity.is_created())
            .collect()
    }

    /// Name of the satellite selected in the engine, if any.
    pub fn selected_satellite(&self) -> Option<&str> {
        self.satellites
            .iter()
            .find(|sat| sat.entity.is_selected())
            .map(|sat| sat.name.as_str())
    }

    /// Name of the satellite followed by the engine camera, if any.
    pub fn tracked_satellite(&self) -> Option<&str> {
        self.satellites
            .iter()
            .find(|sat| sat.entity.is_tracked())
            .map(|sat| sat.name.as_str())
    }

    fn enabled_component_list(&self) -> Vec<Component> {
        self.enabled_components.iter().copied().collect()
    }
}
