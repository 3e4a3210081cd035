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

use super::Coordinator;
use crate::viewer::{ClockSource, IntervalTimer, Viewer};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the application store knows about the collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub available_tags: Vec<String>,
    /// Tag to sorted satellite names
    pub satellites_by_tag: BTreeMap<String, Vec<String>>,
    /// Empty when nothing is tracked
    pub tracked_satellite: String,
    pub enabled_satellites: Vec<String>,
    pub enabled_tags: Vec<String>,
    /// Latitude and longitude of the ground station, in degrees
    pub ground_station: Option<[f64; 2]>,
}

/// The application store, which only ever receives complete snapshots.
pub trait StateSink {
    fn project(&mut self, snapshot: StoreSnapshot);
}

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            available_tags: self.tags(),
            satellites_by_tag: self.taglist(),
            tracked_satellite: self.tracked_satellite().unwrap_or_default().to_string(),
            enabled_satellites: self.enabled_satellites(),
            enabled_tags: self.enabled_tags(),
            ground_station: self.ground_station.as_ref().map(|gs| gs.lat_long_deg()),
        }
    }

    /// Pushes the current state to the application store.
    pub fn project(&mut self) {
        let snapshot = self.snapshot();
        trace!(
            "projecting {} tags, tracking `{}`",
            snapshot.available_tags.len(),
            snapshot.tracked_satellite
        );
        self.sink.project(snapshot);
    }
}
