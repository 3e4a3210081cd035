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

use super::{Coordinator, StateSink};
use crate::cosmic::GroundStation;
use crate::viewer::{ClockSource, IntervalTimer, SatelliteEntity, Viewer};

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    /// Places the ground station, replacing the previous one if any.
    ///
    /// Heights below one meter are snapped to the ground. The position returned by the engine is given to every
    /// satellite of the collection, and to those added later on.
    pub fn set_ground_station(&mut self, station: GroundStation) {
        if self.ground_station.is_some() {
            self.viewer.remove_ground_station();
        }

        let placed = self.viewer.place_ground_station(&station.snapped_to_ground());
        for sat in self.satellites.iter_mut() {
            sat.entity.set_ground_station(&placed);
        }
        info!("ground station placed at {placed}");

        self.ground_station = Some(placed);
        self.project();
    }

    pub fn ground_station(&self) -> Option<&GroundStation> {
        self.ground_station.as_ref()
    }

    pub fn ground_station_available(&self) -> bool {
        self.ground_station.is_some()
    }

    /// Asks the engine to follow the ground station marker, if one is placed.
    pub fn focus_ground_station(&mut self) {
        if self.ground_station.is_some() {
            self.viewer.track_ground_station();
        } else {
            debug!("no ground station to focus");
        }
    }

    /// Names of the satellites with pass notifications active.
    pub fn monitored_satellites(&self) -> Vec<String> {
        self.satellites
            .iter()
            .filter(|sat| sat.entity.is_monitored())
            .map(|sat| sat.name.clone())
            .collect()
    }

    /// Starts pass notifications for the named satellites and stops them for every other one.
    pub fn set_monitored_satellites<N: AsRef<str>>(&mut self, names: &[N]) {
        for sat in self.satellites.iter_mut() {
            if names.iter().any(|name| name.as_ref() == sat.name) {
                if !sat.entity.is_monitored() {
                    sat.entity.notify_passes();
                }
            } else {
                sat.entity.clear_pass_timers();
            }
        }
        debug!("monitoring passes of {} satellites", self.monitored_satellites().len());
    }
}
