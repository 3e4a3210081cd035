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
use crate::viewer::{ClockSource, Component, IntervalTimer, SatelliteEntity, Viewer};
use indexmap::IndexSet;

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    pub fn enabled_tags(&self) -> Vec<String> {
        self.enabled_tags.iter().cloned().collect()
    }

    /// Replaces the enabled tags, then shows the satellites which became active and hides those which are no longer.
    pub fn set_enabled_tags<I, N>(&mut self, tags: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.enabled_tags = tags.into_iter().map(Into::into).collect();
        info!("enabled tags: {:?}", self.enabled_tags);
        self.show_enabled_satellites();
        self.project();
    }

    pub fn enabled_satellites(&self) -> Vec<String> {
        self.enabled_satellites.iter().cloned().collect()
    }

    /// Replaces the satellites enabled by name, independently of the enabled tags.
    pub fn set_enabled_satellites<I, N>(&mut self, names: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.enabled_satellites = names.into_iter().map(Into::into).collect();
        info!("enabled satellites: {:?}", self.enabled_satellites);
        self.show_enabled_satellites();
        self.project();
    }

    /// Realizes the visuals of every active satellite which has none, and releases those of every inactive one.
    /// If nothing is left on screen, the engine scratch resources are cleaned up.
    pub fn show_enabled_satellites(&mut self) {
        let components = self.enabled_component_list();
        let (tags, names) = (&self.enabled_tags, &self.enabled_satellites);

        let (mut shown, mut hidden) = (0, 0);
        for sat in self.satellites.iter_mut() {
            if sat.is_enabled_by(tags, names) {
                if !sat.entity.is_created() {
                    sat.entity.show(&components);
                    shown += 1;
                }
            } else if sat.entity.is_created() {
                sat.entity.hide();
                hidden += 1;
            }
        }
        debug!("{shown} satellites shown, {hidden} hidden");

        if self.satellites.iter().all(|sat| !sat.entity.is_created()) {
            debug!("nothing left on screen, cleaning up");
            self.viewer.cleanup();
        }
    }

    pub fn enabled_components(&self) -> Vec<Component> {
        self.enabled_component_list()
    }

    /// Only the difference with the current components is applied to the active satellites: added components are
    /// enabled, removed ones disabled, and unchanged ones are left alone.
    pub fn set_enabled_components<I>(&mut self, components: I)
    where
        I: IntoIterator<Item = Component>,
    {
        let requested: IndexSet<Component> = components.into_iter().collect();
        let added: Vec<Component> = requested
            .difference(&self.enabled_components)
            .copied()
            .collect();
        let removed: Vec<Component> = self
            .enabled_components
            .difference(&requested)
            .copied()
            .collect();

        for component in added {
            self.enable_component(component);
        }
        for component in removed {
            self.disable_component(component);
        }
    }

    /// Enables a component on every active satellite. Already enabled components are left alone.
    pub fn enable_component(&mut self, component: Component) {
        if !self.enabled_components.insert(component) {
            return;
        }

        let (tags, names) = (&self.enabled_tags, &self.enabled_satellites);
        for sat in self
            .satellites
            .iter_mut()
            .filter(|sat| sat.is_enabled_by(tags, names))
        {
            sat.entity.enable_component(component);
        }
    }

    pub fn disable_component(&mut self, component: Component) {
        if !self.enabled_components.shift_remove(&component) {
            return;
        }

        let (tags, names) = (&self.enabled_tags, &self.enabled_satellites);
        for sat in self
            .satellites
            .iter_mut()
            .filter(|sat| sat.is_enabled_by(tags, names))
        {
            sat.entity.disable_component(component);
        }
    }
}
