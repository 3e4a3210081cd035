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
use crate::errors::SourceError;
use crate::io::source::SourceFetcher;
use crate::io::visibility::VisibilityDataset;
use crate::time::Duration;
use crate::viewer::{ClockSource, Highlight, IntervalTimer, SatelliteEntity, TimerHandle, Viewer};

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    /// Tracking request waiting for its satellite to be loaded.
    pub fn pending_tracked_satellite(&self) -> Option<&str> {
        self.pending_tracked.as_deref()
    }

    /// Requests the engine to follow the named satellite.
    ///
    /// An empty name stops tracking (if anything is tracked) and drops any pending request. The name of the
    /// currently tracked satellite is a no-op. The name of a satellite which is not loaded is kept as pending and
    /// fulfilled when that satellite is added.
    ///
    /// The outcome is only visible once the engine raises its tracked-entity-changed signal.
    pub fn set_tracked_satellite(&mut self, name: &str) {
        if name.is_empty() {
            self.pending_tracked = None;
            if self.tracked_satellite().is_some() {
                self.viewer.clear_tracked_entity();
            }
            return;
        }

        if self.tracked_satellite() == Some(name) {
            return;
        }

        match self.satellites.iter_mut().find(|sat| sat.name == name) {
            Some(sat) => {
                sat.entity.track();
                self.pending_tracked = None;
            }
            None => {
                debug!("{name} is not loaded (yet), tracking request is pending");
                self.pending_tracked = Some(name.to_string());
            }
        }
    }

    /// Handler of the tracked-entity-changed signal of the engine.
    ///
    /// If a satellite is tracked, it is shown, the visibility highlighting is computed and the highlight timer is
    /// (re)started. If tracking was cleared, the timer is stopped and the active satellites return to neutral.
    pub fn on_tracked_entity_changed(&mut self) {
        match self.tracked_satellite().map(str::to_string) {
            Some(name) => {
                info!("now tracking {name}");
                let components = self.enabled_component_list();
                if let Some(sat) = self.get_satellite_mut(&name) {
                    sat.entity.show(&components);
                }
                self.mark_visible_satellites(&name);
                self.start_highlight_timer();
            }
            None => {
                info!("tracking cleared");
                self.stop_highlight_timer();
                self.reset_highlights();
            }
        }
        self.project();
    }

    /// Handler of the highlight timer: recomputes the highlighting at the current simulation epoch.
    /// Fires of a timer which is no longer the live one are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.highlight_timer != Some(handle) {
            trace!("ignoring fire of stale timer {handle:?}");
            return;
        }
        if let Some(name) = self.tracked_satellite().map(str::to_string) {
            self.mark_visible_satellites(&name);
        }
    }

    /// Highlights the named satellite and its peers in the visibility dataset.
    ///
    /// Every active satellite is first reset to neutral. Then the named one is set to focus, and each peer is set
    /// to visible if the current simulation epoch falls in any of its windows, and to neutral otherwise. The outcome
    /// only depends on the name, the epoch and the dataset.
    pub fn mark_visible_satellites(&mut self, name: &str) {
        let epoch = self.clock.current_epoch();
        self.reset_highlights();

        for sat in self.satellites.iter_mut().filter(|sat| sat.name == name) {
            sat.entity.change_color(Highlight::Focus);
        }

        let Some(peers) = self.visibility.peers(name) else {
            trace!("no visibility data for {name}");
            return;
        };

        let mut visible = 0;
        for (peer, intervals) in peers.iter().filter(|(peer, _)| peer.as_str() != name) {
            let highlight = if intervals.iter().any(|interval| interval.contains(epoch)) {
                visible += 1;
                Highlight::Visible
            } else {
                Highlight::Neutral
            };
            for sat in self.satellites.iter_mut().filter(|sat| &sat.name == peer) {
                sat.entity.change_color(highlight);
            }
        }
        trace!("{visible} of {} peers visible from {name} at {epoch}", peers.len());
    }

    /// Every active or realized satellite goes back to neutral, including a previously tracked inactive one.
    fn reset_highlights(&mut self) {
        let (tags, names) = (&self.enabled_tags, &self.enabled_satellites);
        for sat in self
            .satellites
            .iter_mut()
            .filter(|sat| sat.entity.is_created() || sat.is_enabled_by(tags, names))
        {
            sat.entity.change_color(Highlight::Neutral);
        }
    }

    /// Starts the highlight timer, after cancelling the previous one: there is never more than one.
    fn start_highlight_timer(&mut self) {
        self.stop_highlight_timer();
        self.highlight_timer = Some(self.timer.start(self.highlight_period));
    }

    fn stop_highlight_timer(&mut self) {
        if let Some(handle) = self.highlight_timer.take() {
            self.timer.cancel(handle);
        }
    }

    /// The live highlight timer, if any.
    pub fn highlight_timer(&self) -> Option<TimerHandle> {
        self.highlight_timer
    }

    pub fn highlight_period(&self) -> Duration {
        self.highlight_period
    }

    /// Changes the period of the highlight timer, restarting it if it is live.
    pub fn set_highlight_period(&mut self, period: Duration) {
        self.highlight_period = period;
        if self.highlight_timer.is_some() {
            self.start_highlight_timer();
        }
    }

    pub fn visibility(&self) -> &VisibilityDataset {
        &self.visibility
    }

    /// Replaces the visibility dataset, the next highlight pass uses it.
    pub fn set_visibility(&mut self, dataset: VisibilityDataset) {
        info!("visibility data available for {} satellites", dataset.len());
        self.visibility = dataset;
    }

    pub fn load_visibility<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
        uri: &str,
    ) -> Result<(), SourceError> {
        let dataset = fetcher.fetch_visibility(uri)?;
        self.set_visibility(dataset);
        Ok(())
    }
}
