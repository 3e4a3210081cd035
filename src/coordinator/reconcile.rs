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

use super::{Coordinator, Satellite, StateSink};
use crate::errors::SourceError;
use crate::io::config::SourceConfig;
use crate::io::elements::ElementSet;
use crate::io::source::SourceFetcher;
use crate::viewer::{ClockSource, IntervalTimer, SatelliteEntity, Viewer};
use rayon::prelude::*;

/// Outcome of merging one element set into the collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// New identity, a satellite was appended
    Added,
    /// Known identity, the tags were merged into the existing satellite
    Merged,
}

/// Summary of a bulk load.
#[derive(Debug, Default)]
pub struct BulkLoad {
    pub sources_loaded: usize,
    /// One entry per source which could not be fetched, these sources were skipped
    pub failures: Vec<SourceError>,
    pub added: usize,
    pub merged: usize,
}

impl BulkLoad {
    fn record(&mut self, outcomes: &[Reconciled]) {
        for outcome in outcomes {
            match outcome {
                Reconciled::Added => self.added += 1,
                Reconciled::Merged => self.merged += 1,
            }
        }
    }
}

impl<V, C, T, S> Coordinator<V, C, T, S>
where
    V: Viewer,
    C: ClockSource,
    T: IntervalTimer,
    S: StateSink,
{
    /// Merges one element set into the collection, without updating the store.
    ///
    /// The identity of a satellite is its catalog number and its name. If both match an existing satellite, the
    /// tags are merged into it and, if any of the new tags is enabled, it is shown straight away. Otherwise a new
    /// entity is created, given the ground station, appended, shown if active, and tracked if a tracking request
    /// was waiting for this name.
    pub fn add_from_tle(&mut self, elements: &ElementSet, tags: &[String]) -> Reconciled {
        let catalog_number = elements.catalog_number();
        let components = self.enabled_component_list();

        if let Some(existing) = self
            .satellites
            .iter_mut()
            .find(|sat| sat.catalog_number == catalog_number && sat.name == elements.name)
        {
            existing.add_tags(tags);
            if tags.iter().any(|tag| self.enabled_tags.contains(tag)) {
                existing.entity.show(&components);
            }
            trace!("merged tags {tags:?} into {}", existing.name);
            return Reconciled::Merged;
        }

        let mut entity = self.viewer.create_entity(elements);
        if let Some(station) = &self.ground_station {
            entity.set_ground_station(station);
        }

        let mut sat = Satellite::new(catalog_number, elements.name.clone(), tags, entity);
        if sat.is_enabled_by(&self.enabled_tags, &self.enabled_satellites) {
            sat.entity.show(&components);
        }
        debug!("added {} ({})", sat.name, sat.catalog_number);
        self.satellites.push(sat);

        if self.pending_tracked.as_deref() == Some(elements.name.as_str()) {
            info!("fulfilling pending tracking request for {}", elements.name);
            self.set_tracked_satellite(&elements.name);
        }

        Reconciled::Added
    }

    /// Merges every record of the element text, then updates the store once.
    pub fn add_from_elements(&mut self, text: &str, tags: &[String]) -> Vec<Reconciled> {
        let outcomes = self.merge_text(text, tags);
        self.project();
        outcomes
    }

    /// Fetches one element source and merges it. A failure is logged and nothing is added.
    pub fn add_from_source<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
        uri: &str,
        tags: &[String],
    ) -> Result<Vec<Reconciled>, SourceError> {
        match fetcher.fetch(uri) {
            Ok(text) => Ok(self.add_from_elements(&text, tags)),
            Err(e) => {
                warn!("skipping element source {uri}: {e}");
                Err(e)
            }
        }
    }

    /// Fetches all of the sources in parallel, merges each of them in the order provided, and only then updates the
    /// store. A source which cannot be fetched is logged and skipped, it does not affect the others.
    pub fn add_from_sources<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
        sources: &[SourceConfig],
    ) -> BulkLoad {
        let fetched: Vec<Result<String, SourceError>> = sources
            .par_iter()
            .map(|source| fetcher.fetch(&source.uri))
            .collect();

        let mut report = BulkLoad::default();
        for (source, result) in sources.iter().zip(fetched) {
            match result {
                Ok(text) => {
                    let outcomes = self.merge_text(&text, &source.tags);
                    report.record(&outcomes);
                    report.sources_loaded += 1;
                }
                Err(e) => {
                    warn!("skipping element source {}: {e}", source.uri);
                    report.failures.push(e);
                }
            }
        }

        self.project();

        info!(
            "loaded {} of {} element sources: {} satellites added, {} merged",
            report.sources_loaded,
            sources.len(),
            report.added,
            report.merged
        );

        report
    }

    fn merge_text(&mut self, text: &str, tags: &[String]) -> Vec<Reconciled> {
        ElementSet::parse_many(text)
            .iter()
            .map(|elements| self.add_from_tle(elements, tags))
            .collect()
    }
}
