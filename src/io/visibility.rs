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

use super::{epoch_from_str, epoch_to_str, ConfigRepr};
use crate::time::{Duration, Epoch};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A window during which two objects have a direct line of sight. Both bounds are included.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityInterval {
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub start: Epoch,
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub end: Epoch,
}

impl VisibilityInterval {
    pub fn new(start: Epoch, end: Epoch) -> Self {
        Self { start, end }
    }

    /// Closed interval containment, there is no interpolation.
    pub fn contains(&self, epoch: Epoch) -> bool {
        self.start <= epoch && epoch <= self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for VisibilityInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Line of sight windows, keyed by the name of the reference object then by the name of each peer.
/// The intervals of a given peer are ordered and disjoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityDataset {
    entries: BTreeMap<String, BTreeMap<String, Vec<VisibilityInterval>>>,
}

impl VisibilityDataset {
    /// Adds a window during which `reference` and `peer` see each other. Only the `reference` entry is updated.
    pub fn insert(&mut self, reference: &str, peer: &str, interval: VisibilityInterval) {
        let intervals = self
            .entries
            .entry(reference.to_string())
            .or_default()
            .entry(peer.to_string())
            .or_default();
        intervals.push(interval);
        intervals.sort_by(|a, b| a.start.cmp(&b.start));
    }

    /// All of the peers known for this reference object. A missing entry means "no peers".
    pub fn peers(&self, reference: &str) -> Option<&BTreeMap<String, Vec<VisibilityInterval>>> {
        self.entries.get(reference)
    }

    /// Returns whether `peer` is visible from `reference` at the provided epoch, i.e. if any one of the windows contains it.
    pub fn is_visible(&self, reference: &str, peer: &str, epoch: Epoch) -> bool {
        self.peers(reference)
            .and_then(|peers| peers.get(peer))
            .map(|intervals| intervals.iter().any(|interval| interval.contains(epoch)))
            .unwrap_or(false)
    }

    /// Names of the peers visible from `reference` at the provided epoch, sorted.
    pub fn visible_peers(&self, reference: &str, epoch: Epoch) -> Vec<&str> {
        match self.peers(reference) {
            Some(peers) => peers
                .iter()
                .filter(|(_, intervals)| intervals.iter().any(|i| i.contains(epoch)))
                .map(|(name, _)| name.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Names of the reference objects of this dataset.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigRepr for VisibilityDataset {}
