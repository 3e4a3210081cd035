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

use super::{duration_from_str, duration_to_str, ConfigRepr};
use crate::cosmic::GroundStation;
use crate::time::{Duration, TimeUnits};
use crate::viewer::Component;
use serde_derive::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// An element source and the tags given to every satellite it contains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub uri: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl SourceConfig {
    pub fn new(uri: &str, tags: &[&str]) -> Self {
        Self {
            uri: uri.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

fn default_components() -> Vec<Component> {
    Component::DEFAULTS.to_vec()
}

fn default_highlight_period() -> Duration {
    1.seconds()
}

/// Configuration of a coordinator and of what it loads on start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct CoordinatorConfig {
    /// Components realized on every active satellite, defaults to point and label
    #[builder(default = default_components())]
    #[serde(default = "default_components")]
    pub enabled_components: Vec<Component>,
    #[builder(default)]
    #[serde(default)]
    pub enabled_tags: Vec<String>,
    #[builder(default)]
    #[serde(default)]
    pub enabled_satellites: Vec<String>,
    /// Wall clock period of the visibility highlighting, independent of the simulation clock rate
    #[builder(default = default_highlight_period())]
    #[serde(
        default = "default_highlight_period",
        serialize_with = "duration_to_str",
        deserialize_with = "duration_from_str"
    )]
    pub highlight_period: Duration,
    /// Element sources, loaded in bulk
    #[builder(default)]
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Location of the visibility dataset
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub visibility: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub ground_station: Option<GroundStation>,
    /// Satellite to track once loaded
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub tracked_satellite: Option<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ConfigRepr for CoordinatorConfig {}
