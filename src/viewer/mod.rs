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
use crate::io::elements::ElementSet;
use crate::time::{Duration, Epoch};
use enum_iterator::Sequence;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A visual component of a satellite entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Sequence)]
pub enum Component {
    Point,
    Label,
    Orbit,
    #[serde(rename = "Orbit track")]
    OrbitTrack,
    #[serde(rename = "Ground track")]
    GroundTrack,
    #[serde(rename = "Sensor cone")]
    SensorCone,
    #[serde(rename = "3D model")]
    Model,
}

impl Component {
    /// Components realized when nothing else is configured.
    pub const DEFAULTS: [Component; 2] = [Component::Point, Component::Label];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Label => "Label",
            Self::Orbit => "Orbit",
            Self::OrbitTrack => "Orbit track",
            Self::GroundTrack => "Ground track",
            Self::SensorCone => "Sensor cone",
            Self::Model => "3D model",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum_iterator::all::<Component>()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown component `{s}`"))
    }
}

/// Highlight applied to a satellite by the visibility pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// Baseline color of every active satellite
    #[default]
    Neutral,
    /// The tracked satellite
    Focus,
    /// A peer currently in line of sight of the tracked satellite
    Visible,
}

impl Highlight {
    /// RGBA color of this highlight (white, dark blue, green).
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Self::Neutral => [255, 255, 255, 255],
            Self::Focus => [0, 0, 139, 255],
            Self::Visible => [0, 128, 0, 255],
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The renderable representation of one satellite, owned by the rendering engine.
///
/// Creating, tracking and selecting are engine concepts: the coordinator only reads them back.
pub trait SatelliteEntity {
    /// Realizes the visuals of this entity with exactly the provided components.
    fn show(&mut self, components: &[Component]);
    /// Releases all visuals of this entity.
    fn hide(&mut self);
    fn enable_component(&mut self, component: Component);
    fn disable_component(&mut self, component: Component);
    /// Components this entity is able to draw.
    fn components(&self) -> Vec<Component>;
    fn change_color(&mut self, highlight: Highlight);

    /// Whether the visuals of this entity currently exist in the engine.
    fn is_created(&self) -> bool;
    /// Whether this entity is the one the engine camera follows.
    fn is_tracked(&self) -> bool;
    /// Whether this entity is the one selected in the engine.
    fn is_selected(&self) -> bool;
    /// Asks the engine to follow this entity. The engine then raises its tracked-entity-changed signal.
    fn track(&mut self);

    /// Reference position used to compute the elevation and range of this satellite.
    fn set_ground_station(&mut self, station: &GroundStation);

    /// Starts pass notifications for this satellite.
    fn notify_passes(&mut self);
    /// Stops pass notifications for this satellite.
    fn clear_pass_timers(&mut self);
    fn is_monitored(&self) -> bool;
}

/// The rendering engine, seen from the coordinator.
pub trait Viewer {
    type Entity: SatelliteEntity;

    /// Builds the (not yet shown) entity of a newly reconciled satellite.
    fn create_entity(&mut self, elements: &ElementSet) -> Self::Entity;
    /// Stops following any entity. The engine then raises its tracked-entity-changed signal.
    fn clear_tracked_entity(&mut self);
    /// Releases engine scratch resources which only exist while something is shown.
    fn cleanup(&mut self);

    /// Places the ground station marker and returns the position actually used by the engine.
    fn place_ground_station(&mut self, station: &GroundStation) -> GroundStation;
    fn remove_ground_station(&mut self);
    /// Asks the engine to follow the ground station marker.
    fn track_ground_station(&mut self);
}

/// Simulation clock of the rendering engine.
pub trait ClockSource {
    fn current_epoch(&self) -> Epoch;
}

/// Identifier of a recurring timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Wall clock recurring timers. When a timer fires, the host calls back [`crate::Coordinator::on_timer`] with its handle.
pub trait IntervalTimer {
    fn start(&mut self, period: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}
