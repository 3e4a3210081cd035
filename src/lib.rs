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

/*! # satvis

Coordinates a collection of orbital objects drawn on a 3D globe: reconciles orbital element feeds into
a single collection, activates objects by tag or by name, mirrors the tracked object of the rendering
engine, and highlights which objects are mutually visible with the tracked one at the current simulation
time using a precomputed visibility dataset.

The rendering engine, the per-object visual representation, the simulation clock, timers and the
application store are all external: they are reached through the traits of the [`viewer`] and
[`coordinator`] modules. The [`headless`] module provides in-memory implementations of each of them.
*/

/// The satellite collection coordinator.
pub mod coordinator;

/// Ground station definition.
pub mod cosmic;

mod errors;
/// Failures are (almost) never fatal: they are logged and the affected source is skipped.
pub use self::errors::SourceError;

/// Headless implementations of every external collaborator, used by the command line tool and the tests.
pub mod headless;

/// All the input/output needs: element sources, visibility datasets and configuration files.
pub mod io;

/// Interfaces to the rendering engine and to the per-object visual entities.
pub mod viewer;

#[macro_use]
extern crate log;
extern crate hifitime;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export some useful things
pub use self::coordinator::{Coordinator, Satellite};
pub use self::cosmic::GroundStation;
pub use self::io::elements::ElementSet;
pub use self::io::visibility::{VisibilityDataset, VisibilityInterval};
pub use self::viewer::{Component, Highlight};

pub mod prelude {
    pub use crate::coordinator::*;
    pub use crate::cosmic::GroundStation;
    pub use crate::io::config::{CoordinatorConfig, SourceConfig};
    pub use crate::io::elements::ElementSet;
    pub use crate::io::source::{LocalFiles, SourceFetcher};
    pub use crate::io::visibility::{VisibilityDataset, VisibilityInterval};
    pub use crate::io::{ConfigError, ConfigRepr};
    pub use crate::viewer::*;
    pub use crate::SourceError;

    pub use crate::time::{Duration, Epoch, TimeUnits, Unit};
}
