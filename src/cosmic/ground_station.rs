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

use crate::io::ConfigRepr;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Heights under this value, in meters, are snapped to the ground.
pub const MIN_HEIGHT_M: f64 = 1.0;

/// GroundStation is the single reference point on the ground from which each satellite computes its elevation and range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundStation {
    #[serde(default = "default_name")]
    pub name: String,
    /// in degrees
    pub latitude_deg: f64,
    /// in degrees
    pub longitude_deg: f64,
    /// in meters, never negative once placed
    #[serde(default)]
    pub height_m: f64,
}

fn default_name() -> String {
    "Ground station".to_string()
}

impl GroundStation {
    /// Initializes a point on the surface of the Earth.
    pub fn from_point(name: String, latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            name,
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    /// Returns a copy of this ground station where heights below one meter (including negative ones) are set to zero.
    pub fn snapped_to_ground(mut self) -> Self {
        if self.height_m < MIN_HEIGHT_M || self.height_m.is_nan() {
            self.height_m = 0.0;
        }
        self
    }

    /// Latitude and longitude, in degrees, as pushed to the application store.
    pub fn lat_long_deg(&self) -> [f64; 2] {
        [self.latitude_deg, self.longitude_deg]
    }
}

impl Default for GroundStation {
    fn default() -> Self {
        Self::from_point(default_name(), 0.0, 0.0, 0.0)
    }
}

impl ConfigRepr for GroundStation {}

impl fmt::Display for GroundStation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (lat.: {:.4} deg    long.: {:.4} deg    alt.: {:.3} m)",
            self.name, self.latitude_deg, self.longitude_deg, self.height_m,
        )
    }
}
