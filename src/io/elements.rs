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

use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Length of a well formed element line.
pub const ELEMENT_LINE_LEN: usize = 69;

/// One orbital element record: a display name line followed by two fixed-width element lines.
///
/// The element lines are kept verbatim. Decoding them into an orbit is the job of the visual entity, which
/// is also where an ill formed record ends up with unusable position data: nothing is rejected here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    pub fn new(name: &str, line1: &str, line2: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            line1: line1.trim().to_string(),
            line2: line2.trim().to_string(),
        }
    }

    /// Splits the provided text into successive triplets of lines. Blank lines are ignored.
    ///
    /// If the number of lines is not a multiple of three, the last record is built from whatever lines are left,
    /// i.e. with empty element lines.
    pub fn parse_many(text: &str) -> Vec<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

        if lines.len() % 3 != 0 {
            warn!(
                "element source has {} lines, which is not a multiple of three: last record is incomplete",
                lines.len()
            );
        }

        lines
            .chunks(3)
            .map(|triplet| {
                Self::new(
                    triplet[0],
                    triplet.get(1).copied().unwrap_or_default(),
                    triplet.get(2).copied().unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Catalog number, stored in columns 3 to 7 of the first element line. Empty if the line is too short.
    pub fn catalog_number(&self) -> String {
        self.line1
            .get(2..7)
            .map(|num| num.trim().to_string())
            .unwrap_or_default()
    }

    /// Returns whether both element lines have the expected line numbers and widths.
    /// This is not a checksum validation.
    pub fn is_well_formed(&self) -> bool {
        self.line1.starts_with("1 ")
            && self.line2.starts_with("2 ")
            && self.line1.len() == ELEMENT_LINE_LEN
            && self.line2.len() == ELEMENT_LINE_LEN
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.name, self.line1, self.line2)
    }
}
