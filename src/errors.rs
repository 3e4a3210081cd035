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

use crate::io::ConfigError;
use snafu::prelude::*;
use std::io;

/// Failure to obtain or decode one source (element file or visibility dataset).
/// A source failure only ever affects that source: siblings of the same bulk load are unaffected.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SourceError {
    #[snafu(display("could not read source {uri}: {source}"))]
    ReadSource { uri: String, source: io::Error },
    #[snafu(display("source {uri} answered with status {status}"))]
    BadStatus { uri: String, status: u16 },
    #[snafu(display("visibility dataset {uri} is malformed: {source}"))]
    MalformedVisibility { uri: String, source: ConfigError },
}

impl SourceError {
    /// Location of the source which failed.
    pub fn location(&self) -> &str {
        match self {
            Self::ReadSource { uri, .. }
            | Self::BadStatus { uri, .. }
            | Self::MalformedVisibility { uri, .. } => uri,
        }
    }
}

impl PartialEq for SourceError {
    /// Two source errors match if they concern the same location and are of the same kind.
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.location() == other.location()
    }
}
