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

use super::visibility::VisibilityDataset;
use super::ConfigRepr;
use crate::errors::{MalformedVisibilitySnafu, ReadSourceSnafu, SourceError};
use snafu::ResultExt;
use std::fs;
use std::path::PathBuf;

/// Retrieves the text of an element or visibility source.
///
/// Bulk loads call `fetch` for several sources at once from a thread pool, hence the `Sync` bound.
/// Implementations over HTTP should report any non-2xx answer as [`SourceError::BadStatus`].
pub trait SourceFetcher: Sync {
    fn fetch(&self, uri: &str) -> Result<String, SourceError>;

    /// Fetches and decodes a visibility dataset, which may be written in JSON or YAML.
    fn fetch_visibility(&self, uri: &str) -> Result<VisibilityDataset, SourceError> {
        let text = self.fetch(uri)?;
        VisibilityDataset::loads(&text).context(MalformedVisibilitySnafu { uri })
    }
}

/// Reads sources from the local file system, relative to a root directory.
#[derive(Clone, Debug, Default)]
pub struct LocalFiles {
    root: PathBuf,
}

impl LocalFiles {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.root.join(uri)
    }
}

impl SourceFetcher for LocalFiles {
    fn fetch(&self, uri: &str) -> Result<String, SourceError> {
        let path = self.resolve(uri);
        debug!("reading {}", path.display());
        fs::read_to_string(&path).context(ReadSourceSnafu { uri })
    }
}
