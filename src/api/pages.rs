/*
 *  idp-core - Multi-tenant OpenID Connect identity provider
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! The login/consent page renderer. Full templating (notice injection,
//! field echoing) is out of scope; the default implementation reads the
//! named file from the configured resource directory and returns it
//! verbatim, which is enough to serve a static or client-side-scripted
//! login form.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub trait LoginPageRenderer: Send + Sync {
    fn render(&self, page: &str) -> Result<String>;
}

pub struct FileLoginPageRenderer {
    root: PathBuf,
}

impl FileLoginPageRenderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LoginPageRenderer for FileLoginPageRenderer {
    fn render(&self, page: &str) -> Result<String> {
        let path = self.root.join(page);
        std::fs::read_to_string(&path).map_err(|e| Error::server(format!("failed to read {}: {e}", path.display())))
    }
}
