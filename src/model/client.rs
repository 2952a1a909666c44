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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    Public,
    Confidential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub project_name: String,
    pub secret: Option<String>,
    pub access_type: AccessType,
    pub created_at: DateTime<Utc>,
    pub allowed_callback_urls: Vec<String>,
}

impl Client {
    pub fn authenticate(&self, secret: Option<&str>) -> bool {
        match self.access_type {
            AccessType::Confidential => matches!((&self.secret, secret), (Some(expected), Some(given)) if expected == given),
            AccessType::Public => secret.is_none(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub id: Option<String>,
}
