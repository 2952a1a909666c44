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
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockState {
    pub locked: bool,
    pub verify_failed_times: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub project_name: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// PHC-encoded `(algorithm, params, salt, hash)` — see `model::password`.
    pub password_hash: String,
    pub system_roles: Vec<String>,
    pub custom_roles: Vec<Uuid>,
    pub lock_state: LockState,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
}

pub enum RoleType {
    System,
    Custom,
}
