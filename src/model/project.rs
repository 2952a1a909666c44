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

use crate::model::GrantType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub const MASTER_PROJECT_NAME: &str = "master";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub access_token_lifespan: i64,
    pub refresh_token_lifespan: i64,
    /// Declared configurable but only RS256 is implemented; see `ValidateTokenSigningAlgorithm`.
    pub signing_algorithm: String,
    pub private_key_der: Vec<u8>,
    pub public_key_der: Vec<u8>,
    pub kid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub forbid_user_name: bool,
    pub blacklist: Vec<String>,
    pub require_alpha: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            forbid_user_name: true,
            blacklist: Vec::new(),
            require_alpha: true,
            require_digit: true,
            require_symbol: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLockPolicy {
    pub enabled: bool,
    pub max_login_failure: usize,
    pub lock_duration_secs: i64,
    pub failure_reset_time_secs: i64,
}

impl Default for UserLockPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            max_login_failure: 5,
            lock_duration_secs: 1800,
            failure_reset_time_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub permit_delete: bool,
    pub token_config: TokenConfig,
    pub password_policy: PasswordPolicy,
    pub allow_grant_types: HashSet<GrantType>,
    pub user_lock: UserLockPolicy,
}

impl Project {
    pub fn allows(&self, grant: GrantType) -> bool {
        self.allow_grant_types.contains(&grant)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectFilter {
    pub name: Option<String>,
}
