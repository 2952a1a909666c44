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

use crate::model::{PromptValue, ResponseMode, ResponseType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The in-flight OIDC authorization attempt: born at `/authorize`, dies on
/// code redemption, on login failure (replaced by a fresh session), or on
/// expiry. Doubles as the code record once `code` is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCodeSession {
    pub session_id: Uuid,
    pub code: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub scope: String,
    pub response_type: Vec<ResponseType>,
    pub client_id: String,
    pub redirect_uri: String,
    pub nonce: Option<String>,
    pub state: Option<String>,
    pub max_age: Option<i64>,
    pub response_mode: ResponseMode,
    pub prompt: Vec<PromptValue>,
    pub project_name: String,
    pub user_id: Option<Uuid>,
    pub login_date: Option<DateTime<Utc>>,
}

impl AuthCodeSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn wants_consent(&self) -> bool {
        self.prompt.contains(&PromptValue::Consent)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthCodeSessionFilter {
    pub client_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub project_name: Option<String>,
}
