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

use crate::error::{Code, Error, Result};
use crate::model::Project;
use crate::storage::Store;
use crate::token;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub sub: String,
    pub preferred_username: String,
}

pub async fn userinfo(store: &Store, project: &Project, base_url: &str, bearer_token: &str) -> Result<UserInfo> {
    let claims = token::validate_access_token(bearer_token, project, base_url)?;
    let user_id = Uuid::parse_str(&claims.common.sub).map_err(|_| Error::new(Code::RequestUnauthorized, "invalid subject claim"))?;
    let user = store
        .users
        .get(&project.name, user_id)
        .await
        .map_err(|_| Error::new(Code::RequestUnauthorized, "user no longer exists"))?;
    Ok(UserInfo {
        sub: user.id.to_string(),
        preferred_username: user.name,
    })
}
