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

//! Turns an authenticated `AuthCodeSession` into a redirect carrying the
//! response types the authorize request asked for.

use super::build_redirect_url;
use crate::error::{Code, Error, Result};
use crate::model::{AuthCodeSession, Project, ResponseType};
use crate::storage::Store;
use crate::token;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub async fn issue_redirect(
    store: &Store,
    project: &Project,
    base_url: &str,
    session: &mut AuthCodeSession,
    now: DateTime<Utc>,
) -> Result<String> {
    let user_id = session
        .user_id
        .ok_or_else(|| Error::new(Code::ServerError, "auth code session has no authenticated user"))?;
    let login_date = session
        .login_date
        .ok_or_else(|| Error::new(Code::ServerError, "auth code session has no login date"))?;

    let mut params: Vec<(String, String)> = Vec::new();
    let mut keep_session = false;

    for response_type in session.response_type.clone() {
        match response_type {
            ResponseType::Code => {
                let code = Uuid::new_v4();
                session.code = Some(code);
                params.push(("code".to_string(), code.to_string()));
                keep_session = true;
            }
            ResponseType::IdToken => {
                let aud = vec![user_id.to_string(), session.client_id.clone()];
                let id_token = token::issue_id_token(
                    project,
                    base_url,
                    &user_id.to_string(),
                    aud,
                    session.nonce.clone(),
                    login_date,
                    session.max_age,
                    now,
                )?;
                params.push(("id_token".to_string(), id_token));
            }
            ResponseType::Token => {
                let user = store.users.get(&project.name, user_id).await?;
                let roles = super::resolve_roles(store, &project.name, &user).await?;
                let aud = vec![user_id.to_string(), session.client_id.clone()];
                let (access_token, _) = token::issue_access_token(project, base_url, &user_id.to_string(), aud, roles, now)?;
                params.push(("access_token".to_string(), access_token));
            }
        }
    }

    if let Some(state) = &session.state {
        params.push(("state".to_string(), state.clone()));
    }

    if keep_session {
        store.auth_code_sessions.update(session.clone()).await?;
    } else {
        store.auth_code_sessions.delete(&project.name, session.session_id).await?;
    }

    Ok(build_redirect_url(&session.redirect_uri, session.response_mode, &params))
}
