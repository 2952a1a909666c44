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

//! `/authorize` (GET or POST): validates the request and opens a login
//! session, keyed by a fresh `AuthCodeSession`.

use super::redirect;
use crate::error::{Code, Error, Result};
use crate::model::types::parse_space_separated;
use crate::model::{AuthCodeSession, PromptValue, ResponseMode, ResponseType};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct AuthorizeParams {
    pub scope: String,
    pub response_type: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub state: Option<String>,
    pub nonce: Option<String>,
    pub max_age: Option<i64>,
    pub response_mode: Option<String>,
    pub prompt: Option<String>,
}

pub async fn start_authorization(
    store: &Store,
    project_name: &str,
    params: AuthorizeParams,
    login_session_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<AuthCodeSession> {
    if !params.scope.split_whitespace().any(|scope| scope == "openid") {
        return Err(Error::new(Code::InvalidRequest, "scope must contain openid"));
    }

    let response_type: Vec<ResponseType> = parse_space_separated(&params.response_type, ResponseType::parse)
        .filter(|types| !types.is_empty())
        .ok_or_else(|| Error::new(Code::UnsupportedResponseType, "unsupported response_type"))?;

    let response_mode = match &params.response_mode {
        Some(raw) => {
            ResponseMode::parse(raw).ok_or_else(|| Error::new(Code::InvalidRequest, "invalid response_mode"))?
        }
        None if response_type == [ResponseType::Code] => ResponseMode::Query,
        None => ResponseMode::Fragment,
    };

    let client = store
        .clients
        .get(project_name, &params.client_id)
        .await
        .map_err(|_| Error::new(Code::InvalidClient, "no such client"))?;

    redirect::find_match(&client.allowed_callback_urls, &params.redirect_uri)
        .ok_or_else(|| Error::new(Code::InvalidRequest, "redirect_uri is not allowed for this client"))?;

    let prompt = match &params.prompt {
        Some(raw) => {
            parse_space_separated(raw, PromptValue::parse).ok_or_else(|| Error::new(Code::InvalidRequest, "invalid prompt"))?
        }
        None => Vec::new(),
    };

    let session = AuthCodeSession {
        session_id: Uuid::new_v4(),
        code: None,
        expires_at: now + chrono::Duration::seconds(login_session_expires_in),
        scope: params.scope,
        response_type,
        client_id: params.client_id,
        redirect_uri: params.redirect_uri,
        nonce: params.nonce,
        state: params.state,
        max_age: params.max_age,
        response_mode,
        prompt,
        project_name: project_name.to_string(),
        user_id: None,
        login_date: None,
    };
    store.auth_code_sessions.add(session.clone()).await?;
    Ok(session)
}
