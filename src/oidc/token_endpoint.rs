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

//! `/token`: client authentication, grant dispatch, and the four grant
//! handlers (`authorization_code`, `password`, `client_credentials`,
//! `refresh_token`).

use super::{login, redirect, resolve_roles};
use crate::error::{Code, Error, Result};
use crate::model::{AccessType, Client, GrantType, Project, Session};
use crate::storage::Store;
use crate::token;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token_type: &'static str,
    pub access_token: String,
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_expires_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

async fn authenticate_client(
    store: &Store,
    project_name: &str,
    form_client_id: Option<&str>,
    form_secret: Option<&str>,
    basic_auth: Option<(&str, &str)>,
) -> Result<Client> {
    let (client_id, secret) = if let Some(id) = form_client_id {
        (id.to_string(), form_secret.map(str::to_string))
    } else if let Some((id, secret)) = basic_auth {
        (id.to_string(), Some(secret.to_string()))
    } else {
        return Err(Error::new(Code::InvalidClient, "missing client credentials"));
    };

    let client = store
        .clients
        .get(project_name, &client_id)
        .await
        .map_err(|_| Error::new(Code::InvalidClient, "no such client"))?;
    if !client.authenticate(secret.as_deref()) {
        return Err(Error::new(Code::InvalidClient, "client authentication failed"));
    }
    Ok(client)
}

async fn new_session(
    store: &Store,
    project: &Project,
    user_id: Uuid,
    from_ip: Option<String>,
    sso_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<Session> {
    let session = Session {
        session_id: Uuid::new_v4(),
        project_name: project.name.clone(),
        user_id,
        created_at: now,
        expires_in: sso_expires_in,
        from_ip,
    };
    store.sessions.new_session(session.clone()).await?;
    Ok(session)
}

#[allow(clippy::too_many_arguments)]
pub async fn handle_token_request(
    store: &Store,
    project: &Project,
    base_url: &str,
    req: TokenRequest,
    basic_auth: Option<(&str, &str)>,
    sso_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<TokenResponse> {
    let client = authenticate_client(
        store,
        &project.name,
        req.client_id.as_deref(),
        req.client_secret.as_deref(),
        basic_auth,
    )
    .await?;

    if let Some(redirect_uri) = &req.redirect_uri {
        redirect::find_match(&client.allowed_callback_urls, redirect_uri)
            .ok_or_else(|| Error::new(Code::InvalidRequest, "redirect_uri is not allowed for this client"))?;
    }

    let grant = GrantType::parse(&req.grant_type)
        .ok_or_else(|| Error::new(Code::UnsupportedGrantType, "unrecognized grant_type"))?;
    if !project.allows(grant) {
        return Err(Error::new(Code::UnsupportedGrantType, "grant type is not enabled for this project"));
    }

    match grant {
        GrantType::AuthorizationCode => {
            authorization_code_grant(store, project, base_url, &client, req, sso_expires_in, now).await
        }
        GrantType::Password => password_grant(store, project, base_url, &client, req, sso_expires_in, now).await,
        GrantType::ClientCredentials => client_credentials_grant(project, base_url, &client, now).await,
        GrantType::RefreshToken => {
            refresh_token_grant(store, project, base_url, &client, req, sso_expires_in, now).await
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn authorization_code_grant(
    store: &Store,
    project: &Project,
    base_url: &str,
    client: &Client,
    req: TokenRequest,
    sso_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<TokenResponse> {
    let code_raw = req.code.ok_or_else(|| Error::new(Code::InvalidRequest, "missing code"))?;
    let code = Uuid::parse_str(&code_raw).map_err(|_| Error::new(Code::InvalidGrant, "malformed authorization code"))?;

    let session = store
        .auth_code_sessions
        .get_by_code(&project.name, code)
        .await
        .map_err(|_| Error::new(Code::InvalidGrant, "invalid or expired authorization code"))?;
    if session.client_id != client.id {
        return Err(Error::new(Code::InvalidGrant, "authorization code was issued to a different client"));
    }
    let user_id = session
        .user_id
        .ok_or_else(|| Error::new(Code::InvalidGrant, "authorization code has no associated user"))?;
    let auth_session_id = session.session_id;

    let user = store.users.get(&project.name, user_id).await?;
    let roles = resolve_roles(store, &project.name, &user).await?;
    // Consuming the authorization code and replacing it with a session must
    // land together: a failure between the two would leave the code consumed
    // with no session to show for it.
    let new_session = store
        .transactions
        .transaction(&project.name, || async {
            store.auth_code_sessions.delete(&project.name, auth_session_id).await?;
            new_session(store, project, user_id, None, sso_expires_in, now).await
        })
        .await?;

    let aud = vec![user_id.to_string(), client.id.clone()];
    let (access_token, expires_in) = token::issue_access_token(project, base_url, &user_id.to_string(), aud.clone(), roles, now)?;
    let (refresh_token, refresh_expires_in) =
        token::issue_refresh_token(project, base_url, &user_id.to_string(), aud.clone(), new_session.session_id, now)?;
    let id_token = token::issue_id_token(
        project,
        base_url,
        &user_id.to_string(),
        aud,
        session.nonce.clone(),
        session.login_date.unwrap_or(now),
        session.max_age,
        now,
    )?;

    Ok(TokenResponse {
        token_type: "Bearer",
        access_token,
        expires_in,
        refresh_token: Some(refresh_token),
        refresh_expires_in: Some(refresh_expires_in),
        id_token: Some(id_token),
    })
}

async fn password_grant(
    store: &Store,
    project: &Project,
    base_url: &str,
    client: &Client,
    req: TokenRequest,
    sso_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<TokenResponse> {
    let username = req.username.ok_or_else(|| Error::new(Code::InvalidRequest, "missing username"))?;
    let password_candidate = req.password.ok_or_else(|| Error::new(Code::InvalidRequest, "missing password"))?;

    let user = login::authenticate_user(store, project, &username, &password_candidate, now).await?;
    let roles = resolve_roles(store, &project.name, &user).await?;
    let new_session = new_session(store, project, user.id, None, sso_expires_in, now).await?;

    let aud = vec![user.id.to_string(), client.id.clone()];
    let (access_token, expires_in) = token::issue_access_token(project, base_url, &user.id.to_string(), aud.clone(), roles, now)?;
    let (refresh_token, refresh_expires_in) =
        token::issue_refresh_token(project, base_url, &user.id.to_string(), aud, new_session.session_id, now)?;

    Ok(TokenResponse {
        token_type: "Bearer",
        access_token,
        expires_in,
        refresh_token: Some(refresh_token),
        refresh_expires_in: Some(refresh_expires_in),
        id_token: None,
    })
}

async fn client_credentials_grant(
    project: &Project,
    base_url: &str,
    client: &Client,
    now: DateTime<Utc>,
) -> Result<TokenResponse> {
    if client.access_type != AccessType::Confidential {
        return Err(Error::new(Code::AccessDenied, "client_credentials requires a confidential client"));
    }
    let aud = vec![client.id.clone()];
    let (access_token, expires_in) = token::issue_access_token(project, base_url, "", aud, Vec::new(), now)?;
    Ok(TokenResponse {
        token_type: "Bearer",
        access_token,
        expires_in,
        refresh_token: None,
        refresh_expires_in: None,
        id_token: None,
    })
}

#[allow(clippy::too_many_arguments)]
async fn refresh_token_grant(
    store: &Store,
    project: &Project,
    base_url: &str,
    client: &Client,
    req: TokenRequest,
    sso_expires_in: i64,
    now: DateTime<Utc>,
) -> Result<TokenResponse> {
    let raw = req
        .refresh_token
        .ok_or_else(|| Error::new(Code::InvalidRequest, "missing refresh_token"))?;
    let claims = token::validate_refresh_token(&raw, project, base_url)?;
    if !claims.common.aud.iter().any(|aud| aud == &client.id) {
        return Err(Error::new(Code::InvalidGrant, "refresh token was not issued to this client"));
    }

    let old_session = store
        .sessions
        .get(&project.name, claims.session_id)
        .await
        .map_err(|_| Error::new(Code::InvalidRequest, "refresh token has already been revoked"))?;
    let old_session_id = old_session.session_id;

    let user = store.users.get(&project.name, old_session.user_id).await?;
    let roles = resolve_roles(store, &project.name, &user).await?;
    // Rotating the refresh token must retire the old session and mint the
    // new one as a single unit, or a mid-flight failure burns the old
    // session without leaving a replacement behind.
    let new_session = store
        .transactions
        .transaction(&project.name, || async {
            store.sessions.delete(&project.name, old_session_id).await?;
            new_session(store, project, user.id, old_session.from_ip.clone(), sso_expires_in, now).await
        })
        .await?;

    let aud = vec![user.id.to_string(), client.id.clone()];
    let (access_token, expires_in) = token::issue_access_token(project, base_url, &user.id.to_string(), aud.clone(), roles, now)?;
    let (refresh_token, refresh_expires_in) =
        token::issue_refresh_token(project, base_url, &user.id.to_string(), aud, new_session.session_id, now)?;

    Ok(TokenResponse {
        token_type: "Bearer",
        access_token,
        expires_in,
        refresh_token: Some(refresh_token),
        refresh_expires_in: Some(refresh_expires_in),
        id_token: None,
    })
}
