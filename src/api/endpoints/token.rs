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

use crate::api::state::AppState;
use crate::api::{base_url, basic_auth, load_project};
use crate::error::Result;
use crate::oidc::token_endpoint::{self, TokenRequest};
use actix_web::http::header::{CACHE_CONTROL, PRAGMA};
use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenForm {
    pub grant_type: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

impl From<TokenForm> for TokenRequest {
    fn from(form: TokenForm) -> Self {
        TokenRequest {
            grant_type: form.grant_type,
            client_id: form.client_id,
            client_secret: form.client_secret,
            code: form.code,
            redirect_uri: form.redirect_uri,
            username: form.username,
            password: form.password,
            refresh_token: form.refresh_token,
        }
    }
}

#[post("/openid-connect/token")]
pub async fn token(
    path: web::Path<String>,
    form: web::Form<TokenForm>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let basic = basic_auth(&req);
    let response = token_endpoint::handle_token_request(
        &state.store,
        &project,
        &base_url(&req),
        form.into_inner().into(),
        basic.as_ref().map(|(u, p)| (u.as_str(), p.as_str())),
        state.sso_expires_in,
        Utc::now(),
    )
    .await?;

    Ok(HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, "no-store"))
        .insert_header((PRAGMA, "no-cache"))
        .json(response))
}
