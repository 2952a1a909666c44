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

use crate::api::load_project;
use crate::api::state::AppState;
use crate::error::Result;
use crate::oidc::authorize::{self, AuthorizeParams};
use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizeForm {
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

impl From<AuthorizeForm> for AuthorizeParams {
    fn from(form: AuthorizeForm) -> Self {
        AuthorizeParams {
            scope: form.scope,
            response_type: form.response_type,
            client_id: form.client_id,
            redirect_uri: form.redirect_uri,
            state: form.state,
            nonce: form.nonce,
            max_age: form.max_age,
            response_mode: form.response_mode,
            prompt: form.prompt,
        }
    }
}

async fn start(path: &str, state: &AppState, params: AuthorizeParams) -> Result<HttpResponse> {
    let project = load_project(state, path).await?;
    let session = authorize::start_authorization(&state.store, &project.name, params, state.login_session_expires_in, Utc::now()).await?;
    let body = state.pages.render("index.html")?;
    Ok(HttpResponse::Ok()
        .insert_header(("X-Login-Session-Id", session.session_id.to_string()))
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[get("/openid-connect/auth")]
pub async fn authorize_get(
    path: web::Path<String>,
    query: web::Query<AuthorizeForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    start(&path, &state, query.into_inner().into()).await
}

#[post("/openid-connect/auth")]
pub async fn authorize_post(
    path: web::Path<String>,
    form: web::Form<AuthorizeForm>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    start(&path, &state, form.into_inner().into()).await
}
