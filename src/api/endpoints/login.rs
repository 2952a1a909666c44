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
use crate::oidc::login::{self, LoginOutcome};
use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub login_session_id: Uuid,
    pub user_name: String,
    pub password: String,
}

#[post("/openid-connect/login")]
pub async fn login(
    path: web::Path<String>,
    form: web::Form<LoginForm>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let outcome = login::process_login(
        &state.store,
        &project,
        form.login_session_id,
        &form.user_name,
        &form.password,
        Utc::now(),
    )
    .await?;

    match outcome {
        LoginOutcome::Retry(session) => {
            let body = state.pages.render("index.html")?;
            Ok(HttpResponse::Ok()
                .insert_header(("X-Login-Session-Id", session.session_id.to_string()))
                .content_type("text/html; charset=utf-8")
                .body(body))
        }
        LoginOutcome::NeedsConsent(session) => {
            let body = state.pages.render("consent.html")?;
            Ok(HttpResponse::Ok()
                .insert_header(("X-Login-Session-Id", session.session_id.to_string()))
                .content_type("text/html; charset=utf-8")
                .body(body))
        }
        LoginOutcome::ReadyToIssue(mut session) => {
            let redirect =
                crate::oidc::issue::issue_redirect(&state.store, &project, &crate::api::base_url(&req), &mut session, Utc::now()).await?;
            Ok(HttpResponse::Found().insert_header(("Location", redirect)).finish())
        }
    }
}
