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
use crate::api::{base_url, load_project};
use crate::error::Result;
use crate::oidc::consent;
use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct ConsentForm {
    pub login_session_id: Uuid,
    pub select: String,
}

#[post("/openid-connect/consent")]
pub async fn consent(
    path: web::Path<String>,
    form: web::Form<ConsentForm>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let accepted = form.select == "yes";
    let redirect = consent::process_consent(&state.store, &project, &base_url(&req), form.login_session_id, accepted, Utc::now()).await?;
    Ok(HttpResponse::Found().insert_header(("Location", redirect)).finish())
}
