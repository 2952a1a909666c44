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
use crate::oidc::revoke;
use actix_web::{post, web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RevokeForm {
    pub token: String,
    pub token_type_hint: Option<String>,
}

#[post("/openid-connect/revoke")]
pub async fn revoke(
    path: web::Path<String>,
    form: web::Form<RevokeForm>,
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    revoke::revoke(&state.store, &project, &base_url(&req), &form.token, form.token_type_hint.as_deref()).await?;
    Ok(HttpResponse::Ok().finish())
}
