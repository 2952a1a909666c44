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
use crate::oidc::discovery;
use actix_web::{get, web, HttpRequest, HttpResponse};

#[get("/.well-known/openid-configuration")]
pub async fn discovery_document(
    path: web::Path<String>,
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let document = discovery::discovery_document(&project, &base_url(&req));
    Ok(HttpResponse::Ok().json(document))
}
