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
use actix_web::{get, web, HttpResponse};

#[get("/openid-connect/certs")]
pub async fn certs(path: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let jwks = state.jwks_cache.get_or_build(&project)?;
    Ok(HttpResponse::Ok().json(jwks.as_ref()))
}
