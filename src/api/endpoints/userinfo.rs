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
use crate::api::{base_url, bearer_token, load_project};
use crate::error::{Code, Error, Result};
use crate::oidc::userinfo;
use actix_web::http::header::{CACHE_CONTROL, PRAGMA};
use actix_web::{get, post, web, HttpRequest, HttpResponse};

async fn handle(path: web::Path<String>, state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let project = load_project(&state, &path).await?;
    let token = bearer_token(&req).ok_or_else(|| Error::new(Code::RequestUnauthorized, "missing bearer token"))?;
    let info = userinfo::userinfo(&state.store, &project, &base_url(&req), &token).await?;
    Ok(HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, "no-store"))
        .insert_header((PRAGMA, "no-cache"))
        .json(info))
}

#[get("/openid-connect/userinfo")]
pub async fn userinfo_get(path: web::Path<String>, state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    handle(path, state, req).await
}

#[post("/openid-connect/userinfo")]
pub async fn userinfo_post(path: web::Path<String>, state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    handle(path, state, req).await
}
