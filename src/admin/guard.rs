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

//! `AdminPrincipal`: a bearer-token `FromRequest` guard resolving a
//! validated access token into `(project_name, roles)`, the way the
//! teacher's `Authority` extractor resolves `UserClaims` from a JWT —
//! without the `actix-jwt-auth-middleware` dependency this crate dropped.

use crate::api::state::AppState;
use crate::api::{base_url, bearer_token, load_project};
use crate::error::{Code, Error};
use crate::token;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::Future;
use std::pin::Pin;

pub struct AdminPrincipal {
    pub project_name: String,
    pub roles: Vec<String>,
}

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| Error::server("AppState not configured"))?
                .clone();
            let project_name = req
                .match_info()
                .get("project")
                .ok_or_else(|| Error::new(Code::NoSuchProject, "project not present in path"))?
                .to_string();
            let project = load_project(&state, &project_name).await?;
            let raw = bearer_token(&req).ok_or_else(|| Error::new(Code::RequestUnauthorized, "missing bearer token"))?;
            let claims = token::validate_access_token(&raw, &project, &base_url(&req))?;
            Ok(AdminPrincipal {
                project_name,
                roles: claims.roles,
            })
        })
    }
}
