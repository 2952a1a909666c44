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

//! Maps the OIDC engine (`crate::oidc`) onto HTTP. One `web::scope` per
//! project path prefix, storage/token capabilities injected via
//! `web::Data<AppState>` rather than read from a global, the way the
//! teacher wires `web::Data<DbPool>` in `src/api/mod.rs::run_api_server`.

pub mod endpoints;
pub mod pages;
pub mod state;

use crate::admin;
use crate::config::Config;
use crate::error::{Code, Error, Result};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpRequest, HttpServer};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use state::AppState;
use std::sync::Arc;

/// Reconstructs `<scheme>://<host>` from the inbound request, since the
/// issuer/endpoint URLs in the discovery document and JWT `iss` claim are
/// derived at request time rather than fixed at startup.
pub(crate) fn base_url(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    format!("{}://{}/api/v1", conn.scheme(), conn.host())
}

pub(crate) fn basic_auth(req: &HttpRequest) -> Option<(String, String)> {
    let header = req.headers().get(actix_web::http::header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

pub(crate) fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(actix_web::http::header::AUTHORIZATION)?.to_str().ok()?;
    header.strip_prefix("Bearer ").map(str::to_string)
}

pub(crate) async fn load_project(state: &AppState, name: &str) -> Result<crate::model::Project> {
    state
        .store
        .projects
        .get(name)
        .await
        .map_err(|_| Error::new(Code::NoSuchProject, "no such project"))
}

pub async fn run_server(config: Config, state: Arc<AppState>) -> std::io::Result<()> {
    let bind_address = config.server_bind_address.clone();
    let port = config.server_port;
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(state.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api/v1/project/{project}")
                    .service(endpoints::discovery::discovery_document)
                    .service(endpoints::certs::certs)
                    .service(endpoints::authorize::authorize_get)
                    .service(endpoints::authorize::authorize_post)
                    .service(endpoints::login::login)
                    .service(endpoints::consent::consent)
                    .service(endpoints::token::token)
                    .service(endpoints::revoke::revoke)
                    .service(endpoints::userinfo::userinfo_get)
                    .service(endpoints::userinfo::userinfo_post),
            )
            .service(
                web::scope("/adminapi/v1/project/{project}")
                    .service(admin::unlock::unlock_user),
            )
    })
    .bind((bind_address.as_str(), port))?
    .run()
    .await
}
