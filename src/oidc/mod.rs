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

//! The OIDC/OAuth2 protocol engine: authorize request validation, the
//! login/consent state machine, the four grant handlers, revocation, and
//! userinfo. C7 maps HTTP onto these functions; nothing here depends on
//! actix-web.

pub mod authorize;
pub mod consent;
pub mod discovery;
pub mod issue;
pub mod login;
pub mod redirect;
pub mod revoke;
pub mod token_endpoint;
pub mod userinfo;

use crate::error::Result;
use crate::model::ResponseMode;
use crate::model::User;
use crate::storage::Store;

/// Flattens a user's system roles and resolved custom-role names into one
/// list, the shape access tokens carry in their `roles` claim.
pub async fn resolve_roles(store: &Store, project_name: &str, user: &User) -> Result<Vec<String>> {
    let mut roles = user.system_roles.clone();
    for role_id in &user.custom_roles {
        if let Ok(role) = store.custom_roles.get(project_name, *role_id).await {
            roles.push(role.name);
        }
    }
    Ok(roles)
}

/// Renders a set of response parameters onto a redirect URI, as a query
/// string or a fragment depending on the negotiated `response_mode`.
pub(crate) fn build_redirect_url(base: &str, mode: ResponseMode, params: &[(String, String)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    match mode {
        ResponseMode::Query => {
            let separator = if base.contains('?') { "&" } else { "?" };
            format!("{}{}{}", base, separator, query)
        }
        ResponseMode::Fragment => format!("{}#{}", base, query),
    }
}
