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

use crate::model::Project;
use crate::token;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub jwks_uri: String,
    pub revocation_endpoint: String,
    pub response_types_supported: Vec<&'static str>,
    pub subject_types_supported: Vec<&'static str>,
    pub id_token_signing_alg_values_supported: Vec<&'static str>,
    pub response_modes_supported: Vec<&'static str>,
    pub grant_types_supported: Vec<&'static str>,
    pub scopes_supported: Vec<&'static str>,
}

pub fn discovery_document(project: &Project, base_url: &str) -> DiscoveryDocument {
    let issuer = token::issuer(base_url, &project.name);
    DiscoveryDocument {
        authorization_endpoint: format!("{}/openid-connect/auth", issuer),
        token_endpoint: format!("{}/openid-connect/token", issuer),
        userinfo_endpoint: format!("{}/openid-connect/userinfo", issuer),
        jwks_uri: format!("{}/openid-connect/certs", issuer),
        revocation_endpoint: format!("{}/openid-connect/revoke", issuer),
        response_types_supported: vec![
            "code",
            "id_token",
            "token",
            "code id_token",
            "code token",
            "id_token token",
            "code id_token token",
        ],
        subject_types_supported: vec!["public"],
        id_token_signing_alg_values_supported: vec!["RS256"],
        response_modes_supported: vec!["query", "fragment"],
        grant_types_supported: project.allow_grant_types.iter().map(|grant| grant.as_str()).collect(),
        scopes_supported: vec!["openid"],
        issuer,
    }
}
