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

//! Issue and validate RS256 JWTs over a project's signing key, and publish
//! its JWKS. Per-project key pairs are generated once at project creation
//! and never rotated (rotation is out of scope, see SPEC_FULL.md's Non-goals).

pub mod claims;
pub mod jwk;

use crate::error::{Code, Error, Result};
use crate::model::Project;
use chrono::{DateTime, Utc};
use claims::{AccessTokenClaims, CommonClaims, IdTokenClaims, RefreshTokenClaims};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use jwk::JwkSet;
use moka::sync::Cache;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::Arc;
use uuid::Uuid;

const RSA_KEY_BITS: usize = 2048;

/// Generates a fresh RSA key pair for a newly-created project, DER (PKCS#1)
/// encoded, along with the `kid` minted for it.
pub fn generate_key_pair() -> Result<(Vec<u8>, Vec<u8>, Uuid)> {
    let mut rng = rand::rngs::OsRng;
    let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS).map_err(Error::from)?;
    let public_key = RsaPublicKey::from(&private_key);
    let private_der = private_key.to_pkcs1_der().map_err(Error::from)?.as_bytes().to_vec();
    let public_der = public_key.to_pkcs1_der().map_err(Error::from)?.as_bytes().to_vec();
    Ok((private_der, public_der, Uuid::new_v4()))
}

/// `<base>/project/<project_name>`, where `base` already carries the
/// `<scheme>://<host>/api/v1` prefix per the discovery document's literal
/// `issuer` value.
pub fn issuer(base: &str, project_name: &str) -> String {
    format!("{}/project/{}", base, project_name)
}

fn header(kid: &Uuid) -> Header {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    header
}

fn encoding_key(project: &Project) -> Result<EncodingKey> {
    Ok(EncodingKey::from_rsa_der(&project.token_config.private_key_der))
}

fn decoding_key(project: &Project) -> Result<DecodingKey> {
    Ok(DecodingKey::from_rsa_der(&project.token_config.public_key_der))
}

fn common_claims(
    project: &Project,
    base_url: &str,
    sub: &str,
    aud: Vec<String>,
    now: DateTime<Utc>,
    lifespan_secs: i64,
) -> CommonClaims {
    CommonClaims {
        iss: issuer(base_url, &project.name),
        sub: sub.to_string(),
        aud,
        exp: (now + chrono::Duration::seconds(lifespan_secs)).timestamp(),
        iat: now.timestamp(),
        nbf: now.timestamp(),
        jti: Uuid::new_v4(),
    }
}

pub fn issue_access_token(
    project: &Project,
    base_url: &str,
    sub: &str,
    aud: Vec<String>,
    roles: Vec<String>,
    now: DateTime<Utc>,
) -> Result<(String, i64)> {
    let lifespan = project.token_config.access_token_lifespan;
    let claims = AccessTokenClaims {
        common: common_claims(project, base_url, sub, aud, now, lifespan),
        roles,
    };
    let token = encode(&header(&project.token_config.kid), &claims, &encoding_key(project)?)?;
    Ok((token, lifespan))
}

pub fn issue_refresh_token(
    project: &Project,
    base_url: &str,
    sub: &str,
    aud: Vec<String>,
    session_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(String, i64)> {
    let lifespan = project.token_config.refresh_token_lifespan;
    let claims = RefreshTokenClaims {
        common: common_claims(project, base_url, sub, aud, now, lifespan),
        session_id,
    };
    let token = encode(&header(&project.token_config.kid), &claims, &encoding_key(project)?)?;
    Ok((token, lifespan))
}

#[allow(clippy::too_many_arguments)]
pub fn issue_id_token(
    project: &Project,
    base_url: &str,
    sub: &str,
    aud: Vec<String>,
    nonce: Option<String>,
    auth_time: DateTime<Utc>,
    max_age: Option<i64>,
    now: DateTime<Utc>,
) -> Result<String> {
    if let Some(max_age) = max_age {
        if (now - auth_time).num_seconds() > max_age {
            return Err(Error::new(Code::AccessDenied, "authentication is older than max_age"));
        }
    }
    let lifespan = project.token_config.access_token_lifespan;
    let claims = IdTokenClaims {
        common: common_claims(project, base_url, sub, aud, now, lifespan),
        auth_time: auth_time.timestamp(),
        nonce,
    };
    encode(&header(&project.token_config.kid), &claims, &encoding_key(project)?).map_err(Error::from)
}

fn validation(expected_issuer: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[expected_issuer]);
    validation.validate_nbf = true;
    validation
}

pub fn validate_access_token(
    raw: &str,
    project: &Project,
    base_url: &str,
) -> Result<AccessTokenClaims> {
    let expected_issuer = issuer(base_url, &project.name);
    let data = decode::<AccessTokenClaims>(raw, &decoding_key(project)?, &validation(&expected_issuer))?;
    Ok(data.claims)
}

pub fn validate_refresh_token(
    raw: &str,
    project: &Project,
    base_url: &str,
) -> Result<RefreshTokenClaims> {
    let expected_issuer = issuer(base_url, &project.name);
    let data = decode::<RefreshTokenClaims>(raw, &decoding_key(project)?, &validation(&expected_issuer))?;
    Ok(data.claims)
}

/// Per-project JWKS cache, invalidated only on key rotation (not implemented,
/// see SPEC_FULL.md's Non-goals), mirroring the teacher's per-key `moka`
/// cache in `src/api/middleware/authority/service.rs`.
#[derive(Clone)]
pub struct JwksCache {
    cache: Cache<String, Arc<JwkSet>>,
}

impl Default for JwksCache {
    fn default() -> Self {
        Self {
            cache: Cache::new(1_000),
        }
    }
}

impl JwksCache {
    pub fn get_or_build(&self, project: &Project) -> Result<Arc<JwkSet>> {
        if let Some(set) = self.cache.get(&project.name) {
            return Ok(set);
        }
        let set = Arc::new(jwk::jwk_set_for(&project.token_config.public_key_der, project.token_config.kid)?);
        self.cache.insert(project.name.clone(), set.clone());
        Ok(set)
    }
}
