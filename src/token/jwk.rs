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

//! JWKS publication: project RSA public keys rendered as `{kty, n, e, ...}`.

use crate::error::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct Jwk {
    pub kid: String,
    pub alg: &'static str,
    #[serde(rename = "use")]
    pub use_: &'static str,
    pub kty: &'static str,
    pub n: String,
    pub e: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

/// Builds the one-key JWK set for a project from its DER (PKCS#1) public key.
pub fn jwk_set_for(public_key_der: &[u8], kid: Uuid) -> Result<JwkSet> {
    let public_key = RsaPublicKey::from_pkcs1_der(public_key_der)?;
    let n = URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be());
    let e = URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be());
    Ok(JwkSet {
        keys: vec![Jwk {
            kid: kid.to_string(),
            alg: "RS256",
            use_: "sig",
            kty: "RSA",
            n,
            e,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs1::EncodeRsaPublicKey;
    use rsa::{RsaPrivateKey, RsaPublicKey as RsaPub};

    #[test]
    fn jwk_round_trips_modulus_and_exponent() {
        let mut rng = rand::rngs::OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        let public_key = RsaPub::from(&private_key);
        let der = public_key.to_pkcs1_der().unwrap();
        let kid = Uuid::new_v4();

        let set = jwk_set_for(der.as_bytes(), kid).unwrap();
        assert_eq!(set.keys.len(), 1);
        let jwk = &set.keys[0];
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.kid, kid.to_string());

        let decoded_n = URL_SAFE_NO_PAD.decode(&jwk.n).unwrap();
        assert_eq!(decoded_n, public_key.n().to_bytes_be());
    }
}
