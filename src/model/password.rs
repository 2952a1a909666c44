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

//! Memory-hard password hashing. The source this project was reimplemented
//! from stores a plain, unsalted SHA-256 digest; that behavior is explicitly
//! not carried forward. Hashes here are Argon2id PHC strings, which already
//! encode `(algorithm, params, salt, hash)` in one self-describing value.

use crate::error::{Code, Error, Result};
use argon2::Argon2;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;

pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hasher = Argon2::default();
    let hash = hasher
        .hash_password(password.as_bytes(), &salt)
        .map_err(Error::from)?;
    Ok(hash.to_string())
}

pub fn verify(password: &str, phc: &str) -> Result<bool> {
    let parsed = PasswordHash::new(phc).map_err(Error::from)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::from(e)),
    }
}

pub fn require(password: &str, phc: &str) -> Result<()> {
    if verify(password, phc)? {
        Ok(())
    } else {
        Err(Error::new(Code::RequestUnauthorized, "invalid user name or password"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let phc = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &phc).unwrap());
        assert!(!verify("wrong password", &phc).unwrap());
    }

    #[test]
    fn hash_uses_distinct_salts() {
        let a = hash("same-password").unwrap();
        let b = hash("same-password").unwrap();
        assert_ne!(a, b);
    }
}
