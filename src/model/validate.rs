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

use crate::error::{Code, Error, Result};
use crate::model::PasswordPolicy;
use uuid::Uuid;

fn matches_charset(s: &str, allowed: impl Fn(char) -> bool) -> bool {
    !s.is_empty() && s.chars().all(allowed)
}

pub fn validate_project_name(name: &str) -> Result<()> {
    let ok = (3..=64).contains(&name.len())
        && matches_charset(name, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(Error::new(Code::ValidateFailed, "invalid project name"))
    }
}

pub fn validate_user_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| Error::new(Code::ValidateFailed, "invalid user id"))
}

pub fn validate_user_name(name: &str) -> Result<()> {
    let ok = (1..=64).contains(&name.len())
        && matches_charset(name, |c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '@' | '-')
        });
    if ok {
        Ok(())
    } else {
        Err(Error::new(Code::ValidateFailed, "invalid user name"))
    }
}

pub fn validate_client_id(id: &str) -> Result<()> {
    if id.is_empty() {
        Err(Error::new(Code::ValidateFailed, "invalid client id"))
    } else {
        Ok(())
    }
}

pub fn validate_token_signing_algorithm(algo: &str) -> Result<()> {
    if algo == "RS256" {
        Ok(())
    } else {
        Err(Error::new(
            Code::ValidateFailed,
            "only RS256 is a supported signing algorithm",
        ))
    }
}

pub fn validate_lifespan(seconds: i64) -> Result<()> {
    if seconds >= 1 {
        Ok(())
    } else {
        Err(Error::new(Code::ValidateFailed, "lifespan must be at least 1 second"))
    }
}

/// Fails with `password_policy_failed` per the first violated rule, in the
/// order: length, user-name containment, blacklist, character classes.
pub fn check_password(user_name: &str, password: &str, policy: &PasswordPolicy) -> Result<()> {
    let fail = |reason: &str| Err(Error::new(Code::PasswordPolicyFailed, reason));

    if password.len() < policy.min_length {
        return fail("password is shorter than the minimum length");
    }
    if policy.forbid_user_name && !user_name.is_empty() && password.contains(user_name) {
        return fail("password must not contain the user name");
    }
    if policy
        .blacklist
        .iter()
        .any(|term| !term.is_empty() && password.contains(term.as_str()))
    {
        return fail("password contains a blacklisted term");
    }
    if policy.require_alpha && !password.chars().any(|c| c.is_alphabetic()) {
        return fail("password must contain an alphabetic character");
    }
    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("password must contain a digit");
    }
    if policy.require_symbol && !password.chars().any(|c| !c.is_alphanumeric()) {
        return fail("password must contain a symbol");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy {
            min_length: 8,
            forbid_user_name: true,
            blacklist: vec!["hunter2".to_string()],
            require_alpha: true,
            require_digit: true,
            require_symbol: false,
        }
    }

    #[test]
    fn rejects_short_passwords() {
        let err = check_password("alice", "sh0rt", &policy()).unwrap_err();
        assert_eq!(err.code(), &Code::PasswordPolicyFailed);
    }

    #[test]
    fn rejects_passwords_containing_the_user_name() {
        assert!(check_password("alice", "alice12345", &policy()).is_err());
    }

    #[test]
    fn rejects_blacklisted_terms() {
        assert!(check_password("bob", "xhunter2xx", &policy()).is_err());
    }

    #[test]
    fn accepts_a_compliant_password() {
        assert!(check_password("bob", "correcthorse9", &policy()).is_ok());
    }

    #[test]
    fn strengthening_policy_never_turns_a_rejection_into_an_acceptance() {
        let weak = PasswordPolicy {
            min_length: 4,
            ..policy()
        };
        let strong = PasswordPolicy {
            min_length: 12,
            ..policy()
        };
        let candidate = "abc123";
        if check_password("u", candidate, &weak).is_err() {
            assert!(check_password("u", candidate, &strong).is_err());
        }
    }

    #[test]
    fn project_name_validation() {
        assert!(validate_project_name("master").is_ok());
        assert!(validate_project_name("a b").is_err());
        assert!(validate_project_name("ab").is_err());
    }
}
