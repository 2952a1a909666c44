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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrantType {
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "client_credentials")]
    ClientCredentials,
    #[serde(rename = "refresh_token")]
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::Password => "password",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "authorization_code" => Some(GrantType::AuthorizationCode),
            "password" => Some(GrantType::Password),
            "client_credentials" => Some(GrantType::ClientCredentials),
            "refresh_token" => Some(GrantType::RefreshToken),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    Code,
    IdToken,
    Token,
}

impl ResponseType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "code" => Some(ResponseType::Code),
            "id_token" => Some(ResponseType::IdToken),
            "token" => Some(ResponseType::Token),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Code => "code",
            ResponseType::IdToken => "id_token",
            ResponseType::Token => "token",
        }
    }
}

/// Space-separated `response_type`/`prompt` query parameters parsed as lists.
pub fn parse_space_separated<T>(raw: &str, parse_one: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    raw.split_whitespace().map(parse_one).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseMode {
    Query,
    Fragment,
}

impl ResponseMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(ResponseMode::Query),
            "fragment" => Some(ResponseMode::Fragment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Query => "query",
            ResponseMode::Fragment => "fragment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptValue {
    None,
    Login,
    Consent,
    SelectAccount,
}

impl PromptValue {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(PromptValue::None),
            "login" => Some(PromptValue::Login),
            "consent" => Some(PromptValue::Consent),
            "select_account" => Some(PromptValue::SelectAccount),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_response_types() {
        let parsed = parse_space_separated("code id_token", ResponseType::parse).unwrap();
        assert_eq!(parsed, vec![ResponseType::Code, ResponseType::IdToken]);
    }

    #[test]
    fn rejects_unknown_response_type() {
        assert!(parse_space_separated("code bogus", ResponseType::parse).is_none());
    }
}
