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

use actix_web::body::BoxBody;
use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

/// The machine-matchable error code surfaced in OAuth/OIDC error bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnsupportedGrantType,
    UnsupportedResponseType,
    UnsupportedTokenType,
    AccessDenied,
    ServerError,
    NoSuchProject,
    NoSuchUser,
    NoSuchClient,
    NoSuchCustomRole,
    AlreadyExists,
    ValidateFailed,
    SessionExpired,
    PasswordPolicyFailed,
    RequestUnauthorized,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::InvalidRequest => "invalid_request",
            Code::InvalidClient => "invalid_client",
            Code::InvalidGrant => "invalid_grant",
            Code::UnsupportedGrantType => "unsupported_grant_type",
            Code::UnsupportedResponseType => "unsupported_response_type",
            Code::UnsupportedTokenType => "unsupported_token_type",
            Code::AccessDenied => "access_denied",
            Code::ServerError => "server_error",
            Code::NoSuchProject => "no_such_project",
            Code::NoSuchUser => "no_such_user",
            Code::NoSuchClient => "no_such_client",
            Code::NoSuchCustomRole => "no_such_custom_role",
            Code::AlreadyExists => "already_exists",
            Code::ValidateFailed => "validate_failed",
            Code::SessionExpired => "session_expired",
            Code::PasswordPolicyFailed => "password_policy_failed",
            Code::RequestUnauthorized => "request_unauthorized",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Code::InvalidRequest
            | Code::InvalidClient
            | Code::InvalidGrant
            | Code::UnsupportedGrantType
            | Code::UnsupportedResponseType
            | Code::UnsupportedTokenType
            | Code::ValidateFailed
            | Code::PasswordPolicyFailed => StatusCode::BAD_REQUEST,
            Code::AccessDenied | Code::RequestUnauthorized => StatusCode::FORBIDDEN,
            Code::NoSuchProject | Code::NoSuchUser | Code::NoSuchClient | Code::NoSuchCustomRole => {
                StatusCode::NOT_FOUND
            }
            Code::AlreadyExists => StatusCode::CONFLICT,
            Code::SessionExpired => StatusCode::GONE,
            Code::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `info` errors are user-caused and logged at info level; `error` ones
    /// are server faults logged at error level with the full cause.
    fn severity(&self) -> Severity {
        match self {
            Code::ServerError => Severity::Error,
            _ => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Error {
    code: Code,
    message: String,
    cause: Option<Box<String>>,
}

impl Error {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(code: Code, message: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            code,
            message: message.into(),
            cause: Some(Box::new(cause.to_string())),
        }
    }

    pub fn server(cause: impl ToString) -> Self {
        Self::with_cause(Code::ServerError, "internal server error", cause)
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn log(&self) {
        match self.severity() {
            Severity::Info => log::info!("{}", self),
            Severity::Error => match &self.cause {
                Some(cause) => log::error!("{}: {} (cause: {})", self.code.as_str(), self.message, cause),
                None => log::error!("{}: {}", self.code.as_str(), self.message),
            },
        }
    }
}

#[derive(Serialize)]
struct OAuthErrorBody {
    error: &'static str,
    error_description: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Error {}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        self.log();
        let description = match self.severity() {
            Severity::Error => "internal server error".to_string(),
            Severity::Info => self.message.clone(),
        };
        let body = OAuthErrorBody {
            error: self.code.as_str(),
            error_description: description,
        };
        HttpResponse::build(self.status_code())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .json(body)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::with_cause(Code::InvalidGrant, "token validation failed", value)
    }
}

impl From<rsa::Error> for Error {
    fn from(value: rsa::Error) -> Self {
        Self::server(value)
    }
}

impl From<rsa::pkcs1::Error> for Error {
    fn from(value: rsa::pkcs1::Error) -> Self {
        Self::server(value)
    }
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::with_cause(Code::PasswordPolicyFailed, "password hashing failed", value)
    }
}

impl From<mongodb::error::Error> for Error {
    fn from(value: mongodb::error::Error) -> Self {
        Self::server(value)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(value: serde_yaml::Error) -> Self {
        Self::with_cause(Code::ServerError, "configuration error", value)
    }
}

impl From<std::env::VarError> for Error {
    fn from(value: std::env::VarError) -> Self {
        Self::with_cause(Code::ServerError, "configuration error", value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::server(value)
    }
}

impl From<uuid::Error> for Error {
    fn from(value: uuid::Error) -> Self {
        Self::with_cause(Code::InvalidRequest, "malformed identifier", value)
    }
}
