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

//! YAML configuration loading. Generalizes the teacher's env-var `LazyLock`
//! statics (`src/generic/lazy.rs`) into a single structured file, since this
//! server's nested per-driver/per-TLS/per-lock config does not fit comfortably
//! into flat environment variables.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const REQUIRED_LOGIN_PAGES: &[&str] = &[
    "index.html",
    "consent.html",
    "error.html",
    "devicelogin.html",
    "otpverify.html",
];

#[derive(Debug, Clone, Deserialize)]
pub struct HttpsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "cert-file", default)]
    pub cert_file: Option<String>,
    #[serde(rename = "key-file", default)]
    pub key_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub enum DbType {
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "document")]
    Document,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    #[serde(rename = "type")]
    pub db_type: DbType,
    #[serde(default)]
    pub connection_string: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditDbConfig {
    #[serde(default)]
    pub connection_string: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub admin_name: String,
    pub admin_password: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_bind")]
    pub server_bind_address: String,

    #[serde(default)]
    pub https: HttpsConfig,

    #[serde(default)]
    pub logfile: Option<String>,
    #[serde(default)]
    pub debug_mode: bool,

    pub db: DbConfig,
    #[serde(default)]
    pub audit_db: Option<AuditDbConfig>,

    #[serde(default = "default_login_session_expires_in")]
    pub login_session_expires_in: i64,
    #[serde(default = "default_sso_expires_in")]
    pub sso_expires_in: i64,
    #[serde(default = "default_dbgc_interval")]
    pub dbgc_interval: i64,

    pub user_login_page_res: String,
}

impl Default for HttpsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_file: None,
            key_file: None,
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_login_session_expires_in() -> i64 {
    300
}

fn default_sso_expires_in() -> i64 {
    3600
}

fn default_dbgc_interval() -> i64 {
    60
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&raw)?;
        config.validate_login_resources()?;
        Ok(config)
    }

    fn validate_login_resources(&self) -> Result<()> {
        let dir = PathBuf::from(&self.user_login_page_res);
        for name in REQUIRED_LOGIN_PAGES {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(Error::server(format!(
                    "login resource directory {} is missing required template {name}",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
