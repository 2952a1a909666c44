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

use super::Shared;
use crate::error::{Code, Error, Result};
use crate::model::AuthCodeSession;
use crate::storage::AuthCodeSessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub struct MemoryAuthCodeSessionRepository {
    shared: Shared,
}

impl MemoryAuthCodeSessionRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl AuthCodeSessionRepository for MemoryAuthCodeSessionRepository {
    async fn add(&self, session: AuthCodeSession) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .auth_code_sessions
            .insert((session.project_name.clone(), session.session_id), session);
        Ok(())
    }

    async fn update(&self, session: AuthCodeSession) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (session.project_name.clone(), session.session_id);
        if !tables.auth_code_sessions.contains_key(&key) {
            return Err(Error::new(Code::SessionExpired, "no such auth code session"));
        }
        tables.auth_code_sessions.insert(key, session);
        Ok(())
    }

    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.auth_code_sessions.remove(&(project.to_string(), session_id));
        Ok(())
    }

    async fn get(&self, project: &str, session_id: Uuid) -> Result<AuthCodeSession> {
        let tables = self.shared.lock().await;
        let session = tables
            .auth_code_sessions
            .get(&(project.to_string(), session_id))
            .ok_or_else(|| Error::new(Code::SessionExpired, "no such auth code session"))?;
        if session.is_expired(Utc::now()) {
            return Err(Error::new(Code::SessionExpired, "no such auth code session"));
        }
        Ok(session.clone())
    }

    async fn get_by_code(&self, project: &str, code: Uuid) -> Result<AuthCodeSession> {
        let tables = self.shared.lock().await;
        let now = Utc::now();
        tables
            .auth_code_sessions
            .values()
            .find(|s| s.project_name == project && s.code == Some(code) && !s.is_expired(now))
            .cloned()
            .ok_or_else(|| Error::new(Code::InvalidGrant, "no such authorization code"))
    }

    async fn list_all(&self, project: &str) -> Result<Vec<AuthCodeSession>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .auth_code_sessions
            .values()
            .filter(|s| s.project_name == project)
            .cloned()
            .collect())
    }

    async fn delete_all_in_client(&self, project: &str, client_id: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .auth_code_sessions
            .retain(|(p, _), s| !(p == project && s.client_id == client_id));
        Ok(())
    }

    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .auth_code_sessions
            .retain(|(p, _), s| !(p == project && s.user_id == Some(user_id)));
        Ok(())
    }

    async fn delete_all_in_project(&self, project: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.auth_code_sessions.retain(|(p, _), _| p != project);
        Ok(())
    }
}
