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
use crate::model::{Session, SessionFilter};
use crate::storage::SessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub struct MemorySessionRepository {
    shared: Shared,
}

impl MemorySessionRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn new_session(&self, session: Session) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .sessions
            .insert((session.project_name.clone(), session.session_id), session);
        Ok(())
    }

    async fn get(&self, project: &str, session_id: Uuid) -> Result<Session> {
        let tables = self.shared.lock().await;
        let session = tables
            .sessions
            .get(&(project.to_string(), session_id))
            .ok_or_else(|| Error::new(Code::InvalidGrant, "no such session"))?;
        // Expired records are materialized as absent.
        if session.is_expired(Utc::now()) {
            return Err(Error::new(Code::InvalidGrant, "no such session"));
        }
        Ok(session.clone())
    }

    async fn get_list(&self, project: &str, filter: SessionFilter) -> Result<Vec<Session>> {
        let tables = self.shared.lock().await;
        let now = Utc::now();
        Ok(tables
            .sessions
            .values()
            .filter(|s| s.project_name == project && !s.is_expired(now))
            .filter(|s| filter.user_id.map_or(true, |uid| s.user_id == uid))
            .cloned()
            .collect())
    }

    async fn list_all(&self, project: &str) -> Result<Vec<Session>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .sessions
            .values()
            .filter(|s| s.project_name == project)
            .cloned()
            .collect())
    }

    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.sessions.remove(&(project.to_string(), session_id));
        Ok(())
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.sessions.retain(|(p, _), _| p != project);
        Ok(())
    }

    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .sessions
            .retain(|(p, _), s| !(p == project && s.user_id == user_id));
        Ok(())
    }
}
