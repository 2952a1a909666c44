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

use super::{delete_many, delete_one, find_one, insert_one, with_deadline, Collections};
use crate::error::{Code, Error, Result};
use crate::model::{Session, SessionFilter};
use crate::storage::SessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use uuid::Uuid;

pub struct DocumentSessionRepository {
    collections: Collections,
}

impl DocumentSessionRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl SessionRepository for DocumentSessionRepository {
    async fn new_session(&self, session: Session) -> Result<()> {
        with_deadline(async {
            insert_one(&self.collections.sessions, session).await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, project: &str, session_id: Uuid) -> Result<Session> {
        with_deadline(async {
            let session = find_one(&self.collections.sessions, doc! { "project_name": project, "session_id": session_id })
                .await?
                .ok_or_else(|| Error::new(Code::InvalidGrant, "no such session"))?;
            if session.is_expired(Utc::now()) {
                return Err(Error::new(Code::InvalidGrant, "no such session"));
            }
            Ok(session)
        })
        .await
    }

    async fn get_list(&self, project: &str, filter: SessionFilter) -> Result<Vec<Session>> {
        with_deadline(async {
            let mut query = doc! { "project_name": project };
            if let Some(user_id) = filter.user_id {
                query.insert("user_id", user_id);
            }
            let mut cursor = self.collections.sessions.find(query).await?;
            let now = Utc::now();
            let mut results = Vec::new();
            while cursor.advance().await? {
                let session: Session = cursor.deserialize_current()?;
                if !session.is_expired(now) {
                    results.push(session);
                }
            }
            Ok(results)
        })
        .await
    }

    async fn list_all(&self, project: &str) -> Result<Vec<Session>> {
        with_deadline(async {
            let mut cursor = self.collections.sessions.find(doc! { "project_name": project }).await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()> {
        with_deadline(async {
            delete_one(&self.collections.sessions, doc! { "project_name": project, "session_id": session_id }).await?;
            Ok(())
        })
        .await
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.sessions, doc! { "project_name": project }).await?;
            Ok(())
        })
        .await
    }

    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.sessions, doc! { "project_name": project, "user_id": user_id }).await?;
            Ok(())
        })
        .await
    }
}
