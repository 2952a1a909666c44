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

use super::{delete_many, delete_one, find_one, insert_one, replace_one, with_deadline, Collections};
use crate::error::{Code, Error, Result};
use crate::model::AuthCodeSession;
use crate::storage::AuthCodeSessionRepository;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::doc;
use uuid::Uuid;

pub struct DocumentAuthCodeSessionRepository {
    collections: Collections,
}

impl DocumentAuthCodeSessionRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl AuthCodeSessionRepository for DocumentAuthCodeSessionRepository {
    async fn add(&self, session: AuthCodeSession) -> Result<()> {
        with_deadline(async {
            insert_one(&self.collections.auth_code_sessions, session).await?;
            Ok(())
        })
        .await
    }

    async fn update(&self, session: AuthCodeSession) -> Result<()> {
        with_deadline(async {
            let result = replace_one(
                &self.collections.auth_code_sessions,
                doc! { "project_name": &session.project_name, "session_id": session.session_id },
                session,
            )
            .await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::SessionExpired, "no such auth code session"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()> {
        with_deadline(async {
            delete_one(
                &self.collections.auth_code_sessions,
                doc! { "project_name": project, "session_id": session_id },
            )
            .await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, project: &str, session_id: Uuid) -> Result<AuthCodeSession> {
        with_deadline(async {
            let session = find_one(
                &self.collections.auth_code_sessions,
                doc! { "project_name": project, "session_id": session_id },
            )
            .await?
            .ok_or_else(|| Error::new(Code::SessionExpired, "no such auth code session"))?;
            if session.is_expired(Utc::now()) {
                return Err(Error::new(Code::SessionExpired, "no such auth code session"));
            }
            Ok(session)
        })
        .await
    }

    async fn get_by_code(&self, project: &str, code: Uuid) -> Result<AuthCodeSession> {
        with_deadline(async {
            let session = find_one(&self.collections.auth_code_sessions, doc! { "project_name": project, "code": code })
                .await?
                .ok_or_else(|| Error::new(Code::InvalidGrant, "no such authorization code"))?;
            if session.is_expired(Utc::now()) {
                return Err(Error::new(Code::InvalidGrant, "no such authorization code"));
            }
            Ok(session)
        })
        .await
    }

    async fn list_all(&self, project: &str) -> Result<Vec<AuthCodeSession>> {
        with_deadline(async {
            let mut cursor = self
                .collections
                .auth_code_sessions
                .find(doc! { "project_name": project })
                .await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn delete_all_in_client(&self, project: &str, client_id: &str) -> Result<()> {
        with_deadline(async {
            delete_many(
                &self.collections.auth_code_sessions,
                doc! { "project_name": project, "client_id": client_id },
            )
            .await?;
            Ok(())
        })
        .await
    }

    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()> {
        with_deadline(async {
            delete_many(
                &self.collections.auth_code_sessions,
                doc! { "project_name": project, "user_id": user_id },
            )
            .await?;
            Ok(())
        })
        .await
    }

    async fn delete_all_in_project(&self, project: &str) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.auth_code_sessions, doc! { "project_name": project }).await?;
            Ok(())
        })
        .await
    }
}
