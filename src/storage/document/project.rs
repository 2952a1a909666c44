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

use super::{delete_many, delete_one, find_one, insert_one, replace_one, with_deadline, with_session, Collections};
use crate::error::{Code, Error, Result};
use crate::model::{Project, ProjectFilter};
use crate::storage::ProjectRepository;
use async_trait::async_trait;
use mongodb::bson::doc;

pub struct DocumentProjectRepository {
    collections: Collections,
}

impl DocumentProjectRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl ProjectRepository for DocumentProjectRepository {
    async fn add(&self, project: Project) -> Result<()> {
        with_deadline(async {
            let existing = find_one(&self.collections.projects, doc! { "name": &project.name }).await?;
            if existing.is_some() {
                return Err(Error::new(Code::AlreadyExists, "project already exists"));
            }
            insert_one(&self.collections.projects, project).await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, name: &str) -> Result<Project> {
        with_deadline(async {
            find_one(&self.collections.projects, doc! { "name": name })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchProject, "no such project"))
        })
        .await
    }

    async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        with_deadline(async {
            let mut query = doc! {};
            if let Some(name) = filter.name {
                query.insert("name", name);
            }
            let mut cursor = self.collections.projects.find(query).await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn update(&self, project: Project) -> Result<()> {
        with_deadline(async {
            let result = replace_one(&self.collections.projects, doc! { "name": &project.name }, project).await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::NoSuchProject, "no such project"));
            }
            Ok(())
        })
        .await
    }

    /// Deletes the project and cascades across five other collections.
    /// Wrapped in `with_session` so the cascade commits or rolls back as one
    /// unit even when no caller wraps this call in `Transactions::transaction`.
    async fn delete(&self, name: &str) -> Result<()> {
        with_deadline(with_session(&self.collections.client, || async {
            let project = find_one(&self.collections.projects, doc! { "name": name })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchProject, "no such project"))?;
            if !project.permit_delete {
                return Err(Error::new(Code::AccessDenied, "project cannot be deleted"));
            }
            delete_one(&self.collections.projects, doc! { "name": name }).await?;
            delete_many(&self.collections.users, doc! { "project_name": name }).await?;
            delete_many(&self.collections.clients, doc! { "project_name": name }).await?;
            delete_many(&self.collections.custom_roles, doc! { "project_name": name }).await?;
            delete_many(&self.collections.sessions, doc! { "project_name": name }).await?;
            delete_many(&self.collections.auth_code_sessions, doc! { "project_name": name }).await?;
            Ok(())
        }))
        .await
    }
}
