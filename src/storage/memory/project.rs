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
use crate::model::{Project, ProjectFilter};
use crate::storage::ProjectRepository;
use async_trait::async_trait;

pub struct MemoryProjectRepository {
    shared: Shared,
}

impl MemoryProjectRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectRepository {
    async fn add(&self, project: Project) -> Result<()> {
        let mut tables = self.shared.lock().await;
        if tables.projects.contains_key(&project.name) {
            return Err(Error::new(Code::AlreadyExists, "project already exists"));
        }
        tables.projects.insert(project.name.clone(), project);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Project> {
        let tables = self.shared.lock().await;
        tables
            .projects
            .get(name)
            .cloned()
            .ok_or_else(|| Error::new(Code::NoSuchProject, "no such project"))
    }

    async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| filter.name.as_deref().map_or(true, |n| p.name == n))
            .cloned()
            .collect())
    }

    async fn update(&self, project: Project) -> Result<()> {
        let mut tables = self.shared.lock().await;
        if !tables.projects.contains_key(&project.name) {
            return Err(Error::new(Code::NoSuchProject, "no such project"));
        }
        tables.projects.insert(project.name.clone(), project);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let project = tables
            .projects
            .get(name)
            .ok_or_else(|| Error::new(Code::NoSuchProject, "no such project"))?;
        if !project.permit_delete {
            return Err(Error::new(Code::AccessDenied, "project cannot be deleted"));
        }
        tables.projects.remove(name);
        // Cascade-delete every child entity for this project.
        tables.users.retain(|(p, _), _| p != name);
        tables.clients.retain(|(p, _), _| p != name);
        tables.custom_roles.retain(|(p, _), _| p != name);
        tables.sessions.retain(|(p, _), _| p != name);
        tables.auth_code_sessions.retain(|(p, _), _| p != name);
        Ok(())
    }
}
