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
use crate::model::{CustomRole, CustomRoleFilter};
use crate::storage::CustomRoleRepository;
use async_trait::async_trait;
use uuid::Uuid;

pub struct MemoryCustomRoleRepository {
    shared: Shared,
}

impl MemoryCustomRoleRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl CustomRoleRepository for MemoryCustomRoleRepository {
    async fn add(&self, role: CustomRole) -> Result<()> {
        let mut tables = self.shared.lock().await;
        if tables
            .custom_roles
            .values()
            .any(|r| r.project_name == role.project_name && r.name == role.name)
        {
            return Err(Error::new(Code::AlreadyExists, "custom role already exists"));
        }
        tables.custom_roles.insert((role.project_name.clone(), role.id), role);
        Ok(())
    }

    async fn get(&self, project: &str, id: Uuid) -> Result<CustomRole> {
        let tables = self.shared.lock().await;
        tables
            .custom_roles
            .get(&(project.to_string(), id))
            .cloned()
            .ok_or_else(|| Error::new(Code::NoSuchCustomRole, "no such custom role"))
    }

    async fn list(&self, project: &str, filter: CustomRoleFilter) -> Result<Vec<CustomRole>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .custom_roles
            .values()
            .filter(|r| r.project_name == project)
            .filter(|r| filter.name.as_deref().map_or(true, |n| r.name == n))
            .cloned()
            .collect())
    }

    async fn update(&self, role: CustomRole) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (role.project_name.clone(), role.id);
        if !tables.custom_roles.contains_key(&key) {
            return Err(Error::new(Code::NoSuchCustomRole, "no such custom role"));
        }
        tables.custom_roles.insert(key, role);
        Ok(())
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .custom_roles
            .remove(&(project.to_string(), id))
            .map(|_| ())
            .ok_or_else(|| Error::new(Code::NoSuchCustomRole, "no such custom role"))
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.custom_roles.retain(|(p, _), _| p != project);
        Ok(())
    }
}
