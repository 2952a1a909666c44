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
use crate::model::user::RoleType;
use crate::model::{User, UserFilter};
use crate::storage::UserRepository;
use async_trait::async_trait;
use uuid::Uuid;

pub struct MemoryUserRepository {
    shared: Shared,
}

impl MemoryUserRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn add(&self, project: &str, user: User) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (project.to_string(), user.id);
        if tables.users.values().any(|u| u.project_name == project && u.name == user.name) {
            return Err(Error::new(Code::AlreadyExists, "user already exists"));
        }
        tables.users.insert(key, user);
        Ok(())
    }

    async fn get(&self, project: &str, id: Uuid) -> Result<User> {
        let tables = self.shared.lock().await;
        tables
            .users
            .get(&(project.to_string(), id))
            .cloned()
            .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))
    }

    async fn get_by_name(&self, project: &str, name: &str) -> Result<User> {
        let tables = self.shared.lock().await;
        tables
            .users
            .values()
            .find(|u| u.project_name == project && u.name == name)
            .cloned()
            .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))
    }

    async fn list(&self, project: &str, filter: UserFilter) -> Result<Vec<User>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .users
            .values()
            .filter(|u| u.project_name == project)
            .filter(|u| filter.name.as_deref().map_or(true, |n| u.name == n))
            .cloned()
            .collect())
    }

    async fn update(&self, user: User) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (user.project_name.clone(), user.id);
        if !tables.users.contains_key(&key) {
            return Err(Error::new(Code::NoSuchUser, "no such user"));
        }
        tables.users.insert(key, user);
        Ok(())
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .users
            .remove(&(project.to_string(), id))
            .map(|_| ())
            .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.users.retain(|(p, _), _| p != project);
        Ok(())
    }

    async fn add_role(&self, project: &str, user: Uuid, role_type: RoleType, role_id: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let entry = tables
            .users
            .get_mut(&(project.to_string(), user))
            .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))?;
        match role_type {
            RoleType::System => {
                if !entry.system_roles.iter().any(|r| r == role_id) {
                    entry.system_roles.push(role_id.to_string());
                }
            }
            RoleType::Custom => {
                let role_uuid = Uuid::parse_str(role_id).map_err(Error::from)?;
                if !entry.custom_roles.contains(&role_uuid) {
                    entry.custom_roles.push(role_uuid);
                }
            }
        }
        Ok(())
    }

    async fn delete_role(&self, project: &str, user: Uuid, role_id: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let entry = tables
            .users
            .get_mut(&(project.to_string(), user))
            .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))?;
        entry.system_roles.retain(|r| r != role_id);
        if let Ok(role_uuid) = Uuid::parse_str(role_id) {
            entry.custom_roles.retain(|r| r != &role_uuid);
        }
        Ok(())
    }
}
