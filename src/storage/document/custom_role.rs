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
use crate::model::{CustomRole, CustomRoleFilter};
use crate::storage::CustomRoleRepository;
use async_trait::async_trait;
use mongodb::bson::doc;
use uuid::Uuid;

pub struct DocumentCustomRoleRepository {
    collections: Collections,
}

impl DocumentCustomRoleRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl CustomRoleRepository for DocumentCustomRoleRepository {
    async fn add(&self, role: CustomRole) -> Result<()> {
        with_deadline(async {
            let existing = find_one(
                &self.collections.custom_roles,
                doc! { "project_name": &role.project_name, "name": &role.name },
            )
            .await?;
            if existing.is_some() {
                return Err(Error::new(Code::AlreadyExists, "custom role already exists"));
            }
            insert_one(&self.collections.custom_roles, role).await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, project: &str, id: Uuid) -> Result<CustomRole> {
        with_deadline(async {
            find_one(&self.collections.custom_roles, doc! { "project_name": project, "id": id })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchCustomRole, "no such custom role"))
        })
        .await
    }

    async fn list(&self, project: &str, filter: CustomRoleFilter) -> Result<Vec<CustomRole>> {
        with_deadline(async {
            let mut query = doc! { "project_name": project };
            if let Some(name) = filter.name {
                query.insert("name", name);
            }
            let mut cursor = self.collections.custom_roles.find(query).await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn update(&self, role: CustomRole) -> Result<()> {
        with_deadline(async {
            let result = replace_one(
                &self.collections.custom_roles,
                doc! { "project_name": &role.project_name, "id": role.id },
                role,
            )
            .await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::NoSuchCustomRole, "no such custom role"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<()> {
        with_deadline(async {
            let result = delete_one(&self.collections.custom_roles, doc! { "project_name": project, "id": id }).await?;
            if result.deleted_count == 0 {
                return Err(Error::new(Code::NoSuchCustomRole, "no such custom role"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.custom_roles, doc! { "project_name": project }).await?;
            Ok(())
        })
        .await
    }
}
