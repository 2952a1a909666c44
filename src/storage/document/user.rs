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

use super::{delete_many, delete_one, find_one, insert_one, replace_one, update_one, with_deadline, Collections};
use crate::error::{Code, Error, Result};
use crate::model::user::RoleType;
use crate::model::{User, UserFilter};
use crate::storage::UserRepository;
use async_trait::async_trait;
use mongodb::bson::doc;
use uuid::Uuid;

pub struct DocumentUserRepository {
    collections: Collections,
}

impl DocumentUserRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl UserRepository for DocumentUserRepository {
    async fn add(&self, project: &str, user: User) -> Result<()> {
        with_deadline(async {
            let existing = find_one(&self.collections.users, doc! { "project_name": project, "name": &user.name }).await?;
            if existing.is_some() {
                return Err(Error::new(Code::AlreadyExists, "user already exists"));
            }
            insert_one(&self.collections.users, user).await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, project: &str, id: Uuid) -> Result<User> {
        with_deadline(async {
            find_one(&self.collections.users, doc! { "project_name": project, "id": id })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))
        })
        .await
    }

    async fn get_by_name(&self, project: &str, name: &str) -> Result<User> {
        with_deadline(async {
            find_one(&self.collections.users, doc! { "project_name": project, "name": name })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchUser, "no such user"))
        })
        .await
    }

    async fn list(&self, project: &str, filter: UserFilter) -> Result<Vec<User>> {
        with_deadline(async {
            let mut query = doc! { "project_name": project };
            if let Some(name) = filter.name {
                query.insert("name", name);
            }
            let mut cursor = self.collections.users.find(query).await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn update(&self, user: User) -> Result<()> {
        with_deadline(async {
            let result = replace_one(
                &self.collections.users,
                doc! { "project_name": &user.project_name, "id": user.id },
                user,
            )
            .await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::NoSuchUser, "no such user"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, project: &str, id: Uuid) -> Result<()> {
        with_deadline(async {
            let result = delete_one(&self.collections.users, doc! { "project_name": project, "id": id }).await?;
            if result.deleted_count == 0 {
                return Err(Error::new(Code::NoSuchUser, "no such user"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.users, doc! { "project_name": project }).await?;
            Ok(())
        })
        .await
    }

    async fn add_role(&self, project: &str, user: Uuid, role_type: RoleType, role_id: &str) -> Result<()> {
        with_deadline(async {
            let filter = doc! { "project_name": project, "id": user };
            let update = match role_type {
                RoleType::System => doc! { "$addToSet": { "system_roles": role_id } },
                RoleType::Custom => {
                    let role_uuid = Uuid::parse_str(role_id).map_err(Error::from)?;
                    doc! { "$addToSet": { "custom_roles": role_uuid } }
                }
            };
            let result = update_one(&self.collections.users, filter, update).await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::NoSuchUser, "no such user"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_role(&self, project: &str, user: Uuid, role_id: &str) -> Result<()> {
        with_deadline(async {
            let filter = doc! { "project_name": project, "id": user };
            let mut update = doc! { "$pull": { "system_roles": role_id } };
            if let Ok(role_uuid) = Uuid::parse_str(role_id) {
                update = doc! { "$pull": { "system_roles": role_id, "custom_roles": role_uuid } };
            }
            update_one(&self.collections.users, filter, update).await?;
            Ok(())
        })
        .await
    }
}
