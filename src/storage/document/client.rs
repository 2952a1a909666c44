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
use crate::model::{Client, ClientFilter};
use crate::storage::ClientRepository;
use async_trait::async_trait;
use mongodb::bson::doc;

pub struct DocumentClientRepository {
    collections: Collections,
}

impl DocumentClientRepository {
    pub fn new(collections: Collections) -> Self {
        Self { collections }
    }
}

#[async_trait]
impl ClientRepository for DocumentClientRepository {
    async fn add(&self, client: Client) -> Result<()> {
        with_deadline(async {
            let existing = find_one(
                &self.collections.clients,
                doc! { "project_name": &client.project_name, "id": &client.id },
            )
            .await?;
            if existing.is_some() {
                return Err(Error::new(Code::AlreadyExists, "client already exists"));
            }
            insert_one(&self.collections.clients, client).await?;
            Ok(())
        })
        .await
    }

    async fn get(&self, project: &str, id: &str) -> Result<Client> {
        with_deadline(async {
            find_one(&self.collections.clients, doc! { "project_name": project, "id": id })
                .await?
                .ok_or_else(|| Error::new(Code::NoSuchClient, "no such client"))
        })
        .await
    }

    async fn list(&self, project: &str, filter: ClientFilter) -> Result<Vec<Client>> {
        with_deadline(async {
            let mut query = doc! { "project_name": project };
            if let Some(id) = filter.id {
                query.insert("id", id);
            }
            let mut cursor = self.collections.clients.find(query).await?;
            let mut results = Vec::new();
            while cursor.advance().await? {
                results.push(cursor.deserialize_current()?);
            }
            Ok(results)
        })
        .await
    }

    async fn update(&self, client: Client) -> Result<()> {
        with_deadline(async {
            let result = replace_one(
                &self.collections.clients,
                doc! { "project_name": &client.project_name, "id": &client.id },
                client,
            )
            .await?;
            if result.matched_count == 0 {
                return Err(Error::new(Code::NoSuchClient, "no such client"));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, project: &str, id: &str) -> Result<()> {
        with_deadline(async {
            let result = delete_one(&self.collections.clients, doc! { "project_name": project, "id": id }).await?;
            if result.deleted_count == 0 {
                return Err(Error::new(Code::NoSuchClient, "no such client"));
            }
            Ok(())
        })
        .await
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        with_deadline(async {
            delete_many(&self.collections.clients, doc! { "project_name": project }).await?;
            Ok(())
        })
        .await
    }
}
