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
use crate::model::{Client, ClientFilter};
use crate::storage::ClientRepository;
use async_trait::async_trait;

pub struct MemoryClientRepository {
    shared: Shared,
}

impl MemoryClientRepository {
    pub fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ClientRepository for MemoryClientRepository {
    async fn add(&self, client: Client) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (client.project_name.clone(), client.id.clone());
        if tables.clients.contains_key(&key) {
            return Err(Error::new(Code::AlreadyExists, "client already exists"));
        }
        tables.clients.insert(key, client);
        Ok(())
    }

    async fn get(&self, project: &str, id: &str) -> Result<Client> {
        let tables = self.shared.lock().await;
        tables
            .clients
            .get(&(project.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| Error::new(Code::NoSuchClient, "no such client"))
    }

    async fn list(&self, project: &str, filter: ClientFilter) -> Result<Vec<Client>> {
        let tables = self.shared.lock().await;
        Ok(tables
            .clients
            .values()
            .filter(|c| c.project_name == project)
            .filter(|c| filter.id.as_deref().map_or(true, |id| c.id == id))
            .cloned()
            .collect())
    }

    async fn update(&self, client: Client) -> Result<()> {
        let mut tables = self.shared.lock().await;
        let key = (client.project_name.clone(), client.id.clone());
        if !tables.clients.contains_key(&key) {
            return Err(Error::new(Code::NoSuchClient, "no such client"));
        }
        tables.clients.insert(key, client);
        Ok(())
    }

    async fn delete(&self, project: &str, id: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables
            .clients
            .remove(&(project.to_string(), id.to_string()))
            .map(|_| ())
            .ok_or_else(|| Error::new(Code::NoSuchClient, "no such client"))
    }

    async fn delete_all(&self, project: &str) -> Result<()> {
        let mut tables = self.shared.lock().await;
        tables.clients.retain(|(p, _), _| p != project);
        Ok(())
    }
}
