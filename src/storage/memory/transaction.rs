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
use crate::error::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// Serializes writers per project with a per-project `tokio::sync::Mutex`,
/// and rolls back by restoring a snapshot of the tables taken before `work`
/// runs, since the in-memory repositories otherwise mutate state directly.
pub struct MemoryTransactionManager {
    shared: Shared,
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MemoryTransactionManager {
    pub fn new(shared: Shared) -> Self {
        Self {
            shared,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    fn project_lock(&self, project: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(project.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn transaction<T, F, Fut>(&self, project: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        let lock = self.project_lock(project);
        let _guard = lock.lock().await;
        let snapshot = self.shared.lock().await.clone();
        match work().await {
            Ok(value) => Ok(value),
            Err(error) => {
                *self.shared.lock().await = snapshot;
                Err(error)
            }
        }
    }
}
