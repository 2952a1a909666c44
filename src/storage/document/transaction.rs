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

use crate::error::Result;
use mongodb::{Client, ClientSession};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// A `ClientSession` shared between the transaction that owns it and every
/// repository call that joins it through [`current_session`].
pub(crate) type SharedSession = Arc<Mutex<ClientSession>>;

tokio::task_local! {
    /// The session bracketing the innermost `transaction()`/`with_session()`
    /// call on this task, if one is active. Every document-driver
    /// insert/delete/update call checks this so a multi-write sequence
    /// wrapped in `Transactions::transaction` actually commits or rolls back
    /// as one unit instead of as N independent writes.
    pub(crate) static ACTIVE_SESSION: SharedSession;
}

pub(crate) async fn current_session() -> Option<SharedSession> {
    ACTIVE_SESSION.try_with(|session| session.clone()).ok()
}

/// Serializes writers per project the same way the in-memory driver does,
/// and brackets `work` with a native `mongodb` client session transaction
/// that every nested repository call joins via `ACTIVE_SESSION`.
pub struct DocumentTransactionManager {
    client: Client,
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentTransactionManager {
    pub fn new(client: Client) -> Self {
        Self {
            client,
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
        super::run_in_new_session(&self.client, work).await
    }
}
