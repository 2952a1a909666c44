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

//! Per-entity repository interfaces, the two drivers (in-memory, document
//! store), and the `TransactionManager` that serializes writers per project.
//! Generalizes the capability-over-entity-handler shape of the teacher's
//! `repositories::traits` module: C6 depends only on these traits, never on
//! a concrete driver.

pub mod document;
pub mod gc;
pub mod memory;

use crate::error::Result;
use crate::model::{
    AuthCodeSession, AuthCodeSessionFilter, Client, ClientFilter, CustomRole, CustomRoleFilter, Project,
    ProjectFilter, Session, SessionFilter, User, UserFilter,
};
use crate::model::user::RoleType;
use async_trait::async_trait;
use std::future::Future;
use uuid::Uuid;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn add(&self, project: Project) -> Result<()>;
    async fn get(&self, name: &str) -> Result<Project>;
    async fn list(&self, filter: ProjectFilter) -> Result<Vec<Project>>;
    async fn update(&self, project: Project) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn add(&self, project: &str, user: User) -> Result<()>;
    async fn get(&self, project: &str, id: Uuid) -> Result<User>;
    async fn get_by_name(&self, project: &str, name: &str) -> Result<User>;
    async fn list(&self, project: &str, filter: UserFilter) -> Result<Vec<User>>;
    async fn update(&self, user: User) -> Result<()>;
    async fn delete(&self, project: &str, id: Uuid) -> Result<()>;
    async fn delete_all(&self, project: &str) -> Result<()>;
    async fn add_role(&self, project: &str, user: Uuid, role_type: RoleType, role_id: &str) -> Result<()>;
    async fn delete_role(&self, project: &str, user: Uuid, role_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn add(&self, client: Client) -> Result<()>;
    async fn get(&self, project: &str, id: &str) -> Result<Client>;
    async fn list(&self, project: &str, filter: ClientFilter) -> Result<Vec<Client>>;
    async fn update(&self, client: Client) -> Result<()>;
    async fn delete(&self, project: &str, id: &str) -> Result<()>;
    async fn delete_all(&self, project: &str) -> Result<()>;
}

#[async_trait]
pub trait CustomRoleRepository: Send + Sync {
    async fn add(&self, role: CustomRole) -> Result<()>;
    async fn get(&self, project: &str, id: Uuid) -> Result<CustomRole>;
    async fn list(&self, project: &str, filter: CustomRoleFilter) -> Result<Vec<CustomRole>>;
    async fn update(&self, role: CustomRole) -> Result<()>;
    async fn delete(&self, project: &str, id: Uuid) -> Result<()>;
    async fn delete_all(&self, project: &str) -> Result<()>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn new_session(&self, session: Session) -> Result<()>;
    async fn get(&self, project: &str, session_id: Uuid) -> Result<Session>;
    async fn get_list(&self, project: &str, filter: SessionFilter) -> Result<Vec<Session>>;
    /// Unlike `get_list`, returns every record regardless of expiry — used
    /// only by the GC sweep, which must see expired rows to remove them.
    async fn list_all(&self, project: &str) -> Result<Vec<Session>>;
    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()>;
    async fn delete_all(&self, project: &str) -> Result<()>;
    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait AuthCodeSessionRepository: Send + Sync {
    async fn add(&self, session: AuthCodeSession) -> Result<()>;
    async fn update(&self, session: AuthCodeSession) -> Result<()>;
    async fn delete(&self, project: &str, session_id: Uuid) -> Result<()>;
    async fn get(&self, project: &str, session_id: Uuid) -> Result<AuthCodeSession>;
    async fn get_by_code(&self, project: &str, code: Uuid) -> Result<AuthCodeSession>;
    /// Unlike `get`/`get_by_code`, returns every record regardless of
    /// expiry — used only by the GC sweep, which must see expired rows to
    /// remove them.
    async fn list_all(&self, project: &str) -> Result<Vec<AuthCodeSession>>;
    async fn delete_all_in_client(&self, project: &str, client_id: &str) -> Result<()>;
    async fn delete_all_in_user(&self, project: &str, user_id: Uuid) -> Result<()>;
    async fn delete_all_in_project(&self, project: &str) -> Result<()>;
}

/// `transaction(project, fn)` is the unit of atomicity: commit on normal
/// return, rollback on any error. Concurrent writers against the same
/// project are serialized; a multi-write logical operation must never be
/// split across two `transaction` calls.
///
/// A generic `transaction<T>` method cannot live on a `dyn`-safe trait, and
/// there are exactly two drivers, so this is a closed enum dispatching to
/// each driver's own (non-dyn) transaction manager rather than a trait
/// object — the repository traits above stay dynamically dispatched, which
/// is where C6 actually needs driver substitutability.
pub enum Transactions {
    Memory(memory::transaction::MemoryTransactionManager),
    Document(document::transaction::DocumentTransactionManager),
}

impl Transactions {
    pub async fn transaction<T, F, Fut>(&self, project: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T>> + Send,
        T: Send,
    {
        match self {
            Transactions::Memory(m) => m.transaction(project, work).await,
            Transactions::Document(d) => d.transaction(project, work).await,
        }
    }
}

/// The bundle of driver-backed repositories + transaction manager a single
/// process runs for its whole lifetime, selected once at startup by `db.type`.
pub struct Store {
    pub projects: Box<dyn ProjectRepository>,
    pub users: Box<dyn UserRepository>,
    pub clients: Box<dyn ClientRepository>,
    pub custom_roles: Box<dyn CustomRoleRepository>,
    pub sessions: Box<dyn SessionRepository>,
    pub auth_code_sessions: Box<dyn AuthCodeSessionRepository>,
    pub transactions: Transactions,
}
