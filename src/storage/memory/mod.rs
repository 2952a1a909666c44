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

//! In-memory storage driver. Generalizes the teacher's `mock::members`-style
//! in-memory fixtures (`src/mock/members.rs`, `src/dal/mock/members.rs`) from
//! "mock for tests" into a real, selectable production driver per C4.

pub mod auth_code_session;
pub mod client;
pub mod custom_role;
pub mod project;
pub mod session;
pub mod transaction;
pub mod user;

use crate::model::{AuthCodeSession, Client, CustomRole, Project, Session, User};
use crate::storage::{Store, Transactions};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct Tables {
    pub projects: HashMap<String, Project>,
    pub users: HashMap<(String, Uuid), User>,
    pub clients: HashMap<(String, String), Client>,
    pub custom_roles: HashMap<(String, Uuid), CustomRole>,
    pub sessions: HashMap<(String, Uuid), Session>,
    pub auth_code_sessions: HashMap<(String, Uuid), AuthCodeSession>,
}

pub type Shared = Arc<Mutex<Tables>>;

pub fn new_store() -> Store {
    let shared: Shared = Arc::new(Mutex::new(Tables::default()));
    Store {
        projects: Box::new(project::MemoryProjectRepository::new(shared.clone())),
        users: Box::new(user::MemoryUserRepository::new(shared.clone())),
        clients: Box::new(client::MemoryClientRepository::new(shared.clone())),
        custom_roles: Box::new(custom_role::MemoryCustomRoleRepository::new(shared.clone())),
        sessions: Box::new(session::MemorySessionRepository::new(shared.clone())),
        auth_code_sessions: Box::new(auth_code_session::MemoryAuthCodeSessionRepository::new(
            shared.clone(),
        )),
        transactions: Transactions::Memory(transaction::MemoryTransactionManager::new(shared)),
    }
}
