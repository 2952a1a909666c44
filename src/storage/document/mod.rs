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

//! Document-database storage driver backed by `mongodb`. Collection/session
//! shape grounded on the original project's `pkg/db/mongo/*` dual-driver
//! implementation; the lazy-begin-transaction wrapper shape generalizes the
//! teacher's `src/generic/storage/session.rs` (`Session`/`SessionManager`).

pub mod auth_code_session;
pub mod client;
pub mod custom_role;
pub mod project;
pub mod session;
pub mod transaction;
pub mod user;

use crate::error::Result;
use crate::model::{AuthCodeSession, Client, CustomRole, Project, Session, User};
use crate::storage::{Store, Transactions};
use mongodb::bson::Document;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Client as MongoClient, Database};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Every document-driver storage call is bounded by this request-scoped
/// deadline.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Collections {
    pub client: MongoClient,
    pub projects: mongodb::Collection<Project>,
    pub users: mongodb::Collection<User>,
    pub clients: mongodb::Collection<Client>,
    pub custom_roles: mongodb::Collection<CustomRole>,
    pub sessions: mongodb::Collection<Session>,
    pub auth_code_sessions: mongodb::Collection<AuthCodeSession>,
}

impl Collections {
    pub fn new(client: MongoClient, db: &Database) -> Self {
        Self {
            client,
            projects: db.collection("projects"),
            users: db.collection("users"),
            clients: db.collection("clients"),
            custom_roles: db.collection("custom_roles"),
            sessions: db.collection("sessions"),
            auth_code_sessions: db.collection("auth_code_sessions"),
        }
    }
}

/// Wraps a single storage call with the request-scoped deadline.
pub async fn with_deadline<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(CALL_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(crate::error::Error::server("storage call exceeded request deadline")),
    }
}

/// Starts a fresh `ClientSession` transaction, runs `work` inside it, and
/// commits or aborts depending on the result. `ACTIVE_SESSION` makes the
/// session visible to every repository call `work` makes, including ones on
/// other repositories, so the whole sequence lands atomically.
pub(crate) async fn run_in_new_session<T, F, Fut>(client: &MongoClient, work: F) -> Result<T>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
    T: Send,
{
    let mut session = client.start_session().await?;
    session.start_transaction().await?;
    let session: transaction::SharedSession = std::sync::Arc::new(tokio::sync::Mutex::new(session));

    let result = transaction::ACTIVE_SESSION.scope(session.clone(), work()).await;
    match result {
        Ok(value) => {
            session.lock().await.commit_transaction().await?;
            Ok(value)
        }
        Err(error) => {
            session.lock().await.abort_transaction().await?;
            Err(error)
        }
    }
}

/// Runs `work` inside whatever session is already active on this task, or —
/// if none is — starts and commits/aborts a short-lived one of its own. For
/// repository methods whose own body issues more than one write that must
/// land together regardless of whether the caller wrapped the call in
/// `Transactions::transaction` (e.g. a project delete cascading across
/// collections).
pub(crate) async fn with_session<T, F, Fut>(client: &MongoClient, work: F) -> Result<T>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
    T: Send,
{
    if transaction::current_session().await.is_some() {
        work().await
    } else {
        run_in_new_session(client, work).await
    }
}

/// `insert_one`, joining the active session if this call is running inside
/// a `Transactions::transaction`/`with_session` block.
pub(crate) async fn insert_one<T>(collection: &mongodb::Collection<T>, document: T) -> Result<InsertOneResult>
where
    T: Serialize + Send + Sync,
{
    Ok(match transaction::current_session().await {
        Some(session) => collection.insert_one(document).session(&mut *session.lock().await).await?,
        None => collection.insert_one(document).await?,
    })
}

/// `find_one`, joining the active session if this call is running inside a
/// `Transactions::transaction`/`with_session` block.
pub(crate) async fn find_one<T>(collection: &mongodb::Collection<T>, filter: Document) -> Result<Option<T>>
where
    T: DeserializeOwned + Send + Sync + Unpin,
{
    Ok(match transaction::current_session().await {
        Some(session) => collection.find_one(filter).session(&mut *session.lock().await).await?,
        None => collection.find_one(filter).await?,
    })
}

/// `delete_one`, joining the active session if this call is running inside
/// a `Transactions::transaction`/`with_session` block.
pub(crate) async fn delete_one<T>(collection: &mongodb::Collection<T>, filter: Document) -> Result<DeleteResult>
where
    T: Send + Sync,
{
    Ok(match transaction::current_session().await {
        Some(session) => collection.delete_one(filter).session(&mut *session.lock().await).await?,
        None => collection.delete_one(filter).await?,
    })
}

/// `delete_many`, joining the active session if this call is running inside
/// a `Transactions::transaction`/`with_session` block.
pub(crate) async fn delete_many<T>(collection: &mongodb::Collection<T>, filter: Document) -> Result<DeleteResult>
where
    T: Send + Sync,
{
    Ok(match transaction::current_session().await {
        Some(session) => collection.delete_many(filter).session(&mut *session.lock().await).await?,
        None => collection.delete_many(filter).await?,
    })
}

/// `replace_one`, joining the active session if this call is running inside
/// a `Transactions::transaction`/`with_session` block.
pub(crate) async fn replace_one<T>(
    collection: &mongodb::Collection<T>,
    filter: Document,
    replacement: T,
) -> Result<UpdateResult>
where
    T: Serialize + Send + Sync,
{
    Ok(match transaction::current_session().await {
        Some(session) => {
            collection
                .replace_one(filter, replacement)
                .session(&mut *session.lock().await)
                .await?
        }
        None => collection.replace_one(filter, replacement).await?,
    })
}

/// `update_one`, joining the active session if this call is running inside
/// a `Transactions::transaction`/`with_session` block.
pub(crate) async fn update_one<T>(
    collection: &mongodb::Collection<T>,
    filter: Document,
    update: Document,
) -> Result<UpdateResult>
where
    T: Send + Sync,
{
    Ok(match transaction::current_session().await {
        Some(session) => collection.update_one(filter, update).session(&mut *session.lock().await).await?,
        None => collection.update_one(filter, update).await?,
    })
}

pub async fn new_store(connection_string: &str) -> Result<Store> {
    let client = MongoClient::with_uri_str(connection_string).await?;
    let db = client.default_database().unwrap_or_else(|| client.database("idp"));
    let collections = Collections::new(client.clone(), &db);

    Ok(Store {
        projects: Box::new(project::DocumentProjectRepository::new(collections.clone())),
        users: Box::new(user::DocumentUserRepository::new(collections.clone())),
        clients: Box::new(client::DocumentClientRepository::new(collections.clone())),
        custom_roles: Box::new(custom_role::DocumentCustomRoleRepository::new(collections.clone())),
        sessions: Box::new(session::DocumentSessionRepository::new(collections.clone())),
        auth_code_sessions: Box::new(auth_code_session::DocumentAuthCodeSessionRepository::new(
            collections.clone(),
        )),
        transactions: Transactions::Document(transaction::DocumentTransactionManager::new(client)),
    })
}
