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

mod common;

use chrono::Utc;
use common::{CONFIDENTIAL_CLIENT, PROJECT, REDIRECT_URI};
use idp_core::error::Code;
use idp_core::model::user::RoleType;
use idp_core::model::{Session, SessionFilter};
use idp_core::storage;

#[tokio::test]
async fn user_round_trips_and_rejects_duplicate_name() {
    let (store, user_id) = common::setup().await;

    let user = store.users.get(PROJECT, user_id).await.unwrap();
    assert_eq!(user.name, common::USER_NAME);

    let duplicate = idp_core::model::User {
        id: uuid::Uuid::new_v4(),
        project_name: PROJECT.to_string(),
        name: common::USER_NAME.to_string(),
        created_at: Utc::now(),
        password_hash: user.password_hash.clone(),
        system_roles: Vec::new(),
        custom_roles: Vec::new(),
        lock_state: Default::default(),
    };
    let err = store.users.add(PROJECT, duplicate).await.unwrap_err();
    assert_eq!(err.code(), &Code::AlreadyExists);
}

#[tokio::test]
async fn user_role_assignment_is_idempotent() {
    let (store, user_id) = common::setup().await;

    store.users.add_role(PROJECT, user_id, RoleType::System, "manage-user").await.unwrap();
    store.users.add_role(PROJECT, user_id, RoleType::System, "manage-user").await.unwrap();
    let user = store.users.get(PROJECT, user_id).await.unwrap();
    assert_eq!(user.system_roles.iter().filter(|r| *r == "manage-user").count(), 1);

    store.users.delete_role(PROJECT, user_id, "manage-user").await.unwrap();
    let user = store.users.get(PROJECT, user_id).await.unwrap();
    assert!(!user.system_roles.iter().any(|r| r == "manage-user"));
}

#[tokio::test]
async fn client_lookup_fails_for_unknown_id() {
    let (store, _) = common::setup().await;
    let client = store.clients.get(PROJECT, CONFIDENTIAL_CLIENT).await.unwrap();
    assert_eq!(client.allowed_callback_urls, vec![REDIRECT_URI.to_string()]);

    let err = store.clients.get(PROJECT, "no-such-client").await.unwrap_err();
    assert_eq!(err.code(), &Code::NoSuchClient);
}

#[tokio::test]
async fn get_list_hides_expired_sessions_but_list_all_sees_them() {
    let (store, user_id) = common::setup().await;
    let now = Utc::now();

    let live = Session {
        session_id: uuid::Uuid::new_v4(),
        project_name: PROJECT.to_string(),
        user_id,
        created_at: now,
        expires_in: 3600,
        from_ip: None,
    };
    let expired = Session {
        session_id: uuid::Uuid::new_v4(),
        project_name: PROJECT.to_string(),
        user_id,
        created_at: now - chrono::Duration::seconds(7200),
        expires_in: 3600,
        from_ip: None,
    };
    store.sessions.new_session(live.clone()).await.unwrap();
    store.sessions.new_session(expired.clone()).await.unwrap();

    let visible = store.sessions.get_list(PROJECT, SessionFilter::default()).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].session_id, live.session_id);

    let all = store.sessions.list_all(PROJECT).await.unwrap();
    assert_eq!(all.len(), 2);

    let err = store.sessions.get(PROJECT, expired.session_id).await.unwrap_err();
    assert_eq!(err.code(), &Code::InvalidGrant);
}

#[tokio::test]
async fn gc_sweep_removes_only_expired_sessions() {
    let (store, user_id) = common::setup().await;
    let now = Utc::now();

    store
        .sessions
        .new_session(Session {
            session_id: uuid::Uuid::new_v4(),
            project_name: PROJECT.to_string(),
            user_id,
            created_at: now,
            expires_in: 3600,
            from_ip: None,
        })
        .await
        .unwrap();
    store
        .sessions
        .new_session(Session {
            session_id: uuid::Uuid::new_v4(),
            project_name: PROJECT.to_string(),
            user_id,
            created_at: now - chrono::Duration::seconds(7200),
            expires_in: 3600,
            from_ip: None,
        })
        .await
        .unwrap();

    storage::gc::sweep(&store).await.unwrap();

    let remaining = store.sessions.list_all(PROJECT).await.unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn transaction_rolls_back_on_error() {
    let (store, _) = common::setup().await;

    let client_id = "throwaway-client";
    let result: idp_core::error::Result<()> = store
        .transactions
        .transaction(PROJECT, || async {
            store
                .clients
                .add(idp_core::model::Client {
                    id: client_id.to_string(),
                    project_name: PROJECT.to_string(),
                    secret: None,
                    access_type: idp_core::model::AccessType::Public,
                    created_at: Utc::now(),
                    allowed_callback_urls: Vec::new(),
                })
                .await?;
            Err(idp_core::error::Error::new(Code::ServerError, "simulated failure after the write"))
        })
        .await;

    assert!(result.is_err());
    let err = store.clients.get(PROJECT, client_id).await.unwrap_err();
    assert_eq!(err.code(), &Code::NoSuchClient);
}
