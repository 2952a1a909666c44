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

use chrono::Utc;
use idp_core::model::{
    AccessType, Client, GrantType, PasswordPolicy, Project, TokenConfig, User, UserLockPolicy,
};
use idp_core::storage::{self, Store};
use idp_core::{model, token};
use std::collections::HashSet;
use uuid::Uuid;

pub const PROJECT: &str = "acme";
pub const CONFIDENTIAL_CLIENT: &str = "acme-web";
pub const PUBLIC_CLIENT: &str = "acme-spa";
pub const REDIRECT_URI: &str = "https://acme.example/callback";
pub const USER_NAME: &str = "alice";
pub const USER_PASSWORD: &str = "correct horse battery staple";

/// Builds a fresh in-memory store with one project, a confidential and a
/// public client, and one user, mirroring the teacher's `common::setup`
/// fixture-then-assert test shape but against the memory driver instead of
/// a migrated SQLite database.
pub(crate) async fn setup() -> (Store, Uuid) {
    let store = storage::memory::new_store();
    let (private_key_der, public_key_der, kid) = token::generate_key_pair().unwrap();

    let project = Project {
        name: PROJECT.to_string(),
        created_at: Utc::now(),
        permit_delete: true,
        token_config: TokenConfig {
            access_token_lifespan: 300,
            refresh_token_lifespan: 3600,
            signing_algorithm: "RS256".to_string(),
            private_key_der,
            public_key_der,
            kid,
        },
        password_policy: PasswordPolicy::default(),
        allow_grant_types: HashSet::from([
            GrantType::AuthorizationCode,
            GrantType::Password,
            GrantType::RefreshToken,
            GrantType::ClientCredentials,
        ]),
        user_lock: UserLockPolicy {
            enabled: true,
            max_login_failure: 3,
            lock_duration_secs: 900,
            failure_reset_time_secs: 3600,
        },
    };
    store.projects.add(project).await.unwrap();

    store
        .clients
        .add(Client {
            id: CONFIDENTIAL_CLIENT.to_string(),
            project_name: PROJECT.to_string(),
            secret: Some("s3cr3t".to_string()),
            access_type: AccessType::Confidential,
            created_at: Utc::now(),
            allowed_callback_urls: vec![REDIRECT_URI.to_string()],
        })
        .await
        .unwrap();

    store
        .clients
        .add(Client {
            id: PUBLIC_CLIENT.to_string(),
            project_name: PROJECT.to_string(),
            secret: None,
            access_type: AccessType::Public,
            created_at: Utc::now(),
            allowed_callback_urls: vec![format!("{REDIRECT_URI}/*")],
        })
        .await
        .unwrap();

    let user_id = Uuid::new_v4();
    store
        .users
        .add(
            PROJECT,
            User {
                id: user_id,
                project_name: PROJECT.to_string(),
                name: USER_NAME.to_string(),
                created_at: Utc::now(),
                password_hash: model::password::hash(USER_PASSWORD).unwrap(),
                system_roles: vec!["read-project".to_string()],
                custom_roles: Vec::new(),
                lock_state: Default::default(),
            },
        )
        .await
        .unwrap();

    (store, user_id)
}
