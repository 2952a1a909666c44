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

//! Materializes the `master` project and its admin user/client on startup,
//! the way the teacher's `cli::backend::main` seeds the first operator
//! account before the server starts serving requests. Runs as one
//! transaction — a seed interrupted halfway would leave a master project
//! with no admin able to reach it.

use crate::config::Config;
use crate::error::Result;
use crate::model::project::MASTER_PROJECT_NAME;
use crate::model::{self, password, AccessType, Client, PasswordPolicy, Project, TokenConfig, User, UserLockPolicy};
use crate::role::{Action, Resource, SystemRole};
use crate::storage::Store;
use crate::token;
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

pub async fn seed_master_project(store: &Store, config: &Config) -> Result<()> {
    if store.projects.get(MASTER_PROJECT_NAME).await.is_ok() {
        return Ok(());
    }

    let admin_name = config.admin_name.clone();
    let admin_password = config.admin_password.clone();

    store
        .transactions
        .transaction(MASTER_PROJECT_NAME, move || async move {
            let (private_key_der, public_key_der, kid) = token::generate_key_pair()?;
            let project = Project {
                name: MASTER_PROJECT_NAME.to_string(),
                created_at: Utc::now(),
                permit_delete: false,
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
                    model::GrantType::Password,
                    model::GrantType::RefreshToken,
                    model::GrantType::ClientCredentials,
                ]),
                user_lock: UserLockPolicy::default(),
            };
            store.projects.add(project).await?;

            let admin = User {
                id: Uuid::new_v4(),
                project_name: MASTER_PROJECT_NAME.to_string(),
                name: admin_name,
                created_at: Utc::now(),
                password_hash: password::hash(&admin_password)?,
                system_roles: vec![
                    SystemRole::new(Resource::Cluster, Action::Manage).id(),
                    SystemRole::new(Resource::Project, Action::Manage).id(),
                    SystemRole::new(Resource::User, Action::Manage).id(),
                    SystemRole::new(Resource::Role, Action::Manage).id(),
                ],
                custom_roles: Vec::new(),
                lock_state: Default::default(),
            };
            store.users.add(MASTER_PROJECT_NAME, admin).await?;

            let admin_client = Client {
                id: "admin-cli".to_string(),
                project_name: MASTER_PROJECT_NAME.to_string(),
                secret: None,
                access_type: AccessType::Public,
                created_at: Utc::now(),
                allowed_callback_urls: Vec::new(),
            };
            store.clients.add(admin_client).await?;

            Ok(())
        })
        .await
}
