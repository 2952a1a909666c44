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

//! One-shot garbage collection sweep, run by the `idp-gc` binary on an
//! externally-scheduled timer (`dbgc_interval`) rather than an in-process
//! background task, mirroring the teacher's `onvp-activation-cleaner` binary.

use crate::error::Result;
use crate::model::{Project, ProjectFilter};
use crate::storage::Store;
use chrono::Utc;
use log::info;

pub async fn sweep(store: &Store) -> Result<()> {
    let projects = store.projects.list(ProjectFilter { name: None }).await?;
    let now = Utc::now();
    let mut sessions_deleted = 0usize;
    let mut auth_code_sessions_deleted = 0usize;

    for project in &projects {
        auth_code_sessions_deleted += sweep_auth_code_sessions(store, project, now).await?;
        sessions_deleted += sweep_sessions(store, project, now).await?;
    }

    info!(
        "gc sweep complete: {} expired sessions, {} expired auth code sessions removed across {} projects",
        sessions_deleted,
        auth_code_sessions_deleted,
        projects.len()
    );
    Ok(())
}

async fn sweep_sessions(store: &Store, project: &Project, now: chrono::DateTime<Utc>) -> Result<usize> {
    let all = store.sessions.list_all(&project.name).await?;
    let mut deleted = 0;
    for session in all {
        if session.is_expired(now) {
            store.sessions.delete(&project.name, session.session_id).await?;
            deleted += 1;
        }
    }
    Ok(deleted)
}

async fn sweep_auth_code_sessions(
    store: &Store,
    project: &Project,
    now: chrono::DateTime<Utc>,
) -> Result<usize> {
    let all = store.auth_code_sessions.list_all(&project.name).await?;
    let mut deleted = 0;
    for session in all {
        if session.is_expired(now) {
            store
                .auth_code_sessions
                .delete(&project.name, session.session_id)
                .await?;
            deleted += 1;
        }
    }
    Ok(deleted)
}
