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

//! Credential verification, the user lock policy, and the login-step state
//! machine that follows a failed or successful attempt.

use crate::error::{Code, Error, Result};
use crate::model::{password, AuthCodeSession, Project, User};
use crate::storage::Store;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Authenticates `user_name`/`password` against the project, enforcing and
/// updating the lock policy. Returns `request_unauthorized` uniformly for a
/// missing user, a wrong password, or an active lock, so none of the three
/// are distinguishable to the caller.
pub async fn authenticate_user(
    store: &Store,
    project: &Project,
    user_name: &str,
    password_candidate: &str,
    now: DateTime<Utc>,
) -> Result<User> {
    let mut user = store
        .users
        .get_by_name(&project.name, user_name)
        .await
        .map_err(|_| Error::new(Code::RequestUnauthorized, "invalid user name or password"))?;

    let policy = &project.user_lock;
    if policy.enabled && user.lock_state.locked {
        let unlock_deadline = user
            .lock_state
            .verify_failed_times
            .last()
            .copied()
            .map(|last| last + chrono::Duration::seconds(policy.lock_duration_secs));
        let past_deadline = match unlock_deadline {
            Some(deadline) => now > deadline,
            None => true,
        };
        if !past_deadline {
            return Err(Error::new(Code::RequestUnauthorized, "account is locked"));
        }
    }

    let verified = password::verify(password_candidate, &user.password_hash)?;

    if !policy.enabled {
        return if verified {
            Ok(user)
        } else {
            Err(Error::new(Code::RequestUnauthorized, "invalid user name or password"))
        };
    }

    if verified {
        user.lock_state.locked = false;
        user.lock_state.verify_failed_times.clear();
        store.users.update(user.clone()).await?;
        return Ok(user);
    }

    let window_start = now - chrono::Duration::seconds(policy.failure_reset_time_secs);
    user.lock_state.verify_failed_times.retain(|t| *t >= window_start);
    user.lock_state.verify_failed_times.push(now);
    if user.lock_state.verify_failed_times.len() >= policy.max_login_failure {
        user.lock_state.locked = true;
    }
    store.users.update(user.clone()).await?;
    Err(Error::new(Code::RequestUnauthorized, "invalid user name or password"))
}

/// What the login-step handler hands back to the HTTP layer.
pub enum LoginOutcome {
    /// Wrong credentials: the old session was deleted, this is its
    /// replacement, carrying the same authorize-request parameters.
    Retry(AuthCodeSession),
    /// Credentials accepted and `prompt=consent` was requested.
    NeedsConsent(AuthCodeSession),
    /// Credentials accepted and no consent step is needed.
    ReadyToIssue(AuthCodeSession),
}

pub async fn process_login(
    store: &Store,
    project: &Project,
    session_id: Uuid,
    user_name: &str,
    password_candidate: &str,
    now: DateTime<Utc>,
) -> Result<LoginOutcome> {
    let session = store.auth_code_sessions.get(&project.name, session_id).await?;
    if session.is_expired(now) {
        return Err(Error::new(Code::SessionExpired, "login session has expired"));
    }

    match authenticate_user(store, project, user_name, password_candidate, now).await {
        Ok(user) => {
            let mut session = session;
            session.user_id = Some(user.id);
            session.login_date = Some(now);
            if session.wants_consent() {
                store.auth_code_sessions.update(session.clone()).await?;
                Ok(LoginOutcome::NeedsConsent(session))
            } else {
                store.auth_code_sessions.update(session.clone()).await?;
                Ok(LoginOutcome::ReadyToIssue(session))
            }
        }
        Err(_) => {
            let retry = AuthCodeSession {
                session_id: Uuid::new_v4(),
                code: None,
                user_id: None,
                login_date: None,
                ..session.clone()
            };
            // Retiring the failed attempt's session and replacing it must
            // land together, or a storage failure mid-sequence leaves the
            // user with no session to retry the login against.
            store
                .transactions
                .transaction(&project.name, || async {
                    store.auth_code_sessions.delete(&project.name, session.session_id).await?;
                    store.auth_code_sessions.add(retry.clone()).await
                })
                .await?;
            Ok(LoginOutcome::Retry(retry))
        }
    }
}
