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

//! The one admin mutation this expansion implements: clearing a locked
//! user's `lock_state`, required to make scenario 6 of SPEC_FULL.md's
//! end-to-end scenarios executable.

use crate::admin::audit::{AuditSink, LoggingAuditSink};
use crate::admin::guard::AdminPrincipal;
use crate::api::state::AppState;
use crate::error::{Code, Error, Result};
use crate::model::{AuditEvent, LockState};
use crate::role::{self, Action, Resource};
use actix_web::{post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

#[post("/user/{id}/unlock")]
pub async fn unlock_user(
    path: web::Path<(String, Uuid)>,
    state: web::Data<AppState>,
    principal: AdminPrincipal,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let (project_name, user_id) = path.into_inner();
    if !role::authorize(&principal.roles, Resource::User, Action::Manage) {
        return Err(Error::new(Code::AccessDenied, "manage-user role required"));
    }

    let mut user = state.store.users.get(&project_name, user_id).await?;
    user.lock_state = LockState::default();
    state.store.users.update(user).await?;

    LoggingAuditSink.record(AuditEvent {
        project: project_name,
        timestamp: Utc::now(),
        category: "admin".to_string(),
        method: req.method().to_string(),
        path: req.path().to_string(),
        error_message: None,
    });

    Ok(HttpResponse::Ok().finish())
}
