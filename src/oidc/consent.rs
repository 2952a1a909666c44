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

use super::{build_redirect_url, issue};
use crate::error::Result;
use crate::model::Project;
use crate::storage::Store;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub async fn process_consent(
    store: &Store,
    project: &Project,
    base_url: &str,
    session_id: Uuid,
    accepted: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    let mut session = store.auth_code_sessions.get(&project.name, session_id).await?;

    if !accepted {
        store.auth_code_sessions.delete(&project.name, session.session_id).await?;
        let mut params = vec![("error".to_string(), "access_denied".to_string())];
        if let Some(state) = &session.state {
            params.push(("state".to_string(), state.clone()));
        }
        return Ok(build_redirect_url(&session.redirect_uri, session.response_mode, &params));
    }

    issue::issue_redirect(store, project, base_url, &mut session, now).await
}
