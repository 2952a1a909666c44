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

use crate::error::{Code, Error, Result};
use crate::model::Project;
use crate::storage::Store;
use crate::token;

/// Only `refresh_token` (the default hint) is revocable; `access_token`
/// is rejected with `unsupported_token_type`. A token that fails to
/// validate is treated as already revoked, per RFC 7009 §2.2 — the
/// response is 200 either way.
pub async fn revoke(store: &Store, project: &Project, base_url: &str, token: &str, token_type_hint: Option<&str>) -> Result<()> {
    if token_type_hint == Some("access_token") {
        return Err(Error::new(Code::UnsupportedTokenType, "access tokens cannot be revoked"));
    }
    if let Ok(claims) = token::validate_refresh_token(token, project, base_url) {
        let _ = store.sessions.delete(&project.name, claims.session_id).await;
    }
    Ok(())
}
