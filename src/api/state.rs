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

//! The single `web::Data<AppState>` handle every endpoint handler is given,
//! bundling the storage capability, session timing, the JWKS cache, and the
//! login/consent page renderer.

use crate::api::pages::LoginPageRenderer;
use crate::storage::Store;
use crate::token::JwksCache;

pub struct AppState {
    pub store: Store,
    pub login_session_expires_in: i64,
    pub sso_expires_in: i64,
    pub jwks_cache: JwksCache,
    pub pages: Box<dyn LoginPageRenderer>,
}
