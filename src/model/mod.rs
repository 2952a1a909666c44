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

pub mod audit;
pub mod auth_code_session;
pub mod client;
pub mod custom_role;
pub mod password;
pub mod project;
pub mod session;
pub mod types;
pub mod user;
pub mod validate;

pub use audit::AuditEvent;
pub use auth_code_session::{AuthCodeSession, AuthCodeSessionFilter};
pub use client::{AccessType, Client, ClientFilter};
pub use custom_role::{CustomRole, CustomRoleFilter};
pub use project::{PasswordPolicy, Project, ProjectFilter, TokenConfig, UserLockPolicy};
pub use session::{Session, SessionFilter};
pub use types::{GrantType, PromptValue, ResponseMode, ResponseType};
pub use user::{LockState, User, UserFilter};
