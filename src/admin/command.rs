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

//! Write-side admin trait surface, mirroring the teacher's
//! `services::definitions::command` split. Interfaces only, except
//! `AdminUserCommandService::unlock`, which `unlock::unlock_user` implements
//! against the `Store` directly (see SPEC_FULL.md's C8 scope decision).

use crate::error::Result;
use crate::model::{Client, CustomRole, Project, User};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AdminProjectCommandService: Send + Sync {
    async fn create(&self, project: Project) -> Result<()>;
    async fn update(&self, project: Project) -> Result<()>;
    async fn delete(&self, name: &str) -> Result<()>;
}

#[async_trait]
pub trait AdminUserCommandService: Send + Sync {
    async fn create(&self, user: User) -> Result<()>;
    async fn update(&self, user: User) -> Result<()>;
    async fn delete(&self, project: &str, id: Uuid) -> Result<()>;
    async fn unlock(&self, project: &str, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait AdminClientCommandService: Send + Sync {
    async fn create(&self, client: Client) -> Result<()>;
    async fn update(&self, client: Client) -> Result<()>;
    async fn delete(&self, project: &str, id: &str) -> Result<()>;
}

#[async_trait]
pub trait AdminCustomRoleCommandService: Send + Sync {
    async fn create(&self, role: CustomRole) -> Result<()>;
    async fn update(&self, role: CustomRole) -> Result<()>;
    async fn delete(&self, project: &str, id: Uuid) -> Result<()>;
}
