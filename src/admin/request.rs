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

//! Read-side admin trait surface, mirroring the teacher's
//! `services::definitions::request` split. Interfaces only — see
//! SPEC_FULL.md's C8 scope decision; no HTTP handler bodies beyond `unlock`.

use crate::error::Result;
use crate::model::{Client, CustomRole, Project, User};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AdminProjectRequestService: Send + Sync {
    async fn find(&self, name: &str) -> Result<Project>;
    async fn list(&self) -> Result<Vec<Project>>;
}

#[async_trait]
pub trait AdminUserRequestService: Send + Sync {
    async fn find(&self, project: &str, id: Uuid) -> Result<User>;
    async fn list(&self, project: &str) -> Result<Vec<User>>;
}

#[async_trait]
pub trait AdminClientRequestService: Send + Sync {
    async fn find(&self, project: &str, id: &str) -> Result<Client>;
    async fn list(&self, project: &str) -> Result<Vec<Client>>;
}

#[async_trait]
pub trait AdminCustomRoleRequestService: Send + Sync {
    async fn find(&self, project: &str, id: Uuid) -> Result<CustomRole>;
    async fn list(&self, project: &str) -> Result<Vec<CustomRole>>;
}
