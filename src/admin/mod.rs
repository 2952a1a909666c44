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

//! CRUD over C3 entities, gated by the C2 role registry. This module
//! defines the CQRS trait surface the same way the teacher splits
//! `services::definitions::{request,command}`, plus the bearer-principal
//! guard and audit sink it depends on. Only `unlock` (`unlock::unlock_user`)
//! has a working HTTP handler; the rest of admin CRUD stays trait-only.

pub mod audit;
pub mod command;
pub mod guard;
pub mod request;
pub mod unlock;

pub use audit::{AuditSink, LoggingAuditSink};
pub use guard::AdminPrincipal;
