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

use crate::model::AuditEvent;

/// Where administrative mutations report what happened. A durable audit
/// store is out of scope; `LoggingAuditSink` is the only implementation.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

pub struct LoggingAuditSink;

impl AuditSink for LoggingAuditSink {
    fn record(&self, event: AuditEvent) {
        match &event.error_message {
            Some(message) => log::warn!(
                "audit: project={} method={} path={} error={message}",
                event.project,
                event.method,
                event.path
            ),
            None => log::info!(
                "audit: project={} method={} path={}",
                event.project,
                event.method,
                event.path
            ),
        }
    }
}
