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

//! Static system role registry: `{resource x action}` pairs, exact-match authorization.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Cluster,
    Project,
    Role,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Read,
    Write,
    Manage,
}

impl Resource {
    fn as_str(&self) -> &'static str {
        match self {
            Resource::Cluster => "cluster",
            Resource::Project => "project",
            Resource::Role => "role",
            Resource::User => "user",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "cluster" => Some(Resource::Cluster),
            "project" => Some(Resource::Project),
            "role" => Some(Resource::Role),
            "user" => Some(Resource::User),
            _ => None,
        }
    }
}

impl Action {
    fn as_str(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Manage => "manage",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "read" => Some(Action::Read),
            "write" => Some(Action::Write),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }
}

/// A system role ID is `"<action>-<resource>"`, e.g. `read-project`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemRole {
    pub resource: Resource,
    pub action: Action,
}

impl SystemRole {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    pub fn id(&self) -> String {
        format!("{}-{}", self.action.as_str(), self.resource.as_str())
    }
}

impl Display for SystemRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Splits a role ID into `(resource, action)`. Returns `None` for custom-role
/// IDs (anything not matching the static `"<action>-<resource>"` shape) so
/// callers can distinguish system roles from project-defined custom roles.
pub fn parse(id: &str) -> Option<SystemRole> {
    let (action_part, resource_part) = id.split_once('-')?;
    let action = Action::parse(action_part)?;
    let resource = Resource::parse(resource_part)?;
    Some(SystemRole::new(resource, action))
}

/// `authorize(role_set, required_resource, required_action)` — true iff the
/// exact system role `"<action>-<resource>"` is present. No implication
/// relations: holding `manage-project` does not imply `write-project`.
pub fn authorize(roles: &[String], required_resource: Resource, required_action: Action) -> bool {
    let required = SystemRole::new(required_resource, required_action).id();
    roles.iter().any(|r| r == &required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_is_exact_match_only() {
        let roles = vec!["read-project".to_string()];
        assert!(authorize(&roles, Resource::Project, Action::Read));
        assert!(!authorize(&roles, Resource::Project, Action::Write));
        assert!(!authorize(&roles, Resource::User, Action::Read));
    }

    #[test]
    fn parse_round_trips_system_roles() {
        let role = SystemRole::new(Resource::Cluster, Action::Manage);
        let id = role.id();
        assert_eq!(parse(&id), Some(role));
    }

    #[test]
    fn parse_rejects_custom_role_ids() {
        assert_eq!(parse("00000000-0000-0000-0000-000000000000"), None);
        assert_eq!(parse("not-a-role-at-all-extra"), None);
    }
}
