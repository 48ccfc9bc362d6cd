//! Staff roles and the predicates the router filters on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a client registers under.
///
/// Closed enumeration of the roles the floor application knows about.
/// A wire string outside this set maps to [`Role::Unknown`], which still
/// registers (and receives broadcast traffic) but never satisfies a
/// role predicate, so a typo'd role cannot leak role-filtered events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Cook,
    LineCook,
    Waiter,
    Manager,
    Admin,
    Housekeeper,
    Unknown,
}

impl Role {
    /// Wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cook => "COOK",
            Role::LineCook => "LINE_COOK",
            Role::Waiter => "WAITER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
            Role::Housekeeper => "HOUSEKEEPER",
            Role::Unknown => "UNKNOWN",
        }
    }

    /// Roles that receive management notifications (confidential reports,
    /// urgent notices, checklist completions).
    pub fn is_management(self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }

    /// Roles that receive the kitchen copy of voice orders.
    pub fn is_kitchen(self) -> bool {
        matches!(self, Role::Cook | Role::LineCook)
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "COOK" => Role::Cook,
            "LINE_COOK" => Role::LineCook,
            "WAITER" => Role::Waiter,
            "MANAGER" => Role::Manager,
            "ADMIN" => Role::Admin,
            "HOUSEKEEPER" => Role::Housekeeper,
            _ => Role::Unknown,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
