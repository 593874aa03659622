//! Column role inference from literal headers.
//!
//! Exports arrive with arbitrary header naming, so roles are matched with
//! loose, case-insensitive rules held in [`ROLE_RULES`]. For each role the
//! first header in column order that satisfies its rule wins; a role with no
//! matching header stays unresolved.

use soit_model::{ColumnRoleMap, Role};
use tracing::debug;

/// How a lower-cased, trimmed header is compared with a rule's pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Header begins with the pattern.
    StartsWith(&'static str),
    /// Header equals the pattern.
    Exact(&'static str),
    /// Header contains the pattern anywhere.
    Contains(&'static str),
}

impl HeaderMatch {
    /// Returns true if the header satisfies this matcher.
    pub fn matches(self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        match self {
            HeaderMatch::StartsWith(pattern) => header.starts_with(pattern),
            HeaderMatch::Exact(pattern) => header == pattern,
            HeaderMatch::Contains(pattern) => header.contains(pattern),
        }
    }
}

/// One entry of the role inference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRule {
    pub role: Role,
    pub matcher: HeaderMatch,
}

/// Role inference rules, one per role.
pub static ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        role: Role::StudentId,
        matcher: HeaderMatch::StartsWith("student number"),
    },
    RoleRule {
        role: Role::StudentName,
        matcher: HeaderMatch::StartsWith("student name"),
    },
    RoleRule {
        role: Role::Module,
        matcher: HeaderMatch::StartsWith("module"),
    },
    RoleRule {
        role: Role::Year,
        matcher: HeaderMatch::Exact("year"),
    },
    RoleRule {
        role: Role::Week,
        matcher: HeaderMatch::Exact("week"),
    },
    RoleRule {
        role: Role::Reason,
        matcher: HeaderMatch::Contains("reason"),
    },
    RoleRule {
        role: Role::Risk,
        matcher: HeaderMatch::Contains("risk"),
    },
    RoleRule {
        role: Role::Resolved,
        matcher: HeaderMatch::Contains("resolved"),
    },
];

/// Resolves every role against the headers.
///
/// Roles are independent: one header may satisfy several rules (a
/// `"Module risk"` column is both Module and Risk).
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnRoleMap {
    let mut roles = ColumnRoleMap::new();

    for rule in ROLE_RULES {
        match headers
            .iter()
            .map(AsRef::as_ref)
            .find(|header| rule.matcher.matches(header))
        {
            Some(header) => {
                roles.insert(rule.role, header);
            }
            None => debug!(role = %rule.role, "no header matched role"),
        }
    }

    roles
}
