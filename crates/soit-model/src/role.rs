//! Semantic column roles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Semantic category a column can play in a risk export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Role {
    StudentId,
    StudentName,
    Module,
    Year,
    Week,
    Reason,
    Risk,
    Resolved,
}

impl Role {
    /// All roles, in resolution order.
    pub const ALL: [Role; 8] = [
        Role::StudentId,
        Role::StudentName,
        Role::Module,
        Role::Year,
        Role::Week,
        Role::Reason,
        Role::Risk,
        Role::Resolved,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Role::StudentId => "Student ID",
            Role::StudentName => "Student name",
            Role::Module => "Module",
            Role::Year => "Year",
            Role::Week => "Week",
            Role::Reason => "Reason",
            Role::Risk => "Risk",
            Role::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mapping from role to the header that plays it.
///
/// At most one header per role; the first insertion wins. Unresolved roles
/// are a normal state and simply read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoleMap {
    columns: BTreeMap<Role, String>,
}

impl ColumnRoleMap {
    /// Creates an empty map (every role unresolved).
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a header to a role unless the role is already resolved.
    ///
    /// Returns true if the header was recorded.
    pub fn insert(&mut self, role: Role, header: impl Into<String>) -> bool {
        if self.columns.contains_key(&role) {
            return false;
        }
        self.columns.insert(role, header.into());
        true
    }

    /// Header resolved for a role.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.columns.get(&role).map(String::as_str)
    }

    /// Returns true if the role has a header.
    pub fn is_resolved(&self, role: Role) -> bool {
        self.columns.contains_key(&role)
    }

    /// Number of resolved roles.
    pub fn resolved_count(&self) -> usize {
        self.columns.len()
    }

    /// Every role with its header (if any), in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&str>)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

impl Serialize for ColumnRoleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(role, header)| (role, header)))
    }
}

/// Counting rule applied to every grouped count of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountBasis {
    /// Distinct non-missing student ids per group.
    DistinctStudents,
    /// Plain row counts (no student id column was found).
    Rows,
}

impl CountBasis {
    /// Basis implied by a role map over a table's headers.
    ///
    /// Student counts need a StudentId header that is one of `headers`.
    pub fn for_columns<S: AsRef<str>>(roles: &ColumnRoleMap, headers: &[S]) -> Self {
        let present = roles
            .get(Role::StudentId)
            .is_some_and(|id| headers.iter().any(|header| header.as_ref() == id));
        if present {
            CountBasis::DistinctStudents
        } else {
            CountBasis::Rows
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            CountBasis::DistinctStudents => "distinct students",
            CountBasis::Rows => "rows",
        }
    }
}
