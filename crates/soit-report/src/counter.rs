//! Grouped counting under a [`CountBasis`].

use std::collections::{BTreeMap, BTreeSet};

use soit_model::{CountBasis, CountMap, NestedCountMap};

use crate::week::week_sort_key;

#[derive(Debug, Default)]
struct Group {
    rows: u64,
    students: BTreeSet<String>,
}

/// Per-key counts, remembering the order in which keys were first seen.
#[derive(Debug)]
pub(crate) struct GroupCounter {
    basis: CountBasis,
    groups: Vec<(String, Group)>,
    positions: BTreeMap<String, usize>,
}

impl GroupCounter {
    pub(crate) fn new(basis: CountBasis) -> Self {
        Self {
            basis,
            groups: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Records one row under `key`.
    pub(crate) fn add(&mut self, key: String, student: Option<String>) {
        let position = match self.positions.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.positions.insert(key.clone(), position);
                self.groups.push((key, Group::default()));
                position
            }
        };
        let group = &mut self.groups[position].1;
        group.rows += 1;
        if let Some(student) = student {
            group.students.insert(student);
        }
    }

    fn group_count(&self, group: &Group) -> u64 {
        match self.basis {
            CountBasis::DistinctStudents => group.students.len() as u64,
            CountBasis::Rows => group.rows,
        }
    }

    /// Count for a key; unseen keys count zero.
    pub(crate) fn count(&self, key: &str) -> u64 {
        self.positions
            .get(key)
            .map_or(0, |&position| self.group_count(&self.groups[position].1))
    }

    /// Keys in first-seen order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|(key, _)| key.as_str())
    }

    /// Counts ranked descending; equal counts keep first-seen order.
    pub(crate) fn ranked(&self) -> CountMap {
        let mut entries: Vec<(&str, u64)> = self
            .groups
            .iter()
            .map(|(key, group)| (key.as_str(), self.group_count(group)))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().collect()
    }

    /// Counts in week order; equal week keys keep first-seen order.
    pub(crate) fn by_week(&self) -> CountMap {
        let mut entries: Vec<(&str, u64)> = self
            .groups
            .iter()
            .map(|(key, group)| (key.as_str(), self.group_count(group)))
            .collect();
        entries.sort_by_key(|(key, _)| week_sort_key(key));
        entries.into_iter().collect()
    }
}

/// Two-level counts: outer key (a week) to inner key (a module).
#[derive(Debug)]
pub(crate) struct NestedCounter {
    basis: CountBasis,
    outer: Vec<(String, GroupCounter)>,
    positions: BTreeMap<String, usize>,
}

impl NestedCounter {
    pub(crate) fn new(basis: CountBasis) -> Self {
        Self {
            basis,
            outer: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, outer: String, inner: String, student: Option<String>) {
        let position = match self.positions.get(&outer) {
            Some(&position) => position,
            None => {
                let position = self.outer.len();
                self.positions.insert(outer.clone(), position);
                self.outer.push((outer, GroupCounter::new(self.basis)));
                position
            }
        };
        self.outer[position].1.add(inner, student);
    }

    /// Inner counter for an outer key.
    pub(crate) fn get(&self, outer: &str) -> Option<&GroupCounter> {
        self.positions
            .get(outer)
            .map(|&position| &self.outer[position].1)
    }

    /// Outer keys in first-seen order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.outer.iter().map(|(key, _)| key.as_str())
    }

    /// Outer keys in week order, inner maps ranked by count.
    pub(crate) fn by_week_ranked(&self) -> NestedCountMap {
        let mut entries: Vec<(&str, CountMap)> = self
            .outer
            .iter()
            .map(|(key, inner)| (key.as_str(), inner.ranked()))
            .collect();
        entries.sort_by_key(|(key, _)| week_sort_key(key));
        entries.into_iter().collect()
    }
}
