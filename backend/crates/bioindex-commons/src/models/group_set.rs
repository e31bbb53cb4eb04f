use std::collections::{BTreeSet, HashMap};

/// A group allow-list of categories.
///
/// Parsed once from its comma-separated configuration/database form. An unset
/// allow-list admits every category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSet {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl GroupSet {
    /// Parse an optional comma-separated list.
    ///
    /// `None` means "unset" and admits everything. Surrounding whitespace
    /// around members is trimmed and empty members are dropped, so `Some("")`
    /// admits nothing.
    pub fn parse(list: Option<&str>) -> Self {
        match list {
            None => GroupSet::All,
            Some(list) => GroupSet::Only(
                list.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        match self {
            GroupSet::All => true,
            GroupSet::Only(members) => members.contains(category),
        }
    }

    /// Members of an explicit allow-list, `None` when every category is admitted.
    pub fn members(&self) -> Option<&BTreeSet<String>> {
        match self {
            GroupSet::All => None,
            GroupSet::Only(members) => Some(members),
        }
    }
}

/// Table-level group membership rule.
///
/// When a table carries a membership rule, a filter value names a group and a
/// row belongs to it when the group's allow-list contains the row's
/// `category_field` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMembership {
    pub category_field: String,
    groups: HashMap<String, GroupSet>,
}

impl GroupMembership {
    pub fn new(category_field: impl Into<String>) -> Self {
        Self {
            category_field: category_field.into(),
            groups: HashMap::new(),
        }
    }

    pub fn with_group(mut self, name: impl Into<String>, allow: GroupSet) -> Self {
        self.groups.insert(name.into(), allow);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, allow: GroupSet) {
        self.groups.insert(name.into(), allow);
    }

    pub fn group(&self, name: &str) -> Option<&GroupSet> {
        self.groups.get(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
