//! `[[tables]]` entries and their conversion into `TableSchema`.

use bioindex_commons::{
    is_valid_identifier, FieldDescriptor, GroupMembership, GroupSet, TableSchema,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One queryable table as written in the config file.
///
/// ```toml
/// [[tables]]
/// name = "patients"
/// key = "code"
/// id_field = "id"
/// value_indexed = true
/// fields = [
///     { name = "id", type = "integer" },
///     { name = "code", type = "string" },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub key: String,
    /// Defaults to `key`
    #[serde(default)]
    pub id_field: Option<String>,
    /// Defaults to `key`
    #[serde(default)]
    pub filter_field: Option<String>,
    #[serde(default)]
    pub value_indexed: bool,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub membership: Option<MembershipConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipConfig {
    pub category_field: String,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    /// Comma-separated category allow-list; unset admits every category
    #[serde(default)]
    pub allow: Option<String>,
}

impl TableConfig {
    /// Validate the entry and build its immutable schema.
    pub fn to_schema(&self) -> anyhow::Result<TableSchema> {
        if !is_valid_identifier(&self.name) {
            return Err(anyhow::anyhow!("Invalid table name '{}'", self.name));
        }

        if self.fields.is_empty() {
            return Err(anyhow::anyhow!("Table '{}' has no fields", self.name));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !is_valid_identifier(&field.name) {
                return Err(anyhow::anyhow!(
                    "Invalid field name '{}' in table '{}'",
                    field.name,
                    self.name
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(anyhow::anyhow!(
                    "Duplicate field '{}' in table '{}'",
                    field.name,
                    self.name
                ));
            }
        }

        let id_field = self.id_field.clone().unwrap_or_else(|| self.key.clone());
        let filter_field = self.filter_field.clone().unwrap_or_else(|| self.key.clone());

        for (role, field) in [("key", &self.key), ("id_field", &id_field), ("filter_field", &filter_field)] {
            if !seen.contains(field.as_str()) {
                return Err(anyhow::anyhow!(
                    "Table '{}' {} '{}' is not one of its fields",
                    self.name,
                    role,
                    field
                ));
            }
        }

        let mut schema = TableSchema::new(self.name.as_str(), self.key.clone(), self.fields.clone())
            .with_value_indexed(self.value_indexed)
            .with_id_field(id_field)
            .with_filter_field(filter_field);

        if let Some(membership) = &self.membership {
            if !seen.contains(membership.category_field.as_str()) {
                return Err(anyhow::anyhow!(
                    "Table '{}' category_field '{}' is not one of its fields",
                    self.name,
                    membership.category_field
                ));
            }

            let mut rule = GroupMembership::new(membership.category_field.clone());
            for group in &membership.groups {
                if rule.group(&group.name).is_some() {
                    return Err(anyhow::anyhow!(
                        "Duplicate group '{}' in table '{}'",
                        group.name,
                        self.name
                    ));
                }
                rule.insert(group.name.clone(), GroupSet::parse(group.allow.as_deref()));
            }
            schema = schema.with_membership(rule);
        }

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bioindex_commons::FieldType;

    fn table() -> TableConfig {
        TableConfig {
            name: "patients".to_string(),
            key: "code".to_string(),
            id_field: Some("id".to_string()),
            filter_field: None,
            value_indexed: true,
            fields: vec![
                FieldDescriptor::new("id", FieldType::Integer),
                FieldDescriptor::new("code", FieldType::String),
                FieldDescriptor::new("category", FieldType::String),
            ],
            membership: None,
        }
    }

    #[test]
    fn test_to_schema_defaults_filter_to_key() {
        let schema = table().to_schema().unwrap();
        assert_eq!(schema.id.as_str(), "patients");
        assert_eq!(schema.key_field, "code");
        assert_eq!(schema.id_field, "id");
        assert_eq!(schema.filter_field, "code");
        assert!(schema.value_indexed);
        assert!(schema.membership.is_none());
    }

    #[test]
    fn test_unknown_key_field_rejected() {
        let mut cfg = table();
        cfg.key = "missing".to_string();
        assert!(cfg.to_schema().is_err());
    }

    #[test]
    fn test_unsafe_names_rejected() {
        let mut cfg = table();
        cfg.name = "patients; drop".to_string();
        assert!(cfg.to_schema().is_err());

        let mut cfg = table();
        cfg.fields.push(FieldDescriptor::new("bad name", FieldType::String));
        assert!(cfg.to_schema().is_err());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut cfg = table();
        cfg.fields.push(FieldDescriptor::new("code", FieldType::String));
        assert!(cfg.to_schema().is_err());
    }

    #[test]
    fn test_membership_parsed_once() {
        let mut cfg = table();
        cfg.membership = Some(MembershipConfig {
            category_field: "category".to_string(),
            groups: vec![
                GroupConfig {
                    name: "t2d".to_string(),
                    allow: Some("glycemic,lipids".to_string()),
                },
                GroupConfig {
                    name: "all".to_string(),
                    allow: None,
                },
            ],
        });

        let schema = cfg.to_schema().unwrap();
        let membership = schema.membership.unwrap();
        assert_eq!(membership.category_field, "category");
        assert!(membership.group("t2d").unwrap().contains("lipids"));
        assert_eq!(membership.group("all"), Some(&GroupSet::All));
    }

    #[test]
    fn test_membership_category_must_exist() {
        let mut cfg = table();
        cfg.membership = Some(MembershipConfig {
            category_field: "nope".to_string(),
            groups: vec![],
        });
        assert!(cfg.to_schema().is_err());
    }
}
