use super::{FieldDescriptor, GroupMembership, TableId};

/// Schema descriptor of a queryable table.
///
/// Immutable after the registry loads; shared across requests behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub id: TableId,
    /// Ordered field list; hydrated records carry exactly these keys
    pub fields: Vec<FieldDescriptor>,
    /// Value-indexed key, enumerated by `/api/keys`
    pub key_field: String,
    /// Field whose value identifies a row's stored object
    pub id_field: String,
    /// Field compared against the equality filter
    pub filter_field: String,
    pub value_indexed: bool,
    pub membership: Option<GroupMembership>,
}

impl TableSchema {
    /// Create a schema whose id and filter fields are the key field.
    pub fn new(id: impl Into<TableId>, key_field: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let key_field = key_field.into();
        Self {
            id: id.into(),
            fields,
            id_field: key_field.clone(),
            filter_field: key_field.clone(),
            key_field,
            value_indexed: false,
            membership: None,
        }
    }

    pub fn with_value_indexed(mut self, value_indexed: bool) -> Self {
        self.value_indexed = value_indexed;
        self
    }

    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    pub fn with_filter_field(mut self, field: impl Into<String>) -> Self {
        self.filter_field = field.into();
        self
    }

    pub fn with_membership(mut self, membership: GroupMembership) -> Self {
        self.membership = Some(membership);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
