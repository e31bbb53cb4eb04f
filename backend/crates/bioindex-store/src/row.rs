use crate::value::SqlValue;
use std::sync::Arc;

/// One result row with named columns.
///
/// Column names are shared by every row of a result set. Callers read cells
/// by name, so select lists can change without positional breakage.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlRow {
    columns: Arc<[String]>,
    values: Vec<SqlValue>,
}

impl SqlRow {
    pub fn new(columns: Arc<[String]>, values: Vec<SqlValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Cell for `column`, `None` when the result set has no such column.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name() {
        let columns: Arc<[String]> = vec!["row_id".to_string(), "key".to_string()].into();
        let row = SqlRow::new(columns, vec![SqlValue::Integer(1), SqlValue::from("A")]);

        assert_eq!(row.get("key"), Some(&SqlValue::from("A")));
        assert_eq!(row.get("row_id"), Some(&SqlValue::Integer(1)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 2);
    }
}
