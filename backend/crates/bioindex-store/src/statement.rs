use crate::value::SqlValue;

/// A parameterized SQL statement.
///
/// Values are always bound as `?` parameters; only identifiers are
/// interpolated, and those go through `quote_identifier`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("group"), "\"group\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_bind_in_order() {
        let stmt = Statement::new("SELECT ? , ?").bind("a").bind(2i64);
        assert_eq!(stmt.params(), &[SqlValue::from("a"), SqlValue::Integer(2)]);
        assert_eq!(stmt.sql(), "SELECT ? , ?");
    }
}
