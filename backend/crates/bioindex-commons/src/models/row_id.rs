use std::fmt;

/// Identifier of a matched relational row.
///
/// Taken from the table's id field and used to address the row's object in
/// storage. Never empty, so the object key `{table}/{row}` is always a
/// two-segment path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Returns `None` for an empty identifier.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert!(RowId::new("").is_none());
        assert_eq!(RowId::new("A#1").unwrap().as_str(), "A#1");
    }
}
