//! Object addressing for record bodies.
//!
//! A row's object lives at `{table}/{row}`. Both segments are percent-encoded
//! path parts, so any non-empty row identifier (including ones containing
//! `/`, `.` or `..`) maps to exactly one key and never escapes its table.

use bioindex_commons::{RowId, TableId};
use object_store::path::{Path, PathPart};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(Path);

impl ObjectKey {
    pub fn for_row(table: &TableId, row: &RowId) -> Self {
        let parts = [PathPart::from(table.as_str()), PathPart::from(row.as_str())];
        Self(Path::from_iter(parts))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
