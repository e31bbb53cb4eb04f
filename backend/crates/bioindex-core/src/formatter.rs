//! Row- and column-oriented shaping of hydrated records.

use crate::error::{QueryError, Result};
use bioindex_commons::Record;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Response shape requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One field→value object per record
    #[default]
    #[serde(alias = "row")]
    Object,
    /// One field→values array per field
    Column,
}

/// Column-oriented records: each column holds one value per row, in row
/// order. Serializes as a JSON object keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarRecords {
    columns: Vec<String>,
    values: Vec<Vec<Value>>,
    rows: usize,
}

impl ColumnarRecords {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Transpose back to records.
    pub fn into_rows(self) -> Vec<Record> {
        let mut rows: Vec<Map<String, Value>> = (0..self.rows).map(|_| Map::new()).collect();
        for (column, values) in self.columns.into_iter().zip(self.values) {
            for (row, value) in rows.iter_mut().zip(values) {
                row.insert(column.clone(), value);
            }
        }
        rows.into_iter().map(Record::from).collect()
    }
}

impl Serialize for ColumnarRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, values) in self.columns.iter().zip(&self.values) {
            map.serialize_entry(column, values)?;
        }
        map.end()
    }
}

/// Shaped result set, serialized as either an array or an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormattedRecords {
    Rows(Vec<Record>),
    Columns(ColumnarRecords),
}

impl FormattedRecords {
    /// Number of records, whatever the shape.
    pub fn len(&self) -> usize {
        match self {
            FormattedRecords::Rows(rows) => rows.len(),
            FormattedRecords::Columns(columns) => columns.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format(records: Vec<Record>, format: OutputFormat) -> Result<FormattedRecords> {
        match format {
            OutputFormat::Object => Ok(FormattedRecords::Rows(records)),
            OutputFormat::Column => Self::columns(records).map(FormattedRecords::Columns),
        }
    }

    /// Transpose records into columns keyed by the first record's fields.
    ///
    /// Every record must carry exactly the same field set as the first.
    pub fn columns(records: Vec<Record>) -> Result<ColumnarRecords> {
        let Some(first) = records.first() else {
            return Ok(ColumnarRecords::default());
        };

        let columns: Vec<String> = first.field_names().map(str::to_string).collect();
        let rows = records.len();
        let mut values: Vec<Vec<Value>> = columns.iter().map(|_| Vec::with_capacity(rows)).collect();

        for (index, record) in records.into_iter().enumerate() {
            if record.len() != columns.len() {
                return Err(QueryError::HeterogeneousRecords { index });
            }
            let mut fields = record.into_map();
            for (column, column_values) in columns.iter().zip(values.iter_mut()) {
                let value = fields
                    .remove(column)
                    .ok_or(QueryError::HeterogeneousRecords { index })?;
                column_values.push(value);
            }
        }

        Ok(ColumnarRecords {
            columns,
            values,
            rows,
        })
    }
}
