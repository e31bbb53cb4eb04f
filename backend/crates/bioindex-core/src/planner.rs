//! Relational query planning: table + filter + cap to ordered row ids.

use crate::error::{QueryError, Result};
use bioindex_commons::{FieldType, GroupSet, RowId, TableSchema};
use bioindex_configs::TableRegistry;
use bioindex_store::{quote_identifier, IndexStore, SqlRow, SqlValue, Statement};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// One query request: which table, which rows, how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub table: String,
    /// Normalized equality filter; never empty or whitespace-only
    pub filter: Option<String>,
    /// `None` is unbounded
    pub cap: Option<NonZeroUsize>,
}

impl QuerySpec {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filter: None,
            cap: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<&str>) -> Self {
        self.filter = normalize_filter(filter);
        self
    }

    pub fn with_cap(mut self, cap: Option<NonZeroUsize>) -> Self {
        self.cap = cap;
        self
    }
}

/// Trim a filter value; empty or whitespace-only filters become absent.
pub fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
}

/// Typed row of the plan query.
struct PlannedRow {
    row_id: Option<RowId>,
}

impl PlannedRow {
    const COLUMN: &'static str = "row_id";

    fn from_row(row: &SqlRow) -> Self {
        let row_id = row
            .get(Self::COLUMN)
            .and_then(SqlValue::to_text)
            .and_then(RowId::new);
        Self { row_id }
    }
}

/// Restriction derived from a filter value.
#[derive(Debug, PartialEq)]
enum Restriction {
    None,
    /// `filter_field = ?`
    Equals(SqlValue),
    /// `field IN (...)`
    InCategories { field: String, categories: Vec<String> },
    /// Nothing can match; the query is skipped
    Empty,
}

/// Builds and runs the relational query yielding matching row ids.
pub struct RecordQueryPlanner {
    registry: Arc<TableRegistry>,
    store: Arc<dyn IndexStore>,
}

impl RecordQueryPlanner {
    pub fn new(registry: Arc<TableRegistry>, store: Arc<dyn IndexStore>) -> Self {
        Self { registry, store }
    }

    /// Row ids in the store's result order, at most `spec.cap` of them.
    pub async fn plan(&self, spec: &QuerySpec) -> Result<Vec<RowId>> {
        let schema = self
            .registry
            .get(&spec.table)
            .ok_or_else(|| QueryError::UnknownTable(spec.table.clone()))?;

        let filter = normalize_filter(spec.filter.as_deref());
        let restriction = restriction_for(&schema, filter.as_deref())?;
        let Some(statement) = plan_statement(&schema, restriction, spec.cap) else {
            log::debug!("Filter {:?} matches no rows in index {}", filter, schema.id);
            return Ok(Vec::new());
        };

        let rows = self.store.query(statement).await?;

        let mut row_ids = Vec::with_capacity(rows.len());
        for (position, row) in rows.iter().enumerate() {
            match PlannedRow::from_row(row).row_id {
                Some(row_id) => row_ids.push(row_id),
                None => log::warn!(
                    "Skipping row {} of index {}: empty or null {}",
                    position,
                    schema.id,
                    schema.id_field
                ),
            }
        }

        if let Some(cap) = spec.cap {
            row_ids.truncate(cap.get());
        }
        Ok(row_ids)
    }
}

fn restriction_for(schema: &TableSchema, filter: Option<&str>) -> Result<Restriction> {
    let Some(filter) = filter else {
        return Ok(Restriction::None);
    };

    if let Some(membership) = &schema.membership {
        return Ok(match membership.group(filter) {
            None => Restriction::Empty,
            Some(GroupSet::All) => Restriction::None,
            Some(GroupSet::Only(categories)) if categories.is_empty() => Restriction::Empty,
            Some(GroupSet::Only(categories)) => Restriction::InCategories {
                field: membership.category_field.clone(),
                categories: categories.iter().cloned().collect(),
            },
        });
    }

    let field_type = schema
        .field(&schema.filter_field)
        .map(|f| f.field_type)
        .unwrap_or(FieldType::String);
    coerce_filter(field_type, filter)
        .map(Restriction::Equals)
        .ok_or_else(|| QueryError::InvalidFilter {
            table: schema.id.to_string(),
            reason: format!(
                "'{}' is not a valid {} for field {}",
                filter,
                field_type.as_str(),
                schema.filter_field
            ),
        })
}

/// Convert a filter string to a parameter matching the filter field's type.
fn coerce_filter(field_type: FieldType, filter: &str) -> Option<SqlValue> {
    match field_type {
        FieldType::String | FieldType::Json => Some(SqlValue::from(filter)),
        FieldType::Integer => filter.parse::<i64>().ok().map(SqlValue::Integer),
        FieldType::Float => filter
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(SqlValue::Real),
        FieldType::Boolean => match filter.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(SqlValue::Integer(1)),
            "false" | "0" => Some(SqlValue::Integer(0)),
            _ => None,
        },
    }
}

fn plan_statement(
    schema: &TableSchema,
    restriction: Restriction,
    cap: Option<NonZeroUsize>,
) -> Option<Statement> {
    let mut sql = format!(
        "SELECT {} AS {} FROM {}",
        quote_identifier(&schema.id_field),
        quote_identifier(PlannedRow::COLUMN),
        quote_identifier(schema.id.as_str()),
    );
    let mut params: Vec<SqlValue> = Vec::new();

    match restriction {
        Restriction::None => {}
        Restriction::Empty => return None,
        Restriction::Equals(value) => {
            sql.push_str(&format!(" WHERE {} = ?", quote_identifier(&schema.filter_field)));
            params.push(value);
        }
        Restriction::InCategories { field, categories } => {
            let placeholders = vec!["?"; categories.len()].join(", ");
            sql.push_str(&format!(
                " WHERE {} IN ({})",
                quote_identifier(&field),
                placeholders
            ));
            params.extend(categories.into_iter().map(SqlValue::Text));
        }
    }

    if let Some(cap) = cap {
        sql.push_str(" LIMIT ?");
        params.push(SqlValue::Integer(i64::try_from(cap.get()).unwrap_or(i64::MAX)));
    }

    Some(params.into_iter().fold(Statement::new(sql), |stmt, value| stmt.bind(value)))
}
