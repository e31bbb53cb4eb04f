use super::TableSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a stored object cannot become a `Record`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordDecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("stored object is not a JSON object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{field}' is not a valid {expected}")]
    TypeMismatch { field: String, expected: &'static str },
}

/// A hydrated record: field name to value, in schema field order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Decode a stored JSON object and project it onto the schema's fields.
    ///
    /// Keys outside the schema are dropped; every schema field must be present
    /// with a value its type accepts.
    pub fn decode(schema: &TableSchema, bytes: &[u8]) -> Result<Self, RecordDecodeError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| RecordDecodeError::InvalidJson(e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(RecordDecodeError::NotAnObject);
        };

        let mut fields = Map::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let value = object
                .remove(&field.name)
                .ok_or_else(|| RecordDecodeError::MissingField(field.name.clone()))?;

            if !field.field_type.accepts(&value) {
                return Err(RecordDecodeError::TypeMismatch {
                    field: field.name.clone(),
                    expected: field.field_type.as_str(),
                });
            }
            fields.insert(field.name.clone(), value);
        }

        Ok(Self(fields))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldDescriptor, FieldType};

    fn schema() -> TableSchema {
        TableSchema::new(
            "patients",
            "code",
            vec![
                FieldDescriptor::new("id", FieldType::Integer),
                FieldDescriptor::new("code", FieldType::String),
                FieldDescriptor::new("age", FieldType::Integer),
            ],
        )
    }

    #[test]
    fn test_decode_projects_schema_fields_in_order() {
        let bytes = br#"{"age": 41, "extra": "dropped", "code": "A", "id": 7}"#;
        let record = Record::decode(&schema(), bytes).unwrap();

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(names, vec!["id", "code", "age"]);
        assert_eq!(record.get("code"), Some(&Value::from("A")));
        assert!(record.get("extra").is_none());
    }

    #[test]
    fn test_decode_missing_field() {
        let err = Record::decode(&schema(), br#"{"id": 1, "code": "A"}"#).unwrap_err();
        assert_eq!(err, RecordDecodeError::MissingField("age".to_string()));
    }

    #[test]
    fn test_decode_type_mismatch() {
        let err = Record::decode(&schema(), br#"{"id": 1, "code": 5, "age": 3}"#).unwrap_err();
        assert!(matches!(err, RecordDecodeError::TypeMismatch { ref field, .. } if field == "code"));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert_eq!(Record::decode(&schema(), b"[1,2]").unwrap_err(), RecordDecodeError::NotAnObject);
        assert!(matches!(
            Record::decode(&schema(), b"{not json").unwrap_err(),
            RecordDecodeError::InvalidJson(_)
        ));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let record = Record::decode(&schema(), br#"{"id": 1, "code": "A", "age": null}"#).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":1,"code":"A","age":null}"#
        );
    }
}
