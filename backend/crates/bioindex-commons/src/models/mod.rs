mod field;
mod group_set;
mod record;
mod row_id;
mod schema;
mod table_id;

pub use field::{FieldDescriptor, FieldType};
pub use group_set::{GroupMembership, GroupSet};
pub use record::{Record, RecordDecodeError};
pub use row_id::RowId;
pub use schema::TableSchema;
pub use table_id::TableId;
