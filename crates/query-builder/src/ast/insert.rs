//! Defines the AST for a single-row parameterized INSERT statement.

use model::{core::value::Value, records::insert::InsertRow};

/// One INSERT of one row.
///
/// Columns and values are positionally aligned; the renderer binds every
/// value as a parameter. The row shape comes from the field mapping, not
/// from the destination table's schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl From<&InsertRow> for Insert {
    fn from(row: &InsertRow) -> Self {
        Insert {
            table: row.table.clone(),
            columns: row.columns.clone(),
            values: row.values.clone(),
        }
    }
}
