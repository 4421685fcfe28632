use crate::core::value::Value;

/// One row to be written: table name, ordered column list, and values
/// positionally aligned with the columns. Constructed fresh per event and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRow {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Value>,
}

impl InsertRow {
    pub fn new(table: &str, columns: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        InsertRow {
            table: table.to_string(),
            columns,
            values,
        }
    }

    /// Value bound to `column`, if the row carries that column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .map(|i| &self.values[i])
    }
}
