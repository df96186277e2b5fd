//! Record definitions
//!
//! A record is a JSON object; a collection is an ordered list of them.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Field that identifies a record inside its collection
pub const ID_FIELD: &str = "id";

/// One stored record: field name → value
pub type Record = Map<String, Value>;

/// All collections of a store, keyed by name
pub type Collections = BTreeMap<String, Vec<Record>>;

/// Get the id of a record, if it has a string id
pub fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}
