//! Typed access to D-Bus property bags.
//!
//! BlueZ property maps are heterogeneous and any property may be missing. The accessors here never
//! fail: an absent key or a value of the wrong type yields the type's zero value.

use std::collections::HashMap;

use zbus::zvariant::{OwnedValue, Value};

/// The properties of one interface on one object, keyed by property name.
pub type PropertyBag = HashMap<String, OwnedValue>;

/// Returns the boolean stored under `key`, or `false`.
pub fn get_bool(props: &PropertyBag, key: &str) -> bool {
    match props.get(key).map(|v| &**v) {
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Returns the string stored under `key`, or an empty string.
pub fn get_string(props: &PropertyBag, key: &str) -> String {
    match props.get(key).map(|v| &**v) {
        Some(Value::Str(s)) => s.as_str().to_owned(),
        _ => String::new(),
    }
}
