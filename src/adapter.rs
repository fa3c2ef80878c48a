//! BlueZ adapter records.

use zbus::zvariant::OwnedObjectPath;

use crate::{graph::ManagedObjectGraph, listing::SortKey};

/// Interface exported by every Bluetooth adapter object.
pub const INTERFACE: &str = "org.bluez.Adapter1";

/// A Bluetooth adapter found in the object graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterRecord {
    /// The adapter's device name (eg. `hci0`), taken from the last segment of its path.
    pub name: String,
    pub path: OwnedObjectPath,
}

impl AdapterRecord {
    fn from_path(path: &OwnedObjectPath) -> Self {
        let name = path.as_str().rsplit('/').next().unwrap_or_default();
        Self {
            name: name.to_string(),
            path: path.clone(),
        }
    }
}

impl SortKey for AdapterRecord {
    fn sort_key(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Returns a record for every object in `graph` that exports [`INTERFACE`], in no particular order.
///
/// Adapters are included regardless of their power or discovery state.
pub fn resolve(graph: &ManagedObjectGraph) -> Vec<AdapterRecord> {
    graph
        .objects_with(INTERFACE)
        .map(|(path, _)| {
            log::debug!("found BlueZ adapter at path {}", path.as_str());
            AdapterRecord::from_path(path)
        })
        .collect()
}
