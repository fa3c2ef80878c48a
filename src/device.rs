//! Paired BlueZ device records.

use zbus::zvariant::OwnedObjectPath;

use crate::{
    graph::ManagedObjectGraph,
    listing::SortKey,
    props::{get_bool, get_string},
    SERVICE_ROOT,
};

/// Interface exported by every remote device object.
pub const INTERFACE: &str = "org.bluez.Device1";

mod private {
    use zbus::dbus_proxy;

    #[dbus_proxy(
        interface = "org.bluez.Device1",
        default_service = "org.bluez",
        assume_defaults = false
    )]
    trait Device {
        async fn connect(&self) -> zbus::Result<()>;
        async fn disconnect(&self) -> zbus::Result<()>;
    }
}

pub(crate) use private::DeviceProxy;

/// A paired device belonging to one adapter.
///
/// Records produced by [`resolve`] always have `paired` set, and their `path` always starts with
/// the path of the adapter they were resolved for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub path: OwnedObjectPath,
    /// Hardware address as reported by BlueZ (`AA:BB:CC:11:22:33`), or empty if unknown.
    pub address: String,
    /// Remote device name, or empty if BlueZ doesn't know it.
    pub name: String,
    pub connected: bool,
    pub paired: bool,
}

impl DeviceRecord {
    /// Returns the name to show a user for this device.
    ///
    /// Falls back to the address if the name is empty, and to the object path if both are.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.address.is_empty() {
            &self.address
        } else {
            self.path.as_str()
        }
    }
}

impl SortKey for DeviceRecord {
    fn sort_key(&self) -> &str {
        &self.address
    }

    fn path(&self) -> &str {
        self.path.as_str()
    }
}

/// Returns the object path BlueZ uses for the adapter called `adapter` (eg. `/org/bluez/hci0`).
pub fn adapter_path(adapter: &str) -> String {
    format!("{}/{}", SERVICE_ROOT, adapter)
}

/// Returns the paired devices of `adapter` found in `graph`, in no particular order.
///
/// A device belongs to the adapter if its object path starts with the adapter's path. Unpaired
/// devices are skipped.
pub fn resolve(graph: &ManagedObjectGraph, adapter: &str) -> Vec<DeviceRecord> {
    let prefix = adapter_path(adapter);
    let mut devices = Vec::new();
    for (path, props) in graph.objects_with(INTERFACE) {
        if !path.as_str().starts_with(&prefix) {
            log::trace!("skipping device {} (not under {})", path.as_str(), prefix);
            continue;
        }
        if !get_bool(props, "Paired") {
            log::trace!("skipping unpaired device {}", path.as_str());
            continue;
        }

        log::debug!("found paired device at path {}", path.as_str());
        devices.push(DeviceRecord {
            path: path.clone(),
            address: get_string(props, "Address"),
            name: get_string(props, "Name"),
            connected: get_bool(props, "Connected"),
            paired: true,
        });
    }
    devices
}
