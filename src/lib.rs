//! Snapshot queries over BlueZ adapters and paired devices, plus index-based connect/disconnect.
//!
//! Every command follows the same linear pipeline: open a [`Session`], fetch the
//! [`ManagedObjectGraph`] once, resolve [`AdapterRecord`]s or [`DeviceRecord`]s from it, order
//! them into a [`Listing`], and optionally [`dispatch`] an [`Action`] against one entry.

pub mod action;
pub mod adapter;
pub mod device;
mod error;
pub mod graph;
pub mod listing;
pub mod props;
pub mod report;

pub use action::{dispatch, parse_index, Action};
pub use adapter::AdapterRecord;
pub use device::DeviceRecord;
pub use error::{Error, ErrorKind, Result};
pub use graph::ManagedObjectGraph;
pub use listing::{Listing, SortKey};

use zbus::{fdo::ObjectManagerProxy, Connection};

/// Well-known bus name of the BlueZ daemon.
pub const SERVICE: &str = "org.bluez";

/// Object path under which BlueZ exports its adapters (`/org/bluez/hci0`, ...).
pub const SERVICE_ROOT: &str = "/org/bluez";

/// Adapter name used when none is given on the command line.
pub const DEFAULT_ADAPTER: &str = "hci0";

/// A handle to a system bus connection.
///
/// One session is opened per command invocation and passed explicitly to every call that talks to
/// BlueZ. The connection is closed when the session is dropped.
#[derive(Clone)]
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Opens a new connection to the system bus.
    pub async fn new() -> Result<Self> {
        let conn = Connection::system().await.map_err(Error::connection)?;
        log::debug!("opened system bus connection {}", conn.server_guid());
        Ok(Self { conn })
    }

    /// Connects to the BlueZ D-Bus object manager.
    async fn object_manager(&self) -> zbus::Result<ObjectManagerProxy<'static>> {
        ObjectManagerProxy::builder(&self.conn)
            .destination(SERVICE)?
            .path("/")?
            .build()
            .await
    }
}
