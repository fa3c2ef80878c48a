//! Plain-text rendering of listings.

use std::io::{self, Write};

use crate::{AdapterRecord, DeviceRecord, Listing};

/// Writes one `[index] name` line per adapter.
pub fn write_adapters<W: Write>(out: &mut W, adapters: &Listing<AdapterRecord>) -> io::Result<()> {
    if adapters.is_empty() {
        return writeln!(out, "No bluetooth adapters found.");
    }
    for (i, adapter) in adapters.iter() {
        writeln!(out, "[{}] {}", i, adapter.name)?;
    }
    Ok(())
}

/// Writes one `[index] name (address) Connected=<bool>` line per device.
pub fn write_devices<W: Write>(out: &mut W, devices: &Listing<DeviceRecord>) -> io::Result<()> {
    if devices.is_empty() {
        return writeln!(out, "No paired devices found.");
    }
    for (i, device) in devices.iter() {
        writeln!(
            out,
            "[{}] {} ({}) Connected={}",
            i,
            device.display_name(),
            device.address,
            device.connected
        )?;
    }
    Ok(())
}
