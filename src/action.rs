//! Connecting and disconnecting devices picked by index.

use std::fmt;

use crate::{
    device::{DeviceProxy, DeviceRecord},
    listing::Listing,
    Error, Result, Session,
};

/// An action that can be invoked on a [`DeviceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Disconnect,
}

impl Action {
    /// Returns the name of the `org.bluez.Device1` method implementing this action.
    pub fn method(self) -> &'static str {
        match self {
            Self::Connect => "Connect",
            Self::Disconnect => "Disconnect",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
        })
    }
}

/// Parses a user-supplied device index.
///
/// Only checks that `s` is an integer; whether it is in range is decided by [`Listing::select`].
pub fn parse_index(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|e| Error::invalid_selection(format!("{:?} is not a number: {}", s, e)))
}

/// Invokes `action` on the device at `index` in `devices`, returning the affected record.
///
/// The index is validated before anything is sent to BlueZ. Success means BlueZ accepted the call;
/// the resulting connection state is not read back.
pub async fn dispatch<'a>(
    session: &Session,
    devices: &'a Listing<DeviceRecord>,
    index: i64,
    action: Action,
) -> Result<&'a DeviceRecord> {
    let device = devices.select(index)?;

    log::debug!("calling {} on {}", action.method(), device.path.as_str());
    let proxy = DeviceProxy::new(&session.conn, (*device.path).clone())
        .await
        .map_err(|e| Error::action(action, e))?;
    match action {
        Action::Connect => proxy.connect().await,
        Action::Disconnect => proxy.disconnect().await,
    }
    .map_err(|e| Error::action(action, e))?;

    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn parse() {
        assert_eq!(parse_index("0").unwrap(), 0);
        assert_eq!(parse_index("12").unwrap(), 12);
        assert_eq!(parse_index("-1").unwrap(), -1);
    }

    #[test]
    fn parse_invalid() {
        for s in ["", "one", "1.5", "0x1", " 3", "3\n", "99999999999999999999"] {
            let err = parse_index(s).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSelection, "{:?}", s);
        }
    }

    #[test]
    fn methods() {
        assert_eq!(Action::Connect.method(), "Connect");
        assert_eq!(Action::Disconnect.method(), "Disconnect");
        assert_eq!(Action::Disconnect.to_string(), "disconnect");
    }
}
