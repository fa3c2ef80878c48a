use std::fmt;

use crate::action::Action;

/// A result type hardwired to use [`Error`] as its error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type used throughout this library.
///
/// Every error is terminal for the command that produced it. Use [`Error::kind`] to find out which
/// stage of the pipeline failed.
#[derive(Debug)]
pub struct Error {
    inner: Repr,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The system bus could not be reached.
    Connection,
    /// Enumerating the managed objects of BlueZ failed.
    Query,
    /// A device index was not a number, or out of range for the listing it was applied to.
    InvalidSelection,
    /// BlueZ rejected a `Connect` or `Disconnect` call.
    Action,
}

#[derive(Debug)]
enum Repr {
    Connection(zbus::Error),
    Query(zbus::Error),
    InvalidSelection(String),
    Action(Action, zbus::Error),
}

impl Error {
    pub(crate) fn connection(e: zbus::Error) -> Self {
        Self {
            inner: Repr::Connection(e),
        }
    }

    pub(crate) fn query(e: impl Into<zbus::Error>) -> Self {
        Self {
            inner: Repr::Query(e.into()),
        }
    }

    pub(crate) fn invalid_selection(msg: impl Into<String>) -> Self {
        Self {
            inner: Repr::InvalidSelection(msg.into()),
        }
    }

    pub(crate) fn action(action: Action, e: zbus::Error) -> Self {
        Self {
            inner: Repr::Action(action, e),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            Repr::Connection(_) => ErrorKind::Connection,
            Repr::Query(_) => ErrorKind::Query,
            Repr::InvalidSelection(_) => ErrorKind::InvalidSelection,
            Repr::Action(..) => ErrorKind::Action,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Repr::Connection(e) => write!(f, "cannot reach system bus: {}", e),
            Repr::Query(e) => write!(f, "GetManagedObjects failed: {}", e),
            Repr::InvalidSelection(msg) => f.write_str(msg),
            Repr::Action(action, e) => write!(f, "{} failed: {}", action.method(), e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner {
            Repr::Connection(e) | Repr::Query(e) | Repr::Action(_, e) => Some(e),
            Repr::InvalidSelection(_) => None,
        }
    }
}
