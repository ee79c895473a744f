//! Listening port resolution.
//!
//! The port is resolved exactly once at startup and then shared read-only by
//! every handler through the service state. It serializes as a plain JSON
//! number.

use std::fmt;
use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated, non-zero TCP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(NonZeroU16);

impl Port {
    /// Port used when no value is supplied on the command line.
    pub const DEFAULT: Port = match NonZeroU16::new(3000) {
        Some(port) => Port(port),
        None => panic!("default port must be non-zero"),
    };

    /// Create a port from a raw value, rejecting zero.
    pub fn new(value: u16) -> Result<Self> {
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(Error::InvalidPort { value })
    }

    /// Resolve the listening port from an optional external argument.
    ///
    /// Falls back to [`Port::DEFAULT`] when `arg` is `None`.
    pub fn resolve(arg: Option<u16>) -> Result<Self> {
        match arg {
            Some(value) => Self::new(value),
            None => {
                tracing::debug!(port = %Self::DEFAULT, "no port supplied, using default");
                Ok(Self::DEFAULT)
            }
        }
    }

    /// The raw port number.
    pub fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_3000() {
        assert_eq!(Port::DEFAULT.get(), 3000);
        assert_eq!(Port::default(), Port::DEFAULT);
    }

    #[test]
    fn test_resolve_without_argument_uses_default() {
        assert_eq!(Port::resolve(None).unwrap().get(), 3000);
    }

    #[test]
    fn test_resolve_uses_argument_as_given() {
        assert_eq!(Port::resolve(Some(4000)).unwrap().get(), 4000);
        assert_eq!(Port::resolve(Some(65535)).unwrap().get(), 65535);
    }

    #[test]
    fn test_zero_port_rejected() {
        assert_eq!(Port::new(0), Err(Error::InvalidPort { value: 0 }));
        assert!(Port::resolve(Some(0)).is_err());
        assert!(Port::try_from(0u16).is_err());
    }

    #[test]
    fn test_port_display() {
        assert_eq!(Port::new(8080).unwrap().to_string(), "8080");
    }

    #[test]
    fn test_port_serializes_as_number() {
        let json = serde_json::to_string(&Port::new(4000).unwrap()).unwrap();
        assert_eq!(json, "4000");
    }
}
