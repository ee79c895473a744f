//! Service configuration resolved at startup.
//!
//! The configuration is built once by the entry point and then only read.
//! It is never stored in a global.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockbackend_lib::{Port, Result};

/// Interface the service binds to unless told otherwise: all IPv4 addresses.
pub const DEFAULT_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Startup configuration for the HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: Port,
    pub bind_ip: IpAddr,
}

impl ServiceConfig {
    pub fn new(port: Port) -> Self {
        Self {
            port,
            bind_ip: DEFAULT_BIND_IP,
        }
    }

    /// Resolve the configuration from the optional port argument.
    pub fn from_port_arg(arg: Option<u16>) -> Result<Self> {
        Port::resolve(arg).map(Self::new)
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port.get())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(Port::DEFAULT)
    }
}
