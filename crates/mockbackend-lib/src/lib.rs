//! Mock backend library entry points.
//!
//! This crate holds the immutable data every request handler reads: the
//! resolved listening [`Port`] and the static [`UserDirectory`]. Both are
//! constructed once at startup and never change afterwards. HTTP glue lives in
//! `mockbackend-service-shared`.

#![deny(warnings)]

pub mod directory;
pub mod error;
pub mod port;

pub use directory::{User, UserDirectory, UserId};
pub use error::{Error, Result};
pub use port::Port;
