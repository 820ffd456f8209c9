//! w1-transport: 1-Wire bus master abstractions
//!
//! This crate provides traits and types for enumerating and reading devices
//! on a 1-Wire bus, with feature-gated backends. The default build enables a
//! `mock` backend so that binaries can compile and run on hosts without a
//! w1-enabled kernel; the `sysfs` backend drives the Linux w1 subsystem.

mod types;
pub use types::{DeviceEntry, DeviceId, DeviceKind};

mod error;
pub use error::{Result, TransportError};

mod traits;
pub use traits::W1Bus;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::MockBus;

#[cfg(feature = "sysfs")]
mod sysfs;

#[cfg(feature = "sysfs")]
pub use sysfs::SysfsBus;
