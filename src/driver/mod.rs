//! Core driver components for the DesignWare GMAC.
//!
//! This module contains the building blocks for configuring and operating
//! one controller:
//!
//! - [`config`] - Configuration builder, lifecycle state, interface snapshot
//! - [`error`] - Error type and result alias
//! - [`gmac`] - The [`Gmac`] driver: lifecycle and initialization
//! - [`transfer`] - Frame receive and transmit
//! - [`status`] - Link, interrupt, and transmit completion polling
//! - [`filtering`] - Receive filters and station address
//!
//! # Example
//!
//! ```ignore
//! use baikal_gmac::driver::{Gmac, GmacConfig};
//!
//! let config = GmacConfig::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod config;
pub mod error;
pub mod filtering;
pub mod gmac;
pub mod status;
pub mod transfer;

// Re-exports for convenience
pub use config::{GmacConfig, InterfaceMode, State};
pub use error::{Error, Result};
pub use filtering::ReceiveFilter;
pub use gmac::{Gmac, GmacDefault};
pub use status::{DeviceStatus, InterruptStatus, StatusQuery};
pub use transfer::{EthernetHeader, ReceivedFrame, TxHeader};
