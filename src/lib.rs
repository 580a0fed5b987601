//! DesignWare GMAC Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Synopsys DesignWare GMAC
//! Ethernet controller as integrated in Baikal SoCs.
//!
//! The driver moves frames between the caller and the MAC through two
//! chained descriptor rings whose ownership bit is the only synchronization
//! with the DMA engine. It is entirely poll based: there is no interrupt
//! handler and no callback.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): [`Gmac`] lifecycle, receive, transmit,
//!    status polling, receive filters
//! 2. **HAL Layer** ([`hal`]): reset sequencing over `embedded_hal` delays
//! 3. **Register Layer** ([`RegisterAccess`]): one 32-bit register window,
//!    backed by [`Mmio`] on hardware
//!
//! ## Lifecycle
//!
//! ```text
//! Stopped --start--> Started --initialize--> Initialized
//!    ^                  |                         |
//!    +------stop--------+----------stop-----------+
//! ```
//!
//! Everything except `start`, `stop`, and `initialize` requires the
//! `Initialized` state and fails with `NotStarted` when stopped or
//! `DeviceError` when only started.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for public types and defmt logging
//! - `log`: Log through the `log` facade
//!
//! # Example
//!
//! ```ignore
//! use baikal_gmac::{Gmac, GmacConfig, Mmio, StatusQuery, TxHeader};
//!
//! static mut GMAC: Gmac<Mmio> = Gmac::new(
//!     unsafe { Mmio::new(0x3000_0000) },
//!     GmacConfig::new().with_mac_address([0x4C, 0x4D, 0x00, 0x12, 0x34, 0x56]),
//! );
//!
//! let gmac = unsafe { &mut *core::ptr::addr_of_mut!(GMAC) };
//! gmac.start()?;
//! gmac.initialize(0, 0, &mut delay)?;
//!
//! let mut buf = [0u8; 1536];
//! match gmac.receive(&mut buf) {
//!     Ok(frame) => handle(&buf[..frame.len]),
//!     Err(e) if e.is_retryable() => {}
//!     Err(e) => return Err(e),
//! }
//!
//! // `TX_FRAME` must stay untouched until its completion is reported
//! unsafe { gmac.transmit(&mut TX_FRAME, Some(TxHeader::ethernet([0xFF; 6], 0x0806)))? };
//! let status = gmac.get_status(StatusQuery::all())?;
//! ```
//!
//! # Memory Requirements
//!
//! With the default ring sizes (64 RX, 64 TX) the driver embeds 128 KiB of
//! receive buffers plus 2 x 65 descriptors of 32 bytes. All of it must be
//! reachable by the DMA below 4 GiB.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{GmacConfig, InterfaceMode, State};
pub use driver::error::{Error, Result};
pub use driver::filtering::ReceiveFilter;
pub use driver::gmac::{Gmac, GmacDefault};
pub use driver::status::{DeviceStatus, InterruptStatus, StatusQuery};
pub use driver::transfer::{EthernetHeader, ReceivedFrame, TxHeader};
pub use internal::dma::Ownership;
pub use internal::register::{Mmio, RegisterAccess};

/// Low-level register accessors for advanced use.
///
/// These are intentionally separated from the primary facade. Most users should
/// prefer the safe driver APIs instead of touching registers directly.
///
/// # Safety
///
/// Direct register access bypasses driver invariants. Use only if you fully
/// understand the DesignWare GMAC and accept responsibility for correct
/// sequencing against the running DMA.
pub mod unsafe_registers {
    pub use crate::internal::register::dma::DmaRegs;
    pub use crate::internal::register::mac::MacRegs;
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        // Timing
        AXI_IDLE_TIMEOUT_MS,
        // MAC address
        BROADCAST_ADDR,
        DEFAULT_MAC_ADDR,
        // Ring sizes
        DEFAULT_RX_DESCRIPTORS,
        DEFAULT_TX_DESCRIPTORS,
        // Frame/buffer sizes
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        MAX_PACKET_SIZE,
        MAX_TX_BUFFER_LEN,
        RESET_POLL_INTERVAL_US,
        RX_BUFFER_SIZE,
        SOFT_RESET_TIMEOUT_MS,
    };
}
