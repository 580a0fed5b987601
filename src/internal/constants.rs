//! Centralized Constants
//!
//! Single source of truth for the sizes, timeouts, and well-known values the
//! GMAC driver relies on.
//!
//! # Note
//!
//! Hardware register bit definitions remain in their respective modules
//! (`register/dma.rs`, `register/mac.rs`) and descriptor bits live in
//! `dma/descriptor/bits.rs`.

// =============================================================================
// Frame and Buffer Sizes
// =============================================================================

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Largest payload reported to callers (standard Ethernet MTU)
pub const MAX_PACKET_SIZE: usize = 1500;

/// Size of every receive buffer handed to the DMA engine
pub const RX_BUFFER_SIZE: usize = 2048;

/// Largest length a single TX descriptor can carry (13-bit TBS1 field)
pub const MAX_TX_BUFFER_LEN: usize = 0x1FFF;

// =============================================================================
// Default Ring Sizes
// =============================================================================

/// Default number of receive descriptors
pub const DEFAULT_RX_DESCRIPTORS: usize = 64;

/// Default number of transmit descriptors
pub const DEFAULT_TX_DESCRIPTORS: usize = 64;

// =============================================================================
// Timing Constants
// =============================================================================

/// Soft reset timeout in milliseconds (3000 polls at 1 ms)
pub const SOFT_RESET_TIMEOUT_MS: u32 = 3000;

/// Interval between reset status polls in microseconds
pub const RESET_POLL_INTERVAL_US: u32 = 1000;

/// Upper bound on the best-effort wait for the AXI bus to go idle
pub const AXI_IDLE_TIMEOUT_MS: u32 = 3000;

// =============================================================================
// Addresses
// =============================================================================

/// Ethernet broadcast address
pub const BROADCAST_ADDR: [u8; MAC_ADDR_LEN] = [0xFF; MAC_ADDR_LEN];

/// Locally administered placeholder address used when none is configured
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

/// Size of the non-volatile parameter store (none present)
pub const NV_RAM_SIZE: usize = 0;
