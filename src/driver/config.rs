//! Configuration types for the GMAC driver

use super::filtering::ReceiveFilter;
use crate::internal::constants::{
    AXI_IDLE_TIMEOUT_MS, BROADCAST_ADDR, DEFAULT_MAC_ADDR, ETH_HEADER_SIZE, MAC_ADDR_LEN,
    MAX_PACKET_SIZE, NV_RAM_SIZE, RESET_POLL_INTERVAL_US, SOFT_RESET_TIMEOUT_MS,
};

/// GMAC driver configuration
///
/// Built with the `with_*` methods:
///
/// ```ignore
/// let config = GmacConfig::new()
///     .with_mac_address([0x4C, 0x4D, 0x00, 0x12, 0x34, 0x56])
///     .with_reset_timeout_ms(1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GmacConfig {
    /// Permanent (factory) MAC address; also the initial station address
    pub mac_address: [u8; MAC_ADDR_LEN],
    /// Software reset timeout in milliseconds
    pub sw_reset_timeout_ms: u32,
    /// Interval between reset status polls in microseconds
    pub reset_poll_interval_us: u32,
    /// Upper bound on the best-effort AXI idle wait in milliseconds
    pub axi_idle_timeout_ms: u32,
    /// Largest payload reported to the network stack
    pub max_packet_size: usize,
}

impl Default for GmacConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GmacConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            sw_reset_timeout_ms: SOFT_RESET_TIMEOUT_MS,
            reset_poll_interval_us: RESET_POLL_INTERVAL_US,
            axi_idle_timeout_ms: AXI_IDLE_TIMEOUT_MS,
            max_packet_size: MAX_PACKET_SIZE,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the permanent MAC address
    ///
    /// If not set, a locally-administered address (02:00:00:00:00:01) is
    /// used.
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the software reset timeout
    #[must_use]
    pub const fn with_reset_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.sw_reset_timeout_ms = timeout_ms;
        self
    }

    /// Set the reset poll interval
    #[must_use]
    pub const fn with_reset_poll_interval_us(mut self, interval_us: u32) -> Self {
        self.reset_poll_interval_us = interval_us;
        self
    }

    /// Set the AXI idle wait bound
    #[must_use]
    pub const fn with_axi_idle_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.axi_idle_timeout_ms = timeout_ms;
        self
    }

    /// Set the maximum packet size reported in [`InterfaceMode`]
    #[must_use]
    pub const fn with_max_packet_size(mut self, size: usize) -> Self {
        self.max_packet_size = size;
        self
    }
}

/// Device lifecycle state
///
/// `Stopped -> Started -> Initialized`; `stop` returns to `Stopped` from
/// either of the other two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not started (initial state)
    #[default]
    Stopped,
    /// Started, rings not built yet
    Started,
    /// Hardware reset, rings built, DMA and MAC running
    Initialized,
}

/// Snapshot of the interface parameters a network stack needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceMode {
    /// Lifecycle state
    pub state: State,
    /// Hardware address length
    pub hw_address_size: usize,
    /// Ethernet header length
    pub media_header_size: usize,
    /// Largest payload
    pub max_packet_size: usize,
    /// Size of non-volatile parameter storage
    pub nv_ram_size: usize,
    /// Filters the hardware can honour
    pub receive_filter_mask: ReceiveFilter,
    /// Filters currently in effect
    pub receive_filter_setting: ReceiveFilter,
    /// Station address in use
    pub current_address: [u8; MAC_ADDR_LEN],
    /// Factory address
    pub permanent_address: [u8; MAC_ADDR_LEN],
    /// Broadcast address
    pub broadcast_address: [u8; MAC_ADDR_LEN],
    /// Station address can be changed
    pub mac_address_changeable: bool,
    /// More than one frame can be queued for transmit
    pub multiple_tx_supported: bool,
    /// Link state can be queried
    pub media_present_supported: bool,
    /// Link state observed by the last status query
    pub media_present: bool,
}

impl InterfaceMode {
    pub(crate) const fn new(
        state: State,
        config: &GmacConfig,
        receive_filter_setting: ReceiveFilter,
        current_address: [u8; MAC_ADDR_LEN],
        media_present: bool,
    ) -> Self {
        Self {
            state,
            hw_address_size: MAC_ADDR_LEN,
            media_header_size: ETH_HEADER_SIZE,
            max_packet_size: config.max_packet_size,
            nv_ram_size: NV_RAM_SIZE,
            receive_filter_mask: ReceiveFilter::SUPPORTED,
            receive_filter_setting,
            current_address,
            permanent_address: config.mac_address,
            broadcast_address: BROADCAST_ADDR,
            mac_address_changeable: true,
            multiple_tx_supported: false,
            media_present_supported: true,
            media_present,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
