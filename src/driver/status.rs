//! Link, interrupt, and transmit completion status.
//!
//! This module extends [`Gmac`] with [`get_status`](Gmac::get_status), the
//! single polling entry point that:
//!
//! - samples the link bit and caches it as "media present"
//! - reports at most one completed transmit buffer, oldest first
//! - reads and acknowledges the RX/TX interrupt bits in one step
//!
//! Transmit completion is only ever reported here. There is no callback.

use bitflags::bitflags;

use super::error::Result;
use super::gmac::Gmac;
use crate::internal::log::gmac_debug;
use crate::internal::register::RegisterAccess;
use crate::internal::register::dma::{DMASTATUS_RI, DMASTATUS_TI, DmaRegs};
use crate::internal::register::mac::MacRegs;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Receive/transmit interrupt flags parsed from the DMA status register.
///
/// # Example
///
/// ```ignore
/// let status = gmac.get_status(StatusQuery::INTERRUPTS)?;
/// if let Some(irq) = status.interrupts {
///     if irq.rx_complete {
///         // Drain the RX ring
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// RX complete - at least one frame was received
    pub rx_complete: bool,
    /// TX complete - at least one frame was transmitted
    pub tx_complete: bool,
}

impl InterruptStatus {
    /// Create from raw DMA status register value
    #[inline]
    pub fn from_raw(status: u32) -> Self {
        Self {
            rx_complete: (status & DMASTATUS_RI) != 0,
            tx_complete: (status & DMASTATUS_TI) != 0,
        }
    }

    /// Convert to raw value for clearing (write-1-to-clear)
    #[inline]
    pub fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.rx_complete {
            val |= DMASTATUS_RI;
        }
        if self.tx_complete {
            val |= DMASTATUS_TI;
        }
        val
    }

    /// Check if any interrupt is pending
    #[inline]
    pub fn any(&self) -> bool {
        self.rx_complete || self.tx_complete
    }
}

// =============================================================================
// Status Query
// =============================================================================

bitflags! {
    /// Optional parts of a [`Gmac::get_status`] call
    ///
    /// The link state is always sampled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StatusQuery: u8 {
        /// Read and acknowledge the RX/TX interrupt bits
        const INTERRUPTS = 0x01;
        /// Report the oldest completed transmit buffer, if any
        const TX_COMPLETION = 0x02;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusQuery {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "StatusQuery({=u8:#04x})", self.bits());
    }
}

/// Result of [`Gmac::get_status`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// Link state sampled during this call
    pub media_present: bool,
    /// Interrupt bits that were pending and have now been cleared
    ///
    /// `None` unless [`StatusQuery::INTERRUPTS`] was requested.
    pub interrupts: Option<InterruptStatus>,
    /// Bus address of a transmit buffer the DMA has finished with
    ///
    /// `None` when not requested or when nothing has completed.
    pub completed_tx: Option<u32>,
}

// =============================================================================
// Status Operation
// =============================================================================

impl<R: RegisterAccess, const RX_DESCS: usize, const TX_DESCS: usize> Gmac<R, RX_DESCS, TX_DESCS> {
    /// Poll link, transmit completion, and interrupt status
    ///
    /// A reported interrupt bit is cleared in hardware before this returns,
    /// so it will not be reported again. Completed transmit buffers are
    /// returned one per call in the order they were queued.
    ///
    /// # Errors
    /// - `NotStarted` - device is stopped
    /// - `DeviceError` - device is started but not initialized
    pub fn get_status(&mut self, query: StatusQuery) -> Result<DeviceStatus> {
        critical_section::with(|_| {
            self.require_initialized("get_status")?;

            let media_present = self.sample_link();

            let completed_tx = if query.contains(StatusQuery::TX_COMPLETION) {
                self.dma.reclaim_tx()
            } else {
                None
            };

            let interrupts = if query.contains(StatusQuery::INTERRUPTS) {
                let dma = DmaRegs::new(self.registers());
                let pending = InterruptStatus::from_raw(dma.status());
                let ack = pending.to_raw();
                if ack != 0 {
                    dma.set_status(ack);
                }
                Some(pending)
            } else {
                None
            };

            Ok(DeviceStatus {
                media_present,
                interrupts,
                completed_tx,
            })
        })
    }

    /// Sample the link bit, update the cache, and log a transition
    pub(super) fn sample_link(&mut self) -> bool {
        let up = MacRegs::new(self.registers()).is_link_up();
        if up != self.media_present {
            self.media_present = up;
            gmac_debug!("link {}", if up { "up" } else { "down" });
        }
        up
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
